use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use solo_quantities::KilowattHourRate;
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    contact::{GuestContact, PaymentKeyPolicy},
    error::ValidationError,
    message::{Locale, render},
    period::StayPeriod,
    reading::{MeterSnapshot, Readings},
    settlement::Settlement,
    tariff::resolve_tariff,
};

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum StayStatus {
    /// Registered, no meter has been read yet.
    #[default]
    #[display("pending entry")]
    PendingEntry,

    /// Check-in readings recorded.
    #[display("in progress")]
    InProgress,

    /// Check-out readings recorded and the stay is settled.
    #[display("completed")]
    Completed,

    /// The guest paid the settlement.
    #[display("paid")]
    Paid,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Action {
    #[display("record the entry readings of")]
    RecordEntry,

    #[display("complete")]
    Complete,

    #[display("resubmit the readings of")]
    ResubmitReadings,

    #[display("mark as paid")]
    MarkPaid,
}

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} a stay that is {status}")]
    NotAllowed { action: Action, status: StayStatus },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Guest stay and the values attached to it at every lifecycle step.
///
/// Persisting it is up to the storage layer, the last write wins.
#[derive(Clone, Debug, Builder, Serialize, Deserialize)]
pub struct Stay {
    #[builder(into)]
    pub guest_name: String,

    #[builder(into)]
    pub guest_phone: Option<String>,

    /// Per-stay payment key, see [`PaymentKeyPolicy`].
    #[builder(into)]
    pub payment_key: Option<String>,

    pub check_in: NaiveDate,

    #[builder(skip)]
    pub check_out: Option<NaiveDate>,

    /// Overrides the property tariff.
    pub tariff: Option<KilowattHourRate>,

    #[builder(skip)]
    pub entry: Option<MeterSnapshot>,

    #[builder(skip)]
    pub exit: Option<MeterSnapshot>,

    #[builder(skip)]
    pub settlement: Option<Settlement>,

    #[builder(skip)]
    pub status: StayStatus,
}

impl Stay {
    /// Record the check-in readings.
    ///
    /// Overwriting the entry readings of a completed stay discards its settlement
    /// and brings it back in progress.
    #[instrument(skip_all, fields(guest_name = %self.guest_name))]
    pub fn record_entry(&mut self, entry: MeterSnapshot) -> Result<(), TransitionError> {
        match self.status {
            StayStatus::PendingEntry | StayStatus::InProgress => {}
            StayStatus::Completed => {
                self.check_out = None;
                self.exit = None;
                self.settlement = None;
            }
            StayStatus::Paid => return Err(self.not_allowed(Action::RecordEntry)),
        }
        self.entry = Some(entry);
        self.status = StayStatus::InProgress;
        info!(status = %self.status, "recorded the entry readings");
        Ok(())
    }

    /// Record the check-out readings and settle the stay.
    ///
    /// The stay is left untouched when the readings do not validate.
    #[instrument(skip_all, fields(guest_name = %self.guest_name))]
    pub fn complete(
        &mut self,
        check_out: NaiveDate,
        exit: MeterSnapshot,
        property_tariff: Option<KilowattHourRate>,
    ) -> Result<&Settlement, TransitionError> {
        let (StayStatus::InProgress, Some(entry)) = (self.status, self.entry) else {
            return Err(self.not_allowed(Action::Complete));
        };
        let settlement = self.settle(check_out, entry, exit, property_tariff)?;
        self.check_out = Some(check_out);
        self.exit = Some(exit);
        self.status = StayStatus::Completed;
        info!(charge = ?settlement.charge, "completed");
        Ok(self.settlement.insert(settlement))
    }

    /// Overwrite both snapshots of a completed stay and settle it again from scratch.
    #[instrument(skip_all, fields(guest_name = %self.guest_name))]
    pub fn resubmit_readings(
        &mut self,
        entry: MeterSnapshot,
        exit: MeterSnapshot,
        property_tariff: Option<KilowattHourRate>,
    ) -> Result<&Settlement, TransitionError> {
        let (StayStatus::Completed, Some(check_out)) = (self.status, self.check_out) else {
            return Err(self.not_allowed(Action::ResubmitReadings));
        };
        let settlement = self.settle(check_out, entry, exit, property_tariff)?;
        self.entry = Some(entry);
        self.exit = Some(exit);
        info!(charge = ?settlement.charge, "resettled");
        Ok(self.settlement.insert(settlement))
    }

    /// Confirm the payment, after which the stay is final.
    pub fn mark_paid(&mut self) -> Result<(), TransitionError> {
        if self.status != StayStatus::Completed {
            return Err(self.not_allowed(Action::MarkPaid));
        }
        self.status = StayStatus::Paid;
        info!(guest_name = %self.guest_name, "marked as paid");
        Ok(())
    }

    #[must_use]
    pub fn contact(
        &self,
        policy: PaymentKeyPolicy,
        owner_payment_key: Option<&str>,
    ) -> GuestContact {
        GuestContact {
            name: self.guest_name.clone(),
            phone: self.guest_phone.clone(),
            payment_key: policy.resolve(self.payment_key.as_deref(), owner_payment_key),
        }
    }

    /// Guest message of a settled stay.
    #[must_use]
    pub fn message(
        &self,
        policy: PaymentKeyPolicy,
        owner_payment_key: Option<&str>,
        locale: Locale,
    ) -> Option<String> {
        self.settlement
            .as_ref()
            .map(|settlement| render(settlement, &self.contact(policy, owner_payment_key), locale))
    }

    fn settle(
        &self,
        check_out: NaiveDate,
        entry: MeterSnapshot,
        exit: MeterSnapshot,
        property_tariff: Option<KilowattHourRate>,
    ) -> Result<Settlement, ValidationError> {
        let readings = Readings::try_pair(entry, exit)?;
        let tariff = resolve_tariff(self.tariff, property_tariff)?;
        Settlement::try_compute(StayPeriod::closed(self.check_in, check_out), &readings, tariff)
    }

    const fn not_allowed(&self, action: Action) -> TransitionError {
        TransitionError::NotAllowed { action, status: self.status }
    }
}
