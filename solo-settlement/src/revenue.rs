use serde::Serialize;
use solo_quantities::Cost;

use crate::stay::{Stay, StayStatus};

/// Money totals over the stays of a property.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub n_stays: usize,

    /// Stays that are not paid yet, whatever their status.
    pub n_unpaid_stays: usize,

    /// Charges of the paid stays.
    pub received: Cost,

    /// Charges of the completed stays awaiting payment.
    pub receivable: Cost,
}

impl<'a> FromIterator<&'a Stay> for Revenue {
    fn from_iter<I: IntoIterator<Item = &'a Stay>>(stays: I) -> Self {
        let mut revenue = Self::default();
        for stay in stays {
            revenue.n_stays += 1;
            let charge = stay.settlement.map_or(Cost::ZERO, |settlement| settlement.charge);
            match stay.status {
                StayStatus::Paid => revenue.received += charge,
                StayStatus::Completed => {
                    revenue.n_unpaid_stays += 1;
                    revenue.receivable += charge;
                }
                StayStatus::PendingEntry | StayStatus::InProgress => revenue.n_unpaid_stays += 1,
            }
        }
        revenue
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use solo_quantities::{KilowattHourRate, KilowattHours};

    use super::*;
    use crate::reading::MeterSnapshot;

    fn snapshot(grid_import: f64) -> MeterSnapshot {
        MeterSnapshot {
            grid_import: KilowattHours(grid_import),
            grid_export: KilowattHours(0.0),
            generation: None,
        }
    }

    /// Stay consuming `consumption` kWh at 1 BRL/kWh, driven up to `status`.
    fn stay(consumption: f64, status: StayStatus) -> Stay {
        let check_in = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut stay = Stay::builder()
            .guest_name("Maria")
            .check_in(check_in)
            .tariff(KilowattHourRate(1.0))
            .build();
        if status == StayStatus::PendingEntry {
            return stay;
        }
        stay.record_entry(snapshot(100.0)).unwrap();
        if status == StayStatus::InProgress {
            return stay;
        }
        let check_out = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        stay.complete(check_out, snapshot(100.0 + consumption), None).unwrap();
        if status == StayStatus::Paid {
            stay.mark_paid().unwrap();
        }
        stay
    }

    #[test]
    fn test_revenue() {
        let stays = [
            stay(50.0, StayStatus::Paid),
            stay(20.0, StayStatus::Paid),
            stay(30.0, StayStatus::Completed),
            stay(0.0, StayStatus::InProgress),
            stay(0.0, StayStatus::PendingEntry),
        ];
        let revenue: Revenue = stays.iter().collect();
        assert_eq!(revenue.n_stays, 5);
        assert_eq!(revenue.n_unpaid_stays, 3);
        assert_abs_diff_eq!(revenue.received.0, 70.0);
        assert_abs_diff_eq!(revenue.receivable.0, 30.0);
    }

    #[test]
    fn test_no_stays() {
        assert_eq!(Revenue::from_iter(std::iter::empty::<&Stay>()), Revenue::default());
    }
}
