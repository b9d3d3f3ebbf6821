use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use solo_quantities::{Cost, KilowattHourRate, KilowattHours};
use tracing::{debug, instrument};

use crate::{
    error::ValidationError,
    mode::Mode,
    period::StayPeriod,
    reading::{Metric, Readings},
};

/// Largest shortfall of generation below injection still taken as equal readings.
const SELF_CONSUMPTION_TOLERANCE: KilowattHours = KilowattHours(1e-9);

/// Consumption components of a settled stay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Breakdown {
    Simple {
        grid_consumption: KilowattHours,

        /// Net export, deemed consumed on site for billing.
        solar_export: KilowattHours,
    },

    Monitoring {
        grid_consumption: KilowattHours,
        grid_injection: KilowattHours,
        solar_generation: KilowattHours,

        /// Generation that never left the property.
        self_consumption: KilowattHours,
    },
}

impl Breakdown {
    pub fn try_from_readings(readings: &Readings) -> Result<Self, ValidationError> {
        let grid_consumption = readings.grid_import.try_delta(Metric::GridImport)?;
        let grid_export = readings.grid_export.try_delta(Metric::GridExport)?;

        let Some(generation) = readings.generation else {
            return Ok(Self::Simple { grid_consumption, solar_export: grid_export });
        };
        let solar_generation = generation.try_delta(Metric::Generation)?;
        let self_consumption = solar_generation - grid_export;
        if self_consumption < -SELF_CONSUMPTION_TOLERANCE {
            return Err(ValidationError::NegativeSelfConsumption);
        }
        let self_consumption = if self_consumption < SELF_CONSUMPTION_TOLERANCE {
            KilowattHours::ZERO
        } else {
            self_consumption
        };
        Ok(Self::Monitoring {
            grid_consumption,
            grid_injection: grid_export,
            solar_generation,
            self_consumption,
        })
    }

    pub const fn mode(&self) -> Mode {
        match self {
            Self::Simple { .. } => Mode::Simple,
            Self::Monitoring { .. } => Mode::Monitoring,
        }
    }

    /// Billable energy.
    pub fn total_consumption(&self) -> KilowattHours {
        match *self {
            Self::Simple { grid_consumption, solar_export } => grid_consumption + solar_export,
            Self::Monitoring { grid_consumption, self_consumption, .. } => {
                self_consumption + grid_consumption
            }
        }
    }
}

/// Energy consumption and charge owed for one guest stay.
///
/// Always computed as a whole from the inputs, values are kept unrounded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub n_days: i64,
    pub breakdown: Breakdown,
    pub total_consumption: KilowattHours,
    pub tariff: KilowattHourRate,
    pub charge: Cost,
}

impl Settlement {
    #[instrument(skip_all, fields(check_in = %period.check_in, mode = %readings.mode()))]
    pub fn try_compute(
        period: StayPeriod,
        readings: &Readings,
        tariff: KilowattHourRate,
    ) -> Result<Self, ValidationError> {
        let (check_out, n_days) = period.try_close()?;
        let breakdown = Breakdown::try_from_readings(readings)?;
        let total_consumption = breakdown.total_consumption();
        let charge = total_consumption * tariff;
        debug!(n_days, ?breakdown, ?total_consumption, ?tariff, ?charge, "settled");
        Ok(Self {
            check_in: period.check_in,
            check_out,
            n_days,
            breakdown,
            total_consumption,
            tariff,
            charge,
        })
    }

    pub const fn mode(&self) -> Mode {
        self.breakdown.mode()
    }
}
