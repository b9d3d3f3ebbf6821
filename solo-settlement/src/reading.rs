use serde::{Deserialize, Serialize};
use solo_quantities::KilowattHours;

use crate::{error::ValidationError, field::Field, mode::Mode};

/// Metered quantity read at check-in and check-out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Metric {
    /// Utility register «code 03».
    #[display("grid import (code 03)")]
    GridImport,

    /// Utility register «code 103».
    #[display("grid export (code 103)")]
    GridExport,

    /// Inverter or monitoring portal total generation.
    #[display("generation monitor")]
    Generation,
}

impl Metric {
    pub const fn entry_field(self) -> Field {
        match self {
            Self::GridImport => Field::GridImportEntry,
            Self::GridExport => Field::GridExportEntry,
            Self::Generation => Field::GenerationEntry,
        }
    }

    pub const fn exit_field(self) -> Field {
        match self {
            Self::GridImport => Field::GridImportExit,
            Self::GridExport => Field::GridExportExit,
            Self::Generation => Field::GenerationExit,
        }
    }
}

/// Entry and exit values of a single metric.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    pub entry: KilowattHours,
    pub exit: KilowattHours,
}

impl MeterReading {
    pub const fn new(entry: KilowattHours, exit: KilowattHours) -> Self {
        Self { entry, exit }
    }

    /// Energy that went through the meter during the stay.
    pub fn try_delta(self, metric: Metric) -> Result<KilowattHours, ValidationError> {
        let delta = self.exit - self.entry;
        if delta < KilowattHours::ZERO {
            return Err(ValidationError::NegativeDelta(metric));
        }
        Ok(delta)
    }
}

/// All meter values taken at one moment: check-in or check-out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterSnapshot {
    pub grid_import: KilowattHours,
    pub grid_export: KilowattHours,

    /// Present only when the property has an independent generation monitor.
    pub generation: Option<KilowattHours>,
}

/// Entry and exit readings of every metric the stay was settled with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readings {
    pub grid_import: MeterReading,
    pub grid_export: MeterReading,
    pub generation: Option<MeterReading>,
}

impl Readings {
    /// Pair check-in and check-out snapshots.
    ///
    /// Both snapshots must agree on the presence of the generation monitor,
    /// and every value must be a finite non-negative number.
    pub fn try_pair(entry: MeterSnapshot, exit: MeterSnapshot) -> Result<Self, ValidationError> {
        let generation = match (entry.generation, exit.generation) {
            (Some(entry), Some(exit)) => Some(MeterReading::new(entry, exit)),
            (None, None) => None,
            (None, Some(_)) => return Err(ValidationError::MissingField(Field::GenerationEntry)),
            (Some(_), None) => return Err(ValidationError::MissingField(Field::GenerationExit)),
        };
        let readings = Self {
            grid_import: MeterReading::new(entry.grid_import, exit.grid_import),
            grid_export: MeterReading::new(entry.grid_export, exit.grid_export),
            generation,
        };
        for (metric, reading) in readings.iter() {
            check_value(reading.entry, metric.entry_field())?;
            check_value(reading.exit, metric.exit_field())?;
        }
        Ok(readings)
    }

    pub const fn mode(&self) -> Mode {
        if self.generation.is_some() { Mode::Monitoring } else { Mode::Simple }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, MeterReading)> {
        [(Metric::GridImport, self.grid_import), (Metric::GridExport, self.grid_export)]
            .into_iter()
            .chain(self.generation.map(|reading| (Metric::Generation, reading)))
    }
}

/// Parse a meter value typed by the host.
pub fn parse_reading(raw: &str, field: Field) -> Result<KilowattHours, ValidationError> {
    let value = raw
        .trim()
        .parse::<KilowattHours>()
        .map_err(|_| ValidationError::UnparseableNumber(field))?;
    check_value(value, field)?;
    Ok(value)
}

fn check_value(value: KilowattHours, field: Field) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::UnparseableNumber(field));
    }
    if value < KilowattHours::ZERO {
        return Err(ValidationError::NegativeReading(field));
    }
    Ok(())
}
