use bon::Builder;
use solo_quantities::{KilowattHourRate, KilowattHours};
use tracing::{debug, instrument};

use crate::{
    contact::GuestContact,
    error::ValidationError,
    field::{Field, non_blank},
    mode::Mode,
    period::{StayPeriod, parse_date},
    reading::{MeterSnapshot, Readings, parse_reading},
    settlement::Settlement,
    tariff::{parse_tariff, resolve_tariff},
};

/// Raw settlement submission, every value as typed by the host.
///
/// Blank values count as absent.
#[derive(Clone, Debug, Default, Builder)]
pub struct SettlementForm {
    pub check_in: Option<String>,
    pub check_out: Option<String>,

    /// Pinned mode, inferred from the generation monitor readings when absent.
    pub mode: Option<Mode>,

    pub grid_import_entry: Option<String>,
    pub grid_import_exit: Option<String>,
    pub grid_export_entry: Option<String>,
    pub grid_export_exit: Option<String>,
    pub generation_entry: Option<String>,
    pub generation_exit: Option<String>,

    /// Stay tariff, falls back to the property tariff.
    pub tariff: Option<String>,

    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub payment_key: Option<String>,
}

/// Required values, checked for presence before anything is parsed.
struct Required<'a> {
    check_in: &'a str,
    check_out: &'a str,
    grid_import: (&'a str, &'a str),
    grid_export: (&'a str, &'a str),
    generation: Option<(&'a str, &'a str)>,
    tariff: Option<&'a str>,
}

impl SettlementForm {
    /// Validate the submission and settle the stay.
    #[instrument(skip_all)]
    pub fn try_settle(
        &self,
        property_tariff: Option<KilowattHourRate>,
    ) -> Result<(Settlement, GuestContact), ValidationError> {
        let required = self.require(property_tariff.is_some())?;
        let contact = GuestContact::try_new(
            self.guest_name.as_deref(),
            self.guest_phone.as_deref(),
            self.payment_key.as_deref(),
        )?;

        let period = StayPeriod::closed(
            parse_date(required.check_in, Field::CheckIn)?,
            parse_date(required.check_out, Field::CheckOut)?,
        );
        let entry = MeterSnapshot {
            grid_import: parse_reading(required.grid_import.0, Field::GridImportEntry)?,
            grid_export: parse_reading(required.grid_export.0, Field::GridExportEntry)?,
            generation: parse_optional(
                required.generation.map(|(entry, _)| entry),
                Field::GenerationEntry,
            )?,
        };
        let exit = MeterSnapshot {
            grid_import: parse_reading(required.grid_import.1, Field::GridImportExit)?,
            grid_export: parse_reading(required.grid_export.1, Field::GridExportExit)?,
            generation: parse_optional(
                required.generation.map(|(_, exit)| exit),
                Field::GenerationExit,
            )?,
        };
        let readings = Readings::try_pair(entry, exit)?;
        let tariff =
            resolve_tariff(required.tariff.map(parse_tariff).transpose()?, property_tariff)?;
        debug!(mode = %readings.mode(), ?tariff, "validated");

        Ok((Settlement::try_compute(period, &readings, tariff)?, contact))
    }

    fn require(&self, has_property_tariff: bool) -> Result<Required<'_>, ValidationError> {
        let generation = match (
            self.mode,
            non_blank(self.generation_entry.as_deref()),
            non_blank(self.generation_exit.as_deref()),
        ) {
            (Some(Mode::Simple), _, _) | (None, None, None) => None,
            (_, Some(entry), Some(exit)) => Some((entry, exit)),
            (_, None, _) => return Err(ValidationError::MissingField(Field::GenerationEntry)),
            (_, Some(_), None) => return Err(ValidationError::MissingField(Field::GenerationExit)),
        };
        let tariff = non_blank(self.tariff.as_deref());
        if tariff.is_none() && !has_property_tariff {
            return Err(ValidationError::MissingField(Field::Tariff));
        }
        if non_blank(self.guest_name.as_deref()).is_none() {
            return Err(ValidationError::MissingField(Field::GuestName));
        }
        Ok(Required {
            check_in: required(self.check_in.as_ref(), Field::CheckIn)?,
            check_out: required(self.check_out.as_ref(), Field::CheckOut)?,
            grid_import: (
                required(self.grid_import_entry.as_ref(), Field::GridImportEntry)?,
                required(self.grid_import_exit.as_ref(), Field::GridImportExit)?,
            ),
            grid_export: (
                required(self.grid_export_entry.as_ref(), Field::GridExportEntry)?,
                required(self.grid_export_exit.as_ref(), Field::GridExportExit)?,
            ),
            generation,
            tariff,
        })
    }
}

fn required(value: Option<&String>, field: Field) -> Result<&str, ValidationError> {
    non_blank(value.map(String::as_str)).ok_or(ValidationError::MissingField(field))
}

fn parse_optional(
    raw: Option<&str>,
    field: Field,
) -> Result<Option<KilowattHours>, ValidationError> {
    raw.map(|raw| parse_reading(raw, field)).transpose()
}
