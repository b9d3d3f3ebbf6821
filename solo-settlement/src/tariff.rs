use solo_quantities::KilowattHourRate;

use crate::{error::ValidationError, field::Field};

/// Tariff applied when a property is registered without one.
pub const DEFAULT_PROPERTY_TARIFF: KilowattHourRate = KilowattHourRate(0.75);

/// Parse a tariff typed with either `.` or `,` as the decimal separator.
pub fn parse_tariff(raw: &str) -> Result<KilowattHourRate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(Field::Tariff));
    }
    let tariff = raw
        .replace(',', ".")
        .parse::<KilowattHourRate>()
        .map_err(|_| ValidationError::UnparseableNumber(Field::Tariff))?;
    if !tariff.is_finite() {
        return Err(ValidationError::UnparseableNumber(Field::Tariff));
    }
    if tariff <= KilowattHourRate::ZERO {
        return Err(ValidationError::NonPositiveTariff);
    }
    Ok(tariff)
}

/// Pick the stay's own tariff, falling back to the property's.
pub fn resolve_tariff(
    stay: Option<KilowattHourRate>,
    property: Option<KilowattHourRate>,
) -> Result<KilowattHourRate, ValidationError> {
    stay.or(property).ok_or(ValidationError::MissingField(Field::Tariff))
}
