use thiserror::Error;

use crate::{field::Field, reading::Metric};

/// User-correctable problem with a settlement submission.
///
/// Every kind renders as a single message meant to be shown to the host as is.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("all required fields must be filled")]
    MissingField(Field),

    #[error("{0} is not a valid number")]
    UnparseableNumber(Field),

    #[error("{0} is not a valid date")]
    InvalidDate(Field),

    #[error("{0} must not be negative")]
    NegativeReading(Field),

    #[error("tariff must be greater than zero")]
    NonPositiveTariff,

    #[error("exit date must be after entry date")]
    InvalidDateRange,

    #[error("exit reading must exceed entry reading")]
    NegativeDelta(Metric),

    #[error("generation must exceed grid injection")]
    NegativeSelfConsumption,

    #[error("guest phone is not registered")]
    MissingPhone,
}
