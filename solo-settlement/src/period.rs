use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, field::Field};

/// Calendar dates of a guest stay, the check-out being unknown while the stay is open.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayPeriod {
    pub check_in: NaiveDate,
    pub check_out: Option<NaiveDate>,
}

impl StayPeriod {
    pub const fn closed(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self { check_in, check_out: Some(check_out) }
    }

    /// Close the period and count the nights between the dates.
    ///
    /// Same-day and reversed stays are rejected.
    pub fn try_close(self) -> Result<(NaiveDate, i64), ValidationError> {
        let check_out = self.check_out.ok_or(ValidationError::MissingField(Field::CheckOut))?;
        let n_days = check_out.signed_duration_since(self.check_in).num_days();
        if n_days <= 0 {
            return Err(ValidationError::InvalidDateRange);
        }
        Ok((check_out, n_days))
    }
}

/// Parse an ISO `yyyy-mm-dd` calendar date.
pub fn parse_date(raw: &str, field: Field) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(field))
}
