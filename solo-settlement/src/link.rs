//! Messaging deep links, such as `https://wa.me/5511912345678?text=…`.

use std::ops::RangeInclusive;

use crate::error::ValidationError;

pub const DEFAULT_BASE_URL: &str = "https://wa.me";

/// Brazil.
pub const DEFAULT_COUNTRY_PREFIX: &str = "55";

/// Digit counts of a national number with its area code, landline or mobile.
const NATIONAL_LENGTHS: RangeInclusive<usize> = 10..=11;

/// Keep the digits only and prepend the country prefix unless it is already there.
///
/// A national-length number always gets the prefix, even when its area code reads
/// like the prefix, such as `(55) 99123-4567`.
#[must_use]
pub fn normalize_phone(raw: &str, country_prefix: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else if !NATIONAL_LENGTHS.contains(&digits.len()) && digits.starts_with(country_prefix) {
        Some(digits)
    } else {
        Some(format!("{country_prefix}{digits}"))
    }
}

/// Build the link that opens a chat with the guest, the message prefilled.
pub fn messaging_link(
    base_url: &str,
    phone: Option<&str>,
    country_prefix: &str,
    message: &str,
) -> Result<String, ValidationError> {
    let phone = phone
        .and_then(|phone| normalize_phone(phone, country_prefix))
        .ok_or(ValidationError::MissingPhone)?;
    Ok(format!(
        "{}/{phone}?text={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(message)
    ))
}
