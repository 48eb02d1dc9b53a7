//! Field checks shared by the input forms. They mirror what a browser
//! enforces for `required`, `type="email"`, `type="date"` and `type="time"`.

use chrono::{NaiveDate, NaiveTime};

use crate::error::FormError;

/// Trimmed value, or `MissingField` when blank.
pub fn require(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Trimmed `local@domain` address.
pub fn email(value: &str) -> Result<String, FormError> {
    let address = require(value, "Email")?;
    let valid = match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !address.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(FormError::InvalidEmail);
    }
    Ok(address)
}

/// Calendar date in `YYYY-MM-DD`.
pub fn date(value: &str) -> Result<String, FormError> {
    let raw = require(value, "Date")?;
    let parsed = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| FormError::InvalidDate(raw.clone()))?;
    Ok(parsed.format("%Y-%m-%d").to_string())
}

/// Wall-clock time in `HH:MM`.
pub fn time(value: &str) -> Result<String, FormError> {
    let raw = require(value, "Time")?;
    let parsed =
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(|_| FormError::InvalidTime(raw.clone()))?;
    Ok(parsed.format("%H:%M").to_string())
}
