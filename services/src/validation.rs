//! Input guards shared by every service.

use chrono::{DateTime, NaiveDate, Utc};
use util::object_id;

use crate::error::{ServiceError, ServiceResult};

/// Rejects `value` unless it is a well-formed object id.
///
/// `name` is the field name used in the message, e.g. `Invalid course_id.`
pub fn ensure_id(value: &str, name: &str) -> ServiceResult<()> {
    if object_id::is_valid(value) {
        Ok(())
    } else {
        Err(ServiceError::BadRequest(format!("Invalid {name}.")))
    }
}

/// Trimmed, non-empty text or a 400 naming the field.
pub fn required(value: Option<&str>, name: &str) -> ServiceResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ServiceError::BadRequest(format!("{name} is required."))),
    }
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(value: &str, name: &str) -> ServiceResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ServiceError::BadRequest(format!("Invalid {name}.")))
}
