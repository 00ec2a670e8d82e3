//! Parsing export timestamps and rendering them as ISO-8601.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Timestamp layout used by every date column of an export.
pub const EXPORT_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Zone used when no timezone name is given.
pub const DEFAULT_TIMEZONE: &str = "UTC";

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Resolve a timezone name. An empty name means UTC.
pub fn lookup_timezone(name: &str) -> Result<Tz> {
    let name = name.trim();
    let name = if name.is_empty() { DEFAULT_TIMEZONE } else { name };
    name.parse::<Tz>()
        .map_err(|_| Error::UnknownTimezone(name.to_string()))
}

/// Parse a `M/D/Y H:MM` value from `field` and place it in `zone`.
///
/// The zone's own rules decide the offset. A wall-clock time that happens
/// twice (DST fall-back) maps to the earlier instant; one that never
/// happens (DST spring-forward) is rejected.
pub fn parse_local(field: &str, value: &str, zone: Tz) -> Result<DateTime<Tz>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), EXPORT_FORMAT)
        .map_err(|e| Error::parse(field, value, e.to_string()))?;

    zone.from_local_datetime(&naive).earliest().ok_or_else(|| {
        Error::parse(
            field,
            value,
            format!("local time does not exist in {}", zone.name()),
        )
    })
}

pub fn to_iso8601(timestamp: &DateTime<Tz>) -> String {
    timestamp.format(ISO_FORMAT).to_string()
}
