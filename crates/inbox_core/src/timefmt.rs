use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::MalformedTimestamp;

/// Wall-clock format shared by the wire payloads and the persisted blob.
/// The format carries no offset; both sides of the protocol treat the
/// text as UTC.
pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_wire(ts: &DateTime<Utc>) -> String {
    ts.format(WIRE_FORMAT).to_string()
}

pub fn parse_wire(text: &str) -> Result<DateTime<Utc>, MalformedTimestamp> {
    NaiveDateTime::parse_from_str(text, WIRE_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| MalformedTimestamp(text.to_string()))
}

/// Drops seconds and sub-second precision. Record comparisons are defined
/// at minute granularity; storage keeps full second precision.
pub fn truncate_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Serde adapter for timestamp fields carried in the wire format.
/// Use with `#[serde(with = "timefmt::wire")]`.
pub mod wire {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wire(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_wire(&text).map_err(serde::de::Error::custom)
    }
}
