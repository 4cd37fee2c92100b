use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timefmt;

/// The notification payload subset defined by the server.
///
/// `message` only appears in legacy payloads; current senders put the
/// human-readable text in the surrounding push alert instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireNotification {
    pub version: u32,
    #[serde(rename = "timestampEvent", with = "timefmt::wire")]
    pub event: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PartialEq for WireNotification {
    /// Event timestamps compare at minute granularity.
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.message == other.message
            && timefmt::truncate_to_minute(self.event) == timefmt::truncate_to_minute(other.event)
    }
}

impl Eq for WireNotification {}

/// A wire notification plus the client-only fields layered on at receipt.
/// Neither `timestampReceived` nor `read` ever travels back to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredNotification {
    #[serde(flatten)]
    pub wire: WireNotification,
    #[serde(rename = "timestampReceived", with = "timefmt::wire")]
    pub received: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl StoredNotification {
    pub fn new(wire: WireNotification, received: DateTime<Utc>) -> Self {
        Self {
            wire,
            received,
            read: false,
        }
    }
}

impl PartialEq for StoredNotification {
    /// Client-only fields do not participate in comparisons.
    fn eq(&self, other: &Self) -> bool {
        self.wire == other.wire
    }
}

impl Eq for StoredNotification {}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn wire(version: u32, text: &str) -> WireNotification {
        WireNotification {
            version,
            event: timefmt::parse_wire(text).unwrap(),
            message: None,
        }
    }

    #[test]
    fn events_within_the_same_minute_compare_equal() {
        let a = wire(1, "2024-01-01 10:00:30");
        let b = wire(1, "2024-01-01 10:00:59");
        let c = wire(1, "2024-01-01 10:01:00");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn version_and_message_must_match_exactly() {
        let base = wire(1, "2024-01-01 10:00:30");
        let other_version = wire(2, "2024-01-01 10:00:30");
        assert_ne!(base, other_version);

        let mut with_message = wire(1, "2024-01-01 10:00:30");
        with_message.message = Some("trade confirmed".to_string());
        assert_ne!(base, with_message);
    }

    #[test]
    fn stored_comparison_ignores_client_fields() {
        let received_early = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let received_late = Utc.with_ymd_and_hms(2024, 1, 2, 8, 30, 0).unwrap();
        let a = StoredNotification::new(wire(1, "2024-01-01 10:00:30"), received_early);
        let mut b = StoredNotification::new(wire(1, "2024-01-01 10:00:30"), received_late);
        b.read = true;
        assert_eq!(a, b);
    }

    #[test]
    fn fresh_records_start_unread() {
        let received = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let stored = StoredNotification::new(wire(1, "2024-01-01 10:00:30"), received);
        assert!(!stored.read);
    }
}
