use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::DecodeError;
use crate::record::{StoredNotification, WireNotification};
use crate::timefmt;

/// Field injected into every inbound payload before decoding.
pub const RECEIVED_FIELD: &str = "timestampReceived";

/// Decodes a single inbound payload, stamping it with the receipt instant.
///
/// The payload is parsed to a generic value first so the receipt timestamp
/// can be set structurally; a sender-supplied `timestampReceived` is
/// overwritten, the client clock is authoritative for that field.
pub fn decode_notification(
    json: &str,
    received_at: DateTime<Utc>,
) -> Result<StoredNotification, DecodeError> {
    let mut value: Value = serde_json::from_str(json)?;
    let object = value.as_object_mut().ok_or(DecodeError::NotAnObject)?;
    object.insert(
        RECEIVED_FIELD.to_string(),
        Value::String(timefmt::format_wire(&received_at)),
    );
    Ok(serde_json::from_value(value)?)
}

/// Decodes a persisted notification list.
///
/// Unreadable input yields an empty list instead of an error, so a
/// corrupted blob costs the stored notifications but never the startup.
pub fn decode_stored_list(json: &str) -> Vec<StoredNotification> {
    match serde_json::from_str(json) {
        Ok(list) => list,
        Err(err) => {
            warn!(%err, "discarding unreadable notification list");
            Vec::new()
        }
    }
}

/// Serializes the full collection for the preference store.
pub fn encode_stored_list(list: &[StoredNotification]) -> Result<String, DecodeError> {
    Ok(serde_json::to_string_pretty(list)?)
}

/// The push wrapper a server sends around a wire notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEnvelope {
    pub aps: PushAlert,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushAlert {
    pub alert: String,
    /// Legacy envelopes carried a server-chosen badge number; current
    /// senders leave badge accounting to the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
    pub sound: String,
    #[serde(rename = "bisqNotification")]
    pub notification: WireNotification,
}

/// Canonical sample of the outbound envelope, useful for exercising the
/// decode path and for documenting the wire format.
pub fn example_push_payload(now: DateTime<Utc>) -> Result<String, DecodeError> {
    let envelope = PushEnvelope {
        aps: PushAlert {
            alert: "Notification from your node".to_string(),
            badge: None,
            sound: "default".to_string(),
            notification: WireNotification {
                version: 1,
                event: now,
                message: None,
            },
        },
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}
