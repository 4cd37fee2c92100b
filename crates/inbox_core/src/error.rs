use thiserror::Error;

/// Timestamp text that does not match the `YYYY-MM-DD HH:mm:ss` wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed timestamp `{0}`")]
pub struct MalformedTimestamp(pub String);

/// Failure to turn payload text into a notification record.
///
/// Missing fields and malformed timestamps both surface through the
/// serde layer as [`DecodeError::Json`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed notification payload")]
    Json(#[from] serde_json::Error),
    #[error("notification payload is not a JSON object")]
    NotAnObject,
}

/// A preference-store write that did not take effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("preference store write failed: {0}")]
pub struct PersistenceError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("notification index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
