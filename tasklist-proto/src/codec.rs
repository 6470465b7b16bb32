//! Serialization of the persisted task collection.
//!
//! The whole collection is stored as one JSON array of task records.
//! Timestamps are written as ISO-8601 strings with millisecond precision
//! and read back from either ISO-8601 strings or epoch milliseconds.

use crate::task::Task;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encodes a task collection into its persisted JSON form.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the collection cannot be serialized.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a task collection from its persisted JSON form.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the text is not a JSON array of
/// task records.
pub fn decode_tasks(text: &str) -> Result<Vec<Task>, CodecError> {
    serde_json::from_str(text).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Serde adapter for `createdAt` fields.
pub mod timestamp {
    use chrono::{DateTime, Datelike, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Millis(i64),
    }

    /// Writes the timestamp as `YYYY-MM-DDTHH:MM:SS.sssZ`.
    ///
    /// RFC 3339 only covers four-digit years, so instants outside years
    /// 1 to 9999 are written as epoch milliseconds instead, which
    /// [`deserialize`] reads back unchanged.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        if (1..=9999).contains(&value.year()) {
            serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
        } else {
            serializer.serialize_i64(value.timestamp_millis())
        }
    }

    /// Reads an ISO-8601 string or a number of milliseconds since the epoch.
    ///
    /// # Errors
    ///
    /// Fails if the text is not a valid RFC 3339 timestamp or the number is
    /// out of range.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|at| at.with_timezone(&Utc))
                .map_err(de::Error::custom),
            RawTimestamp::Millis(millis) => DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {millis}"))),
        }
    }
}
