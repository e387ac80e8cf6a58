use super::transport::RawResponse;
use crate::models::{Speaker, Speech, User};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Normalized response returned by every client operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// HTTP status code reported by the transport
    pub status: u16,

    /// Parsed JSON body, an explicit override, or `{}`
    pub data: Value,
}

impl Envelope {
    /// Build an envelope from a raw response.
    ///
    /// An override replaces the body entirely. Otherwise the body is parsed as
    /// JSON; an empty or unparseable body, or a bare scalar such as `null`,
    /// yields an empty object.
    pub fn from_response(response: &RawResponse, data: Option<Value>) -> Self {
        let data = match data {
            Some(data) => data,
            None => match serde_json::from_slice(&response.body) {
                Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
                _ => Value::Object(Map::new()),
            },
        };

        Self {
            status: response.status,
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize one top-level field of `data`, if present and well-formed
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.data.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// The `speech` record of a speech-detail response
    pub fn speech(&self) -> Option<Speech> {
        self.field("speech")
    }

    /// Deserialize each element of a top-level array field.
    ///
    /// Elements that do not match `T` are skipped, so one odd record does not
    /// hide the rest. Empty when the field is absent or not an array.
    pub fn list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(items) = self.data.get(key).and_then(Value::as_array) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match serde_json::from_value(item.clone()) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!("Skipping malformed {} record: {}", key, e);
                    None
                }
            })
            .collect()
    }

    /// The `speeches` list of a speech-listing response
    pub fn speeches(&self) -> Vec<Speech> {
        self.list("speeches")
    }

    /// The `speakers` list of a speaker-listing response
    pub fn speakers(&self) -> Vec<Speaker> {
        self.list("speakers")
    }

    pub fn user(&self) -> Option<User> {
        self.field("user")
    }
}
