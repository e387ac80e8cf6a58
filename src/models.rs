//! Lenient views over records returned by the service.
//!
//! Only well-known fields are named; everything else is kept in `extra` so
//! nothing the service sends is lost.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A transcript ("speech")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speech {
    /// Unique speech identifier
    pub otid: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Creation time, seconds since the Unix epoch
    #[serde(default)]
    pub created_at: Option<i64>,

    /// Length of the recording in seconds
    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Speech {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at?, 0)
    }
}

/// A participant attributed within speeches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speaker {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub speaker_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
