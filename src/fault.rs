//! Fault records reported by the manufacturer API
//!
//! The transport layer decodes fault entries from status payloads and
//! attaches them to the affected sub-object (climatization, charging)
//! keyed by fault code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single fault reported for a vehicle subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// Manufacturer fault code, e.g. `CLIMA_TEMP_SENSOR`
    pub code: String,

    /// Human-readable description, when the API provides one
    pub description: Option<String>,

    /// When the fault was observed
    pub observed_at: DateTime<Utc>,
}

impl Fault {
    pub fn new(code: impl Into<String>, description: Option<String>) -> Self {
        Self {
            code: code.into(),
            description,
            observed_at: Utc::now(),
        }
    }
}
