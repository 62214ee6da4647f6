//! Wire payload types for the Skoda Connect API
//!
//! Typed shapes for the two responses the connector consumes: the garage
//! listing and the per-vehicle status. Decoding is tolerant where the API
//! is known to evolve: capability status codes fall back to `Unknown` and
//! timestamps accept the offset spellings seen in the wild.

use crate::error::{EnyaqError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of the garage listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarageResponse {
    #[serde(default)]
    pub vehicles: Vec<GarageVehicle>,
}

/// One vehicle entry in the garage listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarageVehicle {
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<WireCapability>,
}

/// Capability entry as delivered on the wire; statuses are raw integer
/// codes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCapability {
    pub id: String,
    #[serde(default)]
    pub statuses: Vec<u32>,
    pub enabled: Option<bool>,
}

/// Response of the vehicle status endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatusResponse {
    pub remote: Option<RemoteStatus>,
}

/// Remotely captured vehicle status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStatus {
    pub captured_at: Option<String>,
    pub mileage_in_km: Option<f64>,
}

/// Parse an API timestamp.
///
/// Accepts RFC 3339, offsets written without a colon (`+0200`) and naive
/// timestamps, which are taken as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Offset without a colon, e.g. 2024-05-01T10:00:00+0200
    if value.is_ascii() && value.len() > 5 {
        let (head, tail) = value.split_at(value.len() - 5);
        if (tail.starts_with('+') || tail.starts_with('-'))
            && tail[1..].chars().all(|c| c.is_ascii_digit())
        {
            let fixed = format!("{}{}:{}", head, &tail[..3], &tail[3..]);
            if let Ok(dt) = DateTime::parse_from_rfc3339(&fixed) {
                return Ok(dt.with_timezone(&Utc));
            }
        }
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(EnyaqError::validation(
        "timestamp".to_string(),
        format!("unparseable timestamp: {value}"),
    ))
}
