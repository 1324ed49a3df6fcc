//! Pulse.eco API response DTOs.
//!
//! These types map directly to the JSON returned by the REST endpoints.
//! Optional fields are `Option` because the API omits them for some
//! stations rather than sending null.

use serde::{Deserialize, Serialize};

use crate::domain::StationStatus;

/// One entry of `GET /rest/sensor`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDto {
    /// Opaque station identifier.
    pub sensor_id: String,

    /// Human-readable station name chosen by its owner.
    pub description: String,

    /// Activity state.
    pub status: StationStatus,

    /// `"lat,lng"` of the station.
    pub position: Option<String>,

    /// Free-form owner comments.
    pub comments: Option<String>,

    /// Hardware type code (e.g. `"1"` for SkopjePulse boards).
    #[serde(rename = "type")]
    pub hardware_type: Option<String>,
}

/// One sample of `GET /rest/dataRaw`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRawDto {
    /// Station that produced the sample.
    pub sensor_id: String,

    /// RFC 3339 timestamp with offset, e.g. `2024-03-15T10:00:00+01:00`.
    pub stamp: String,

    /// Data value type string (`"pm10"`, `"temperature"`, ...).
    #[serde(rename = "type")]
    pub data_type: String,

    /// Station position at sampling time.
    pub position: Option<String>,

    /// Measured value. The API sends it as a string.
    pub value: RawValue,
}

/// Sample value as found on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}
