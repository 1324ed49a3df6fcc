//! Conversion from Pulse.eco DTOs to domain types.
//!
//! Individual records that fail to convert are logged and skipped so that
//! one malformed sample does not hide a whole station.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{DataValueType, Reading, Station, StationId};

use super::types::{DataRawDto, RawValue, SensorDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Station id was empty or padded
    #[error("invalid station id: {0:?}")]
    InvalidStationId(String),

    /// Sample timestamp was not RFC 3339
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Sample value was not numeric
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Convert one directory entry.
pub fn convert_sensor(dto: &SensorDto) -> Result<Station, ConversionError> {
    let station_id = StationId::parse(&dto.sensor_id)
        .map_err(|_| ConversionError::InvalidStationId(dto.sensor_id.clone()))?;

    Ok(Station::new(station_id, dto.description.clone(), dto.status))
}

/// Convert the directory, skipping invalid entries.
pub fn convert_sensors(dtos: &[SensorDto]) -> Vec<Station> {
    dtos.iter()
        .filter_map(|dto| match convert_sensor(dto) {
            Ok(station) => Some(station),
            Err(e) => {
                warn!(sensor_id = %dto.sensor_id, error = %e, "skipping station");
                None
            }
        })
        .collect()
}

/// Convert one raw sample.
pub fn convert_reading(dto: &DataRawDto) -> Result<Reading, ConversionError> {
    let timestamp = DateTime::parse_from_rfc3339(&dto.stamp)
        .map_err(|_| ConversionError::InvalidTimestamp(dto.stamp.clone()))?
        .with_timezone(&Utc);

    let value = match &dto.value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ConversionError::InvalidValue(s.clone()))?,
    };

    if !value.is_finite() {
        return Err(ConversionError::InvalidValue(value.to_string()));
    }

    Ok(Reading::new(
        DataValueType::from(dto.data_type.as_str()),
        value,
        timestamp,
    ))
}

/// Convert a batch of raw samples, keeping upstream order and skipping
/// invalid entries.
pub fn convert_data_raw(dtos: &[DataRawDto]) -> Vec<Reading> {
    dtos.iter()
        .filter_map(|dto| match convert_reading(dto) {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!(
                    sensor_id = %dto.sensor_id,
                    data_type = %dto.data_type,
                    error = %e,
                    "skipping sample"
                );
                None
            }
        })
        .collect()
}
