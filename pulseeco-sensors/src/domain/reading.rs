//! A single measured sample.

use chrono::{DateTime, Utc};

use super::DataValueType;

/// One raw sample returned by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub data_type: DataValueType,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    /// Create a new reading.
    pub fn new(data_type: DataValueType, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            data_type,
            value,
            timestamp,
        }
    }
}

/// The most recent reading of a batch.
///
/// The API returns samples in chronological order, so this is simply the
/// last element. The batch is not re-sorted.
pub fn latest(readings: &[Reading]) -> Option<&Reading> {
    readings.last()
}
