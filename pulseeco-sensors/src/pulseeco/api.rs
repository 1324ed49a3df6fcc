//! The read-only contract this crate consumes from the Pulse.eco API.

use std::future::Future;

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::{DataValueType, Reading, Station, StationId};

use super::error::PulseEcoError;

/// Read-only Pulse.eco queries.
///
/// Implemented by the HTTP [`PulseEcoClient`](super::PulseEcoClient) and by
/// [`MockPulseEcoClient`](super::MockPulseEcoClient) for tests and offline
/// runs. Implementations must be safe to share between sensors.
pub trait PulseEcoApi: Send + Sync {
    /// All stations known for the configured city.
    fn sensors(&self) -> impl Future<Output = Result<Vec<Station>, PulseEcoError>> + Send;

    /// Raw samples matching `query`, oldest first.
    fn data_raw(
        &self,
        query: &DataRawQuery,
    ) -> impl Future<Output = Result<Vec<Reading>, PulseEcoError>> + Send;
}

/// Parameters of a `dataRaw` request.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRawQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub station_id: Option<StationId>,
    pub data_type: Option<DataValueType>,
}

impl DataRawQuery {
    /// Query every station and type between `from` and `to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            station_id: None,
            data_type: None,
        }
    }

    /// Query the trailing `window` ending at `to`.
    pub fn trailing(window: TimeDelta, to: DateTime<Utc>) -> Self {
        Self::new(to - window, to)
    }

    /// Restrict to one station.
    pub fn with_station(mut self, station_id: StationId) -> Self {
        self.station_id = Some(station_id);
        self
    }

    /// Restrict to one data type.
    pub fn with_type(mut self, data_type: DataValueType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Whether a sample from `station_id` falls inside this query.
    pub fn matches(&self, station_id: &StationId, reading: &Reading) -> bool {
        self.station_id.as_ref().is_none_or(|s| s == station_id)
            && self.data_type.as_ref().is_none_or(|t| *t == reading.data_type)
            && reading.timestamp >= self.from
            && reading.timestamp <= self.to
    }

    /// URL query parameters in the format the API expects.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("from", format_instant(&self.from)),
            ("to", format_instant(&self.to)),
        ];
        if let Some(station_id) = &self.station_id {
            params.push(("sensorId", station_id.as_str().to_string()));
        }
        if let Some(data_type) = &self.data_type {
            params.push(("type", data_type.as_str().to_string()));
        }
        params
    }
}

/// `YYYY-MM-DDTHH:MM:SS+00:00`; the API rejects fractional seconds and `Z`.
fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap()
    }

    #[test]
    fn query_params_full() {
        let query = DataRawQuery::new(at(8, 0), at(10, 0))
            .with_station(StationId::parse("1000").unwrap())
            .with_type(DataValueType::Pm25);

        assert_eq!(
            query.query_params(),
            vec![
                ("from", "2024-03-15T08:00:00+00:00".to_string()),
                ("to", "2024-03-15T10:00:00+00:00".to_string()),
                ("sensorId", "1000".to_string()),
                ("type", "pm25".to_string()),
            ]
        );
    }

    #[test]
    fn trailing_window() {
        let query = DataRawQuery::trailing(TimeDelta::hours(2), at(10, 0));
        assert_eq!(query.from, at(8, 0));
        assert_eq!(query.to, at(10, 0));
        assert_eq!(query.query_params().len(), 2);
    }

    #[test]
    fn matches_filters() {
        let a = StationId::parse("A").unwrap();
        let b = StationId::parse("B").unwrap();
        let query = DataRawQuery::new(at(8, 0), at(10, 0))
            .with_station(a.clone())
            .with_type(DataValueType::Pm10);

        let inside = Reading::new(DataValueType::Pm10, 1.0, at(9, 0));
        let wrong_type = Reading::new(DataValueType::Humidity, 1.0, at(9, 0));
        let too_old = Reading::new(DataValueType::Pm10, 1.0, at(7, 59));

        assert!(query.matches(&a, &inside));
        assert!(!query.matches(&b, &inside));
        assert!(!query.matches(&a, &wrong_type));
        assert!(!query.matches(&a, &too_old));
    }
}
