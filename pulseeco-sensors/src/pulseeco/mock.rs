//! Mock Pulse.eco client for testing without API access.
//!
//! Serves stations and samples from memory, optionally loaded from a
//! fixture directory, and can simulate upstream outages per station.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::domain::{Reading, Station, StationId};

use super::api::{DataRawQuery, PulseEcoApi};
use super::convert::{convert_data_raw, convert_sensors};
use super::error::PulseEcoError;
use super::types::{DataRawDto, SensorDto};

/// Name of the directory fixture inside a mock data directory.
pub const SENSORS_FILE: &str = "sensors.json";

/// Name of the samples fixture inside a mock data directory.
pub const DATA_RAW_FILE: &str = "data_raw.json";

#[derive(Debug, Default)]
struct MockState {
    stations: Vec<Station>,
    /// Samples per station, oldest first.
    readings: HashMap<StationId, Vec<Reading>>,
    failing_stations: HashSet<StationId>,
    directory_failing: bool,
}

/// Mock client that answers from in-memory data.
///
/// Clones share state, so a test can keep a handle to change data or
/// inject failures while sensors hold another.
#[derive(Debug, Clone, Default)]
pub struct MockPulseEcoClient {
    state: Arc<RwLock<MockState>>,
    sensors_calls: Arc<AtomicUsize>,
    data_raw_calls: Arc<AtomicUsize>,
}

impl MockPulseEcoClient {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock from stations and per-station samples.
    pub fn with_data(
        stations: Vec<Station>,
        readings: impl IntoIterator<Item = (StationId, Vec<Reading>)>,
    ) -> Self {
        let state = MockState {
            stations,
            readings: readings.into_iter().collect(),
            ..MockState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
            ..Self::default()
        }
    }

    /// Load a mock from a directory containing `sensors.json` and,
    /// optionally, `data_raw.json` in the API's own response format.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, PulseEcoError> {
        let data_dir = data_dir.as_ref();

        let sensors: Vec<SensorDto> = read_fixture(&data_dir.join(SENSORS_FILE))?;
        let stations = convert_sensors(&sensors);

        let raw_path = data_dir.join(DATA_RAW_FILE);
        let samples: Vec<DataRawDto> = if raw_path.exists() {
            read_fixture(&raw_path)?
        } else {
            Vec::new()
        };

        let mut readings: HashMap<StationId, Vec<Reading>> = HashMap::new();
        for dto in &samples {
            let Ok(station_id) = StationId::parse(&dto.sensor_id) else {
                continue;
            };
            readings
                .entry(station_id)
                .or_default()
                .extend(convert_data_raw(std::slice::from_ref(dto)));
        }

        Ok(Self::with_data(stations, readings))
    }

    /// Replace the station directory.
    pub async fn set_stations(&self, stations: Vec<Station>) {
        self.state.write().await.stations = stations;
    }

    /// Append a sample for a station.
    pub async fn push_reading(&self, station_id: StationId, reading: Reading) {
        let mut state = self.state.write().await;
        state.readings.entry(station_id).or_default().push(reading);
    }

    /// Make `data_raw` fail (or succeed again) for a station.
    pub async fn set_station_failing(&self, station_id: StationId, failing: bool) {
        let mut state = self.state.write().await;
        if failing {
            state.failing_stations.insert(station_id);
        } else {
            state.failing_stations.remove(&station_id);
        }
    }

    /// Make `sensors` fail (or succeed again).
    pub async fn set_directory_failing(&self, failing: bool) {
        self.state.write().await.directory_failing = failing;
    }

    /// Number of `sensors` calls served so far.
    pub fn sensors_calls(&self) -> usize {
        self.sensors_calls.load(Ordering::SeqCst)
    }

    /// Number of `data_raw` calls served so far.
    pub fn data_raw_calls(&self) -> usize {
        self.data_raw_calls.load(Ordering::SeqCst)
    }
}

impl PulseEcoApi for MockPulseEcoClient {
    async fn sensors(&self) -> Result<Vec<Station>, PulseEcoError> {
        self.sensors_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;

        if state.directory_failing {
            return Err(unavailable("sensor directory"));
        }

        Ok(state.stations.clone())
    }

    async fn data_raw(&self, query: &DataRawQuery) -> Result<Vec<Reading>, PulseEcoError> {
        self.data_raw_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;

        if let Some(station_id) = &query.station_id
            && state.failing_stations.contains(station_id)
        {
            return Err(unavailable(station_id.as_str()));
        }

        // Iterate stations in directory order so unfiltered queries are stable.
        let mut out = Vec::new();
        for station in &state.stations {
            let Some(readings) = state.readings.get(&station.station_id) else {
                continue;
            };
            out.extend(
                readings
                    .iter()
                    .filter(|r| query.matches(&station.station_id, r))
                    .cloned(),
            );
        }

        Ok(out)
    }
}

fn unavailable(what: &str) -> PulseEcoError {
    PulseEcoError::Api {
        status: 503,
        message: format!("mock outage: {what}"),
    }
}

fn read_fixture<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, PulseEcoError> {
    let json = std::fs::read_to_string(path).map_err(|e| PulseEcoError::InvalidConfig(
        format!("failed to read {}: {}", path.display(), e),
    ))?;

    serde_json::from_str(&json).map_err(|e| PulseEcoError::Json {
        message: format!("failed to parse {}: {}", path.display(), e),
        body: None,
    })
}
