//! One sensor entity: the latest value of one data type at one station.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, error};

use crate::domain::{DataValueType, DeviceClass, EntityId, StateClass, StationId, latest};
use crate::pulseeco::{DataRawQuery, PulseEcoApi};
use crate::registry::Entity;

/// What a refresh did to the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new value was taken from the latest sample.
    Updated,
    /// The window held no samples; previous state kept.
    NoData,
    /// The request failed and was logged; previous state kept.
    Failed,
}

/// A Pulse.eco sensor entity.
///
/// Owns its current value exclusively; the API handle is shared with the
/// other sensors of the same entry.
#[derive(Debug)]
pub struct PulseEcoSensor<A> {
    api: Arc<A>,
    id: EntityId,
    station_description: String,
    city: String,
    refresh_window: TimeDelta,
    state: Option<f64>,
    last_update: Option<DateTime<Utc>>,
    last_fetch: Option<DateTime<Utc>>,
}

impl<A: PulseEcoApi> PulseEcoSensor<A> {
    /// Create a sensor with no value yet.
    pub fn new(
        api: Arc<A>,
        id: EntityId,
        station_description: impl Into<String>,
        city: impl Into<String>,
        refresh_window: TimeDelta,
    ) -> Self {
        Self {
            api,
            id,
            station_description: station_description.into(),
            city: city.into(),
            refresh_window,
            state: None,
            last_update: None,
            last_fetch: None,
        }
    }

    /// Refresh from the API using the current time.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        self.refresh_at(Utc::now()).await
    }

    /// Refresh from the trailing window ending at `now`.
    ///
    /// Takes the last sample of the window as the current value. Failures
    /// are logged and leave every field unchanged.
    pub async fn refresh_at(&mut self, now: DateTime<Utc>) -> RefreshOutcome {
        let query = DataRawQuery::trailing(self.refresh_window, now)
            .with_station(self.id.station_id.clone())
            .with_type(self.id.data_type.clone());

        let readings = match self.api.data_raw(&query).await {
            Ok(readings) => readings,
            Err(e) => {
                error!(
                    station_id = %self.id.station_id,
                    data_type = %self.id.data_type,
                    error = %e,
                    "failed to fetch raw data"
                );
                return RefreshOutcome::Failed;
            }
        };

        let Some(reading) = latest(&readings) else {
            debug!(unique_id = %self.id, "no samples in refresh window");
            return RefreshOutcome::NoData;
        };

        self.state = Some(reading.value);
        self.last_update = Some(reading.timestamp);
        self.last_fetch = Some(now);
        RefreshOutcome::Updated
    }
}

impl<A> PulseEcoSensor<A> {
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// The unique-id string registered with the host.
    pub fn unique_id(&self) -> String {
        self.id.unique_id()
    }

    /// Display name: `{city}_{station description}_{data type}`.
    pub fn name(&self) -> String {
        format!(
            "{}_{}_{}",
            self.city, self.station_description, self.id.data_type
        )
    }

    pub fn station_id(&self) -> &StationId {
        &self.id.station_id
    }

    pub fn station_description(&self) -> &str {
        &self.station_description
    }

    pub fn data_type(&self) -> &DataValueType {
        &self.id.data_type
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Current value, `None` until the first successful refresh.
    pub fn state(&self) -> Option<f64> {
        self.state
    }

    /// Timestamp of the sample behind the current value.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// When the current value was fetched.
    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.last_fetch
    }

    pub fn device_class(&self) -> Option<DeviceClass> {
        self.id.data_type.device_class()
    }

    pub fn state_class(&self) -> StateClass {
        StateClass::Measurement
    }
}

impl<A> Entity for PulseEcoSensor<A> {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
}
