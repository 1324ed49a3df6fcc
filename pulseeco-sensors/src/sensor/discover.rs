//! Discovering which sensors a station needs.
//!
//! A station gets one sensor per data type it reported in the discovery
//! window. Types a station never reported get no sensor at all.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{error, info};

use crate::domain::{DataValueType, EntityId, Reading, Selection};
use crate::entry::EntryContext;
use crate::pulseeco::{DataRawQuery, PulseEcoApi};

use super::config::PollConfig;
use super::entity::PulseEcoSensor;

/// Distinct data types in a batch of samples, in type order.
pub fn observed_types(readings: &[Reading]) -> BTreeSet<DataValueType> {
    readings.iter().map(|r| r.data_type.clone()).collect()
}

/// Create sensors for every station of the entry's selection.
pub async fn discover_sensors<A: PulseEcoApi>(
    ctx: &EntryContext<A>,
    config: &PollConfig,
    now: DateTime<Utc>,
) -> Vec<PulseEcoSensor<A>> {
    discover_stations(ctx, &ctx.selection, config, now).await
}

/// Create sensors for the given stations.
///
/// Stations are queried concurrently. A station whose request fails is
/// logged and gets no sensors; the others are unaffected.
pub async fn discover_stations<A: PulseEcoApi>(
    ctx: &EntryContext<A>,
    stations: &Selection,
    config: &PollConfig,
    now: DateTime<Utc>,
) -> Vec<PulseEcoSensor<A>> {
    let fetches = stations.iter().map(|(station_id, description)| async move {
        let query = DataRawQuery::trailing(config.discovery_window(), now)
            .with_station(station_id.clone());

        match ctx.api.data_raw(&query).await {
            Ok(readings) => Some((station_id, description, observed_types(&readings))),
            Err(e) => {
                error!(
                    station_id = %station_id,
                    error = %e,
                    "failed to fetch raw data for station"
                );
                None
            }
        }
    });

    let mut sensors = Vec::new();
    for (station_id, description, types) in join_all(fetches).await.into_iter().flatten() {
        info!(
            station_id = %station_id,
            types = types.len(),
            "discovered station data types"
        );
        for data_type in types {
            sensors.push(PulseEcoSensor::new(
                ctx.api.clone(),
                EntityId::new(ctx.entry_id.clone(), station_id.clone(), data_type),
                description,
                ctx.city.clone(),
                config.refresh_window(),
            ));
        }
    }

    sensors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryId, Station, StationId, StationStatus};
    use crate::pulseeco::MockPulseEcoClient;
    use chrono::{TimeDelta, TimeZone};
    use std::sync::Arc;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn context(api: MockPulseEcoClient, stations: &[(&str, &str)]) -> EntryContext<MockPulseEcoClient> {
        let selection = stations
            .iter()
            .map(|(s, d)| (id(s), d.to_string()))
            .collect();
        EntryContext {
            entry_id: EntryId::new("e1"),
            city: "skopje".into(),
            api: Arc::new(api),
            selection,
        }
    }

    fn api() -> MockPulseEcoClient {
        let t = |hours_ago| now() - TimeDelta::hours(hours_ago);
        MockPulseEcoClient::with_data(
            vec![
                Station::new(id("A"), "Center", StationStatus::Active),
                Station::new(id("B"), "Port", StationStatus::Active),
                Station::new(id("C"), "Airport", StationStatus::Active),
            ],
            [
                (
                    id("A"),
                    vec![
                        Reading::new(DataValueType::Pm10, 1.0, t(20)),
                        Reading::new(DataValueType::Pm25, 2.0, t(10)),
                        Reading::new(DataValueType::Pm10, 3.0, t(1)),
                        // Outside the 24h window.
                        Reading::new(DataValueType::Noise, 4.0, t(30)),
                    ],
                ),
                (id("B"), vec![Reading::new(DataValueType::Humidity, 50.0, t(2))]),
            ],
        )
    }

    #[test]
    fn observed_types_are_distinct() {
        let readings = vec![
            Reading::new(DataValueType::Pm10, 1.0, now()),
            Reading::new(DataValueType::Pm10, 2.0, now()),
            Reading::new(DataValueType::O3, 3.0, now()),
        ];
        let types = observed_types(&readings);
        assert_eq!(
            types.into_iter().collect::<Vec<_>>(),
            vec![DataValueType::Pm10, DataValueType::O3]
        );
    }

    #[tokio::test]
    async fn one_sensor_per_observed_type() {
        let ctx = context(api(), &[("A", "Center"), ("B", "Port")]);
        let sensors = discover_sensors(&ctx, &PollConfig::default(), now()).await;

        let ids: Vec<String> = sensors.iter().map(|s| s.unique_id()).collect();
        assert_eq!(
            ids,
            vec!["pulseeco_e1_A_pm10", "pulseeco_e1_A_pm25", "pulseeco_e1_B_humidity"]
        );
        assert!(sensors.iter().all(|s| s.state().is_none()));
        assert_eq!(sensors[2].station_description(), "Port");
    }

    #[tokio::test]
    async fn station_without_data_gets_no_sensors() {
        let ctx = context(api(), &[("C", "Airport")]);
        let sensors = discover_sensors(&ctx, &PollConfig::default(), now()).await;
        assert!(sensors.is_empty());
    }

    #[tokio::test]
    async fn failing_station_is_skipped() {
        let api = api();
        api.set_station_failing(id("A"), true).await;
        let ctx = context(api, &[("A", "Center"), ("B", "Port")]);

        let sensors = discover_sensors(&ctx, &PollConfig::default(), now()).await;
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].station_id(), &id("B"));
        assert_eq!(ctx.api.data_raw_calls(), 2);
    }

    #[tokio::test]
    async fn subset_discovery() {
        let ctx = context(api(), &[("A", "Center"), ("B", "Port")]);
        let only_b: Selection = [(id("B"), "Port".to_string())].into_iter().collect();

        let sensors = discover_stations(&ctx, &only_b, &PollConfig::default(), now()).await;
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].data_type(), &DataValueType::Humidity);
    }
}
