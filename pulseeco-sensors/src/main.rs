use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pulseeco_sensors::domain::EntryId;
use pulseeco_sensors::entry::{ConnectionParams, EntryContext};
use pulseeco_sensors::flow::{FlowStep, SetupFlow};
use pulseeco_sensors::lifecycle::{refresh_all, setup_entry};
use pulseeco_sensors::pulseeco::{
    MockPulseEcoClient, PulseEcoApi, PulseEcoClient, PulseEcoConfig, PulseEcoError,
};
use pulseeco_sensors::registry::InMemoryRegistry;
use pulseeco_sensors::sensor::{PollConfig, PulseEcoSensor};

#[derive(Debug, Error)]
enum AppError {
    #[error("PULSEECO_CITY is not set")]
    MissingCity,

    #[error("could not fetch the station directory for {0}")]
    Connection(String),

    #[error("none of the requested stations are active: {0:?}")]
    NoStations(Vec<String>),

    #[error(transparent)]
    PulseEco(#[from] PulseEcoError),
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = start().await {
        error!(error = %e, "pulseeco-poll failed");
        std::process::exit(1);
    }
}

async fn start() -> Result<(), AppError> {
    let city = env_opt("PULSEECO_CITY").ok_or(AppError::MissingCity)?;
    let mut params = ConnectionParams::new(city);
    if let Some(username) = env_opt("PULSEECO_USERNAME") {
        params = params.with_username(username);
    }
    if let Some(password) = env_opt("PULSEECO_PASSWORD") {
        params = params.with_password(password);
    }

    let stations: Option<Vec<String>> = env_opt("PULSEECO_STATIONS").map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from)
            .collect()
    });

    match env_opt("PULSEECO_MOCK_DIR") {
        Some(dir) => {
            info!(dir = %dir, "serving from mock data");
            let mock = MockPulseEcoClient::from_dir(&dir)?;
            run(params, stations, move |_: &ConnectionParams| {
                Ok::<_, PulseEcoError>(mock.clone())
            })
            .await
        }
        None => {
            run(params, stations, |p: &ConnectionParams| {
                PulseEcoClient::new(PulseEcoConfig::from_params(p))
            })
            .await
        }
    }
}

/// Run setup for one entry, then poll its sensors forever.
async fn run<F, A>(
    params: ConnectionParams,
    stations: Option<Vec<String>>,
    connect: F,
) -> Result<(), AppError>
where
    F: Fn(&ConnectionParams) -> Result<A, PulseEcoError>,
    A: PulseEcoApi,
{
    let city = params.city.clone();
    let mut flow = SetupFlow::new(EntryId::new(format!("{city}-poll")), &connect);

    let FlowStep::ShowStationForm(form) = flow.submit_connection(params).await else {
        return Err(AppError::Connection(city));
    };

    let chosen = stations.unwrap_or(form.options);
    let FlowStep::CreateEntry(entry) = flow.submit_selection(&chosen) else {
        return Err(AppError::NoStations(chosen));
    };
    info!(title = %entry.title, "entry created");

    let api = Arc::new(connect(&entry.data.connection)?);
    let ctx = EntryContext::new(&entry, api);
    let config = PollConfig::default();
    let mut registry = InMemoryRegistry::new();

    let added = setup_entry(&ctx, &config, &mut registry, Utc::now()).await;
    info!(sensors = added, "sensors registered");
    log_values(&registry);

    let mut interval = tokio::time::interval(config.scan_interval());
    interval.tick().await; // First tick is immediate, skip it
    loop {
        interval.tick().await;
        let summary = refresh_all(registry.entities_mut(), Utc::now()).await;
        info!(
            updated = summary.updated,
            no_data = summary.no_data,
            failed = summary.failed,
            "refreshed sensors"
        );
        log_values(&registry);
    }
}

fn log_values<A>(registry: &InMemoryRegistry<PulseEcoSensor<A>>) {
    for sensor in registry.entities() {
        match sensor.state() {
            Some(value) => info!(
                sensor = %sensor.name(),
                value,
                last_update = ?sensor.last_update(),
                "sensor value"
            ),
            None => info!(sensor = %sensor.name(), "sensor has no value yet"),
        }
    }
}
