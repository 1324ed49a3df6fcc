//! Station directory: which stations of a city can be selected.

use crate::domain::{Station, StationSummary};
use crate::pulseeco::{PulseEcoApi, PulseEcoError};

/// Fetch the directory and keep only usable stations, in upstream order.
///
/// Upstream failures are returned to the caller unchanged.
pub async fn list_active_stations<A: PulseEcoApi>(
    api: &A,
) -> Result<Vec<StationSummary>, PulseEcoError> {
    let stations = api.sensors().await?;
    Ok(active_stations(&stations))
}

/// Filter and project a fetched directory.
pub fn active_stations(stations: &[Station]) -> Vec<StationSummary> {
    stations
        .iter()
        .filter(|s| s.status.is_active())
        .map(Station::summary)
        .collect()
}
