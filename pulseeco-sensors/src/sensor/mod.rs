//! Reading poller: sensor discovery and per-sensor refresh.
//!
//! After a station selection is made, each selected station is scanned
//! once over a trailing day to learn which data types it reports, and one
//! sensor is created per type. The host then refreshes every sensor on a
//! fixed interval; each refresh takes the newest sample of a short
//! trailing window.

mod config;
mod discover;
mod entity;

pub use config::PollConfig;
pub use discover::{discover_sensors, discover_stations, observed_types};
pub use entity::{PulseEcoSensor, RefreshOutcome};
