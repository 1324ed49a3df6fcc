//! Pulse.eco REST API client.
//!
//! Pulse.eco is a crowdsourced air-quality network. Each city has its own
//! API under `https://{city}.pulse.eco/rest`. This crate only needs two
//! read-only endpoints:
//!
//! - `sensor`: the station directory, including each station's status
//! - `dataRaw`: raw samples in a time window, optionally filtered by
//!   station and data type, returned oldest first with string values

mod api;
mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use api::{DataRawQuery, PulseEcoApi};
pub use client::{PulseEcoClient, PulseEcoConfig};
pub use convert::ConversionError;
pub use error::PulseEcoError;
pub use mock::{DATA_RAW_FILE, MockPulseEcoClient, SENSORS_FILE};
pub use types::{DataRawDto, RawValue, SensorDto};
