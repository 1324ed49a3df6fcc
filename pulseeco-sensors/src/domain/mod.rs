//! Domain types for the Pulse.eco integration.
//!
//! This module contains the validated values the rest of the crate passes
//! around: stations and their status, measurement types, readings, the
//! operator's station selection and structured entity identifiers.

mod data_type;
mod entity_id;
mod reading;
mod selection;
mod station;

pub use data_type::{DataValueType, DeviceClass, StateClass};
pub use entity_id::{DOMAIN, EntityId, EntryId};
pub use reading::{Reading, latest};
pub use selection::Selection;
pub use station::{InvalidStationId, Station, StationId, StationStatus, StationSummary};
