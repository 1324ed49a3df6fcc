//! Pulse.eco air-quality sensors for a home-automation host.
//!
//! Lets an operator pick measuring stations of a pulse.eco city, creates
//! one sensor per data type each station reports, and keeps those sensors
//! up to date by polling the public REST API.

pub mod directory;
pub mod domain;
pub mod entry;
pub mod flow;
pub mod lifecycle;
pub mod pulseeco;
pub mod reconcile;
pub mod registry;
pub mod sensor;
