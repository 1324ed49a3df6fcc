//! Station selection flows.
//!
//! Setup asks for a city (and optional credentials), fetches the station
//! directory and lets the operator pick stations. Reconfiguration repeats
//! the pick against a fresh directory and reconciles the registry.
//! Forms are described as values; rendering them is the host's job.

mod form;
mod options;
mod setup;

pub use form::{FlowStep, FormError, StationForm, StepId};
pub use options::OptionsFlow;
pub use setup::SetupFlow;
