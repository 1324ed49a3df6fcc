//! Form descriptions returned to the host for rendering.

use std::fmt;

use crate::entry::ConfigEntry;

/// Which form a flow is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    /// Connection parameters (city, optional credentials).
    User,
    /// Station multi-select during setup.
    MeasuringStationSelection,
    /// Station multi-select during reconfiguration.
    Init,
}

impl StepId {
    pub fn as_str(self) -> &'static str {
        match self {
            StepId::User => "user",
            StepId::MeasuringStationSelection => "measuring_station_selection",
            StepId::Init => "init",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form-level error shown above the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// Anything went wrong talking to the API.
    Unknown,
    /// The station multi-select was submitted empty.
    NoStationsSelected,
}

impl FormError {
    /// Translation key for the host UI.
    pub fn key(self) -> &'static str {
        match self {
            FormError::Unknown => "unknown",
            FormError::NoStationsSelected => "no_stations_selected",
        }
    }
}

/// The station multi-select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationForm {
    pub step_id: StepId,
    /// Station descriptions on offer, sorted.
    pub options: Vec<String>,
    /// Descriptions pre-selected when the form opens.
    pub defaults: Vec<String>,
    pub error: Option<FormError>,
}

impl StationForm {
    /// Build a form offering `descriptions`, sorted and without repeats.
    pub fn new(step_id: StepId, descriptions: impl IntoIterator<Item = String>) -> Self {
        let mut options: Vec<String> = descriptions.into_iter().collect();
        options.sort();
        options.dedup();
        Self {
            step_id,
            options,
            defaults: Vec::new(),
            error: None,
        }
    }

    pub fn with_defaults(mut self, defaults: Vec<String>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_error(mut self, error: FormError) -> Self {
        self.error = Some(error);
        self
    }
}

/// What the host should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowStep {
    /// Show (or re-show) the connection form.
    ShowConnectionForm { error: Option<FormError> },
    /// Show the station multi-select.
    ShowStationForm(StationForm),
    /// Persist this entry; the flow is finished.
    CreateEntry(ConfigEntry),
}
