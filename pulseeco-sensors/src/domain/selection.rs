//! The operator's chosen subset of stations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{StationId, StationSummary};

/// Mapping from station id to its human-readable description.
///
/// A selection is always replaced wholesale; it is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<StationId, String>);

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from a station directory and the descriptions the
    /// operator chose.
    ///
    /// Every directory station whose description appears in `chosen` is
    /// included. Chosen descriptions that match no station are ignored.
    pub fn from_choices(directory: &[StationSummary], chosen: &[String]) -> Self {
        directory
            .iter()
            .filter(|station| chosen.contains(&station.description))
            .map(|station| (station.station_id.clone(), station.description.clone()))
            .collect()
    }

    /// The subset of this selection whose descriptions are not in `submitted`.
    pub fn deselected(&self, submitted: &[String]) -> Self {
        self.0
            .iter()
            .filter(|(_, description)| !submitted.contains(*description))
            .map(|(id, description)| (id.clone(), description.clone()))
            .collect()
    }

    /// Stations present in `self` but not in `previous`.
    pub fn added_since(&self, previous: &Selection) -> Self {
        self.0
            .iter()
            .filter(|(id, _)| !previous.contains(id))
            .map(|(id, description)| (id.clone(), description.clone()))
            .collect()
    }

    /// Insert a station.
    pub fn insert(&mut self, station_id: StationId, description: impl Into<String>) {
        self.0.insert(station_id, description.into());
    }

    /// Description of a selected station.
    pub fn get(&self, station_id: &StationId) -> Option<&str> {
        self.0.get(station_id).map(String::as_str)
    }

    /// Whether a station is selected.
    pub fn contains(&self, station_id: &StationId) -> bool {
        self.0.contains_key(station_id)
    }

    /// Selected station ids, in id order.
    pub fn station_ids(&self) -> impl Iterator<Item = &StationId> {
        self.0.keys()
    }

    /// Descriptions of the selected stations, in id order.
    pub fn descriptions(&self) -> Vec<String> {
        self.0.values().cloned().collect()
    }

    /// Iterate over `(id, description)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&StationId, &str)> {
        self.0.iter().map(|(id, d)| (id, d.as_str()))
    }

    /// Number of selected stations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StationId, String)> for Selection {
    fn from_iter<I: IntoIterator<Item = (StationId, String)>>(iter: I) -> Self {
        Selection(iter.into_iter().collect())
    }
}
