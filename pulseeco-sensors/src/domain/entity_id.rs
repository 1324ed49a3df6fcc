//! Structured identifiers for configuration entries and sensor entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DataValueType, StationId};

/// Integration domain, the first component of every entity id.
pub const DOMAIN: &str = "pulseeco";

/// Identifier the host assigns to a configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wrap a host-provided entry id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one sensor entity: `(domain, entry, station, data type)`.
///
/// Stable across restarts for as long as the station keeps reporting the
/// data type. The components are kept as values; [`EntityId::unique_id`]
/// renders the string form handed to the host, which is never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub entry_id: EntryId,
    pub station_id: StationId,
    pub data_type: DataValueType,
}

impl EntityId {
    /// Create a new entity id.
    pub fn new(entry_id: EntryId, station_id: StationId, data_type: DataValueType) -> Self {
        Self {
            entry_id,
            station_id,
            data_type,
        }
    }

    /// The integration domain.
    pub fn domain(&self) -> &'static str {
        DOMAIN
    }

    /// The unique-id string registered with the host.
    pub fn unique_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            DOMAIN, self.entry_id, self.station_id, self.data_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_id_format() {
        let id = EntityId::new(
            EntryId::new("01HXYZ"),
            StationId::parse("1001").unwrap(),
            DataValueType::Pm25,
        );
        assert_eq!(id.unique_id(), "pulseeco_01HXYZ_1001_pm25");
        assert_eq!(id.domain(), "pulseeco");
    }

    #[test]
    fn station_id_is_carried_not_parsed() {
        // Underscores in the station id would break split-based parsing.
        let station = StationId::parse("sky_1").unwrap();
        let id = EntityId::new(EntryId::new("e"), station.clone(), DataValueType::NoiseDba);

        assert_eq!(id.station_id, station);
        assert_eq!(id.unique_id(), "pulseeco_e_sky_1_noise_dba");
    }

    #[test]
    fn ordering_groups_by_entry_then_station() {
        let a = EntityId::new(
            EntryId::new("e"),
            StationId::parse("A").unwrap(),
            DataValueType::Pm10,
        );
        let b = EntityId::new(
            EntryId::new("e"),
            StationId::parse("B").unwrap(),
            DataValueType::Humidity,
        );
        assert!(a < b);
    }
}
