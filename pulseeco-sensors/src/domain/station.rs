//! Measuring station types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// Opaque identifier of a Pulse.eco measuring station (`sensorId` upstream).
///
/// The value is owned by the API and never interpreted locally. The only
/// guarantee is that it is non-empty and free of surrounding whitespace.
///
/// # Examples
///
/// ```
/// use pulseeco_sensors::domain::StationId;
///
/// let id = StationId::parse("1001").unwrap();
/// assert_eq!(id.as_str(), "1001");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse(" 1001").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.trim() != s {
            return Err(InvalidStationId {
                reason: "must not have leading or trailing whitespace",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Activity state reported by the API for a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StationStatus {
    Active,
    ActiveUnconfirmed,
    NotClaimed,
    NotClaimedUnconfirmed,
    Inactive,
    Banned,
    /// Any status string this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl StationStatus {
    /// Statuses whose stations are offered for selection.
    pub const ACTIVE_SET: [StationStatus; 4] = [
        StationStatus::Active,
        StationStatus::ActiveUnconfirmed,
        StationStatus::NotClaimed,
        StationStatus::NotClaimedUnconfirmed,
    ];

    /// Whether a station with this status is usable.
    pub fn is_active(self) -> bool {
        Self::ACTIVE_SET.contains(&self)
    }
}

/// A station as reported by the directory endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub station_id: StationId,
    pub description: String,
    pub status: StationStatus,
}

impl Station {
    /// Create a new station.
    pub fn new(station_id: StationId, description: impl Into<String>, status: StationStatus) -> Self {
        Self {
            station_id,
            description: description.into(),
            status,
        }
    }

    /// Project to the `(id, description)` pair kept in configuration.
    pub fn summary(&self) -> StationSummary {
        StationSummary {
            station_id: self.station_id.clone(),
            description: self.description.clone(),
        }
    }
}

/// The `(id, description)` projection of a usable station.
///
/// This is what the directory accessor returns and what a configuration
/// entry stores as its station snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSummary {
    pub station_id: StationId,
    pub description: String,
}

impl StationSummary {
    /// Create a new summary.
    pub fn new(station_id: StationId, description: impl Into<String>) -> Self {
        Self {
            station_id,
            description: description.into(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Za-z0-9-]{1,24}") {
            let id = StationId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Leading whitespace is always rejected
        #[test]
        fn leading_whitespace_rejected(s in "[ \t][A-Za-z0-9]{0,10}") {
            prop_assert!(StationId::parse(&s).is_err());
        }
    }
}
