//! Polling configuration.

use std::time::Duration;

use chrono::TimeDelta;

/// Timings for discovery and refresh.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// How often the host refreshes each sensor (seconds).
    pub scan_interval_secs: u64,

    /// Trailing window scanned to discover a station's data types (hours).
    pub discovery_window_hours: i64,

    /// Trailing window fetched on each refresh (seconds).
    pub refresh_window_secs: i64,
}

impl PollConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        scan_interval_secs: u64,
        discovery_window_hours: i64,
        refresh_window_secs: i64,
    ) -> Self {
        Self {
            scan_interval_secs,
            discovery_window_hours,
            refresh_window_secs,
        }
    }

    /// Returns the scan interval as a Duration.
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    /// Returns the discovery window.
    pub fn discovery_window(&self) -> TimeDelta {
        TimeDelta::hours(self.discovery_window_hours)
    }

    /// Returns the refresh window.
    pub fn refresh_window(&self) -> TimeDelta {
        TimeDelta::seconds(self.refresh_window_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: 300,    // 5 minutes
            discovery_window_hours: 24, // 1 day
            refresh_window_secs: 7200,  // 2 hours
        }
    }
}
