//! Configuration entries and the per-entry runtime context.
//!
//! A [`ConfigEntry`] is the value the host persists once setup completes.
//! An [`EntryContext`] is built from it at runtime and passed explicitly to
//! every operation that needs the entry's API handle or selection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{EntryId, Selection, StationSummary};

/// Parameters collected by the first setup step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// City subdomain on pulse.eco
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ConnectionParams {
    /// Anonymous access to a city.
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            username: None,
            password: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// `(username, password)` when both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        }
    }
}

/// Data written when setup completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryData {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    /// Every usable station at setup time.
    pub measuring_stations: Vec<StationSummary>,
    /// Stations chosen at setup time.
    pub selected_measuring_stations: Selection,
}

/// Overlay written by reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOptions {
    pub selected_measuring_stations: Selection,
}

/// A persisted configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: EntryId,
    pub title: String,
    pub data: EntryData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<EntryOptions>,
}

impl ConfigEntry {
    /// The effective selection: the options overlay if present, otherwise
    /// the selection made during setup.
    pub fn selection(&self) -> &Selection {
        match &self.options {
            Some(options) => &options.selected_measuring_stations,
            None => &self.data.selected_measuring_stations,
        }
    }

    /// Replace the options overlay with a new selection.
    pub fn set_selection(&mut self, selection: Selection) {
        self.options = Some(EntryOptions {
            selected_measuring_stations: selection,
        });
    }

    pub fn city(&self) -> &str {
        &self.data.connection.city
    }
}

/// Everything an operation needs to know about one configuration entry.
///
/// The API handle is shared read-only by every sensor of the entry.
#[derive(Debug)]
pub struct EntryContext<A> {
    pub entry_id: EntryId,
    pub city: String,
    pub api: Arc<A>,
    pub selection: Selection,
}

impl<A> EntryContext<A> {
    /// Build the context for `entry` around an API handle.
    pub fn new(entry: &ConfigEntry, api: Arc<A>) -> Self {
        Self {
            entry_id: entry.entry_id.clone(),
            city: entry.city().to_string(),
            api,
            selection: entry.selection().clone(),
        }
    }
}
