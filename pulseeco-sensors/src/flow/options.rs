//! Reconfiguration: re-pick the stations of an existing entry.

use crate::directory::list_active_stations;
use crate::domain::{EntryId, Selection, StationSummary};
use crate::entry::ConfigEntry;
use crate::pulseeco::{PulseEcoApi, PulseEcoError};
use crate::reconcile::{Reconciliation, reconcile};
use crate::registry::EntityRegistry;

use super::form::{StationForm, StepId};

/// Single-step options flow.
///
/// Opening the flow refetches the directory, so stations added or removed
/// upstream since setup are reflected in the choices.
#[derive(Debug, Clone)]
pub struct OptionsFlow {
    entry_id: EntryId,
    existing: Selection,
    directory: Vec<StationSummary>,
}

impl OptionsFlow {
    /// Open the flow for `entry` using its stored connection.
    ///
    /// Directory failures are returned to the caller.
    pub async fn init<A: PulseEcoApi>(entry: &ConfigEntry, api: &A) -> Result<Self, PulseEcoError> {
        let directory = list_active_stations(api).await?;
        Ok(Self {
            entry_id: entry.entry_id.clone(),
            existing: entry.selection().clone(),
            directory,
        })
    }

    /// The multi-select, pre-filled with the current selection.
    pub fn form(&self) -> StationForm {
        StationForm::new(
            StepId::Init,
            self.directory.iter().map(|s| s.description.clone()),
        )
        .with_defaults(self.existing.descriptions())
    }

    /// The selection in effect when the flow was opened.
    pub fn existing(&self) -> &Selection {
        &self.existing
    }

    /// The freshly fetched directory.
    pub fn directory(&self) -> &[StationSummary] {
        &self.directory
    }

    /// Apply the submitted descriptions.
    ///
    /// Removes entities of deselected stations from `registry` and returns
    /// the replacement selection. The submission replaces the selection
    /// wholesale; an empty submission deselects everything.
    pub fn submit<R: EntityRegistry>(self, submitted: &[String], registry: &mut R) -> Reconciliation {
        reconcile(
            registry,
            &self.entry_id,
            &self.existing,
            submitted,
            &self.directory,
        )
    }
}
