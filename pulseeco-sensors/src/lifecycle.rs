//! Entry lifecycle: first setup, reconfiguration and periodic refresh.
//!
//! These functions glue the flows, discovery and the host registry
//! together. They hold no state of their own; everything arrives through
//! the [`EntryContext`] and the registry passed in.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::info;

use crate::domain::{EntityId, EntryId, Selection};
use crate::entry::{ConfigEntry, EntryContext};
use crate::flow::OptionsFlow;
use crate::pulseeco::PulseEcoApi;
use crate::reconcile::Reconciliation;
use crate::registry::EntityRegistry;
use crate::sensor::{PollConfig, PulseEcoSensor, RefreshOutcome, discover_stations};

/// Result of applying a reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconfigureOutcome {
    pub reconciliation: Reconciliation,
    /// Sensors created for stations that joined the selection.
    pub added: usize,
}

/// Counts of a refresh pass over many sensors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub updated: usize,
    pub no_data: usize,
    pub failed: usize,
}

impl RefreshSummary {
    fn record(&mut self, outcome: RefreshOutcome) {
        match outcome {
            RefreshOutcome::Updated => self.updated += 1,
            RefreshOutcome::NoData => self.no_data += 1,
            RefreshOutcome::Failed => self.failed += 1,
        }
    }
}

/// Create, refresh and register the sensors of a freshly loaded entry.
///
/// Returns the number of sensors added.
pub async fn setup_entry<A, R>(
    ctx: &EntryContext<A>,
    config: &PollConfig,
    registry: &mut R,
    now: DateTime<Utc>,
) -> usize
where
    A: PulseEcoApi,
    R: EntityRegistry<Entity = PulseEcoSensor<A>>,
{
    add_stations(ctx, &ctx.selection, config, registry, now).await
}

/// Discover sensors for `stations`, give them a first value and register
/// them.
pub async fn add_stations<A, R>(
    ctx: &EntryContext<A>,
    stations: &Selection,
    config: &PollConfig,
    registry: &mut R,
    now: DateTime<Utc>,
) -> usize
where
    A: PulseEcoApi,
    R: EntityRegistry<Entity = PulseEcoSensor<A>>,
{
    if stations.is_empty() {
        return 0;
    }

    let mut sensors = discover_stations(ctx, stations, config, now).await;
    let summary = refresh_all(sensors.iter_mut(), now).await;

    let added = sensors.len();
    info!(
        entry_id = %ctx.entry_id,
        stations = stations.len(),
        sensors = added,
        updated = summary.updated,
        "adding sensors"
    );
    registry.add(sensors);
    added
}

/// Apply an options submission to a loaded entry.
///
/// Entities of deselected stations are removed, the new selection is
/// stored as the entry's options overlay and copied into `ctx`, and
/// stations that joined the selection get their sensors right away.
pub async fn reconfigure_entry<A, R>(
    ctx: &mut EntryContext<A>,
    entry: &mut ConfigEntry,
    flow: OptionsFlow,
    submitted: &[String],
    registry: &mut R,
    config: &PollConfig,
    now: DateTime<Utc>,
) -> ReconfigureOutcome
where
    A: PulseEcoApi,
    R: EntityRegistry<Entity = PulseEcoSensor<A>>,
{
    let previous = entry.selection().clone();
    let reconciliation = flow.submit(submitted, registry);

    entry.set_selection(reconciliation.selection.clone());
    ctx.selection = reconciliation.selection.clone();

    let joined = reconciliation.selection.added_since(&previous);
    let added = add_stations(ctx, &joined, config, registry, now).await;

    ReconfigureOutcome {
        reconciliation,
        added,
    }
}

/// Refresh sensors concurrently and tally the outcomes.
pub async fn refresh_all<'a, A, I>(sensors: I, now: DateTime<Utc>) -> RefreshSummary
where
    A: PulseEcoApi + 'a,
    I: IntoIterator<Item = &'a mut PulseEcoSensor<A>>,
{
    let outcomes = join_all(sensors.into_iter().map(|s| s.refresh_at(now))).await;

    let mut summary = RefreshSummary::default();
    for outcome in outcomes {
        summary.record(outcome);
    }
    summary
}

/// Entities currently registered for an entry.
pub fn list_entities<R: EntityRegistry>(registry: &R, entry_id: &EntryId) -> Vec<EntityId> {
    registry.entity_ids(entry_id)
}
