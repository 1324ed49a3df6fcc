//! Removing entities of deselected stations.
//!
//! Reconciliation works at station granularity: every entity of a station
//! that left the selection is removed, and nothing else is touched. If a
//! still-selected station stops reporting a data type, its entity for that
//! type stays registered.

use tracing::info;

use crate::domain::{EntityId, EntryId, Selection, StationSummary};
use crate::registry::EntityRegistry;

/// Outcome of applying a resubmitted selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Previously selected stations whose description was not resubmitted.
    pub removed: Selection,
    /// Entities that were removed from the registry.
    pub removed_entities: Vec<EntityId>,
    /// The replacement selection, built from the fresh directory.
    pub selection: Selection,
}

/// Reconcile the registry of `entry_id` with a resubmitted selection.
///
/// `existing` is the persisted selection, `submitted` the descriptions the
/// operator chose, and `directory` the freshly fetched station directory.
pub fn reconcile<R: EntityRegistry>(
    registry: &mut R,
    entry_id: &EntryId,
    existing: &Selection,
    submitted: &[String],
    directory: &[StationSummary],
) -> Reconciliation {
    let removed = existing.deselected(submitted);

    let mut removed_entities = Vec::new();
    for id in registry.entity_ids(entry_id) {
        if removed.contains(&id.station_id) && registry.remove(&id) {
            removed_entities.push(id);
        }
    }

    let selection = Selection::from_choices(directory, submitted);

    info!(
        entry_id = %entry_id,
        removed_stations = removed.len(),
        removed_entities = removed_entities.len(),
        selected_stations = selection.len(),
        "reconciled station selection"
    );

    Reconciliation {
        removed,
        removed_entities,
        selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataValueType, StationId};
    use crate::registry::InMemoryRegistry;
    use crate::registry::test_support::StubEntity;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn eid(entry: &str, station: &str, data_type: DataValueType) -> EntityId {
        EntityId::new(EntryId::new(entry), id(station), data_type)
    }

    fn directory() -> Vec<StationSummary> {
        vec![
            StationSummary::new(id("A"), "Center"),
            StationSummary::new(id("B"), "Port"),
            StationSummary::new(id("C"), "Airport"),
        ]
    }

    #[test]
    fn deselected_station_entities_are_removed() {
        let existing = Selection::from_choices(&directory(), &["Center".into(), "Port".into()]);

        let mut registry = InMemoryRegistry::new();
        registry.add(vec![
            StubEntity(eid("e1", "A", DataValueType::Pm10)),
            StubEntity(eid("e1", "B", DataValueType::Pm10)),
            StubEntity(eid("e1", "B", DataValueType::Temperature)),
        ]);

        let result = reconcile(
            &mut registry,
            &EntryId::new("e1"),
            &existing,
            &["Center".into()],
            &directory(),
        );

        assert_eq!(result.removed.len(), 1);
        assert_eq!(result.removed.get(&id("B")), Some("Port"));
        assert_eq!(result.removed_entities.len(), 2);
        assert!(result.removed_entities.iter().all(|e| e.station_id == id("B")));

        let mut expected = Selection::new();
        expected.insert(id("A"), "Center");
        assert_eq!(result.selection, expected);

        assert_eq!(
            registry.entity_ids(&EntryId::new("e1")),
            vec![eid("e1", "A", DataValueType::Pm10)]
        );
    }

    #[test]
    fn other_entries_are_untouched() {
        let existing = Selection::from_choices(&directory(), &["Port".into()]);

        let mut registry = InMemoryRegistry::new();
        registry.add(vec![
            StubEntity(eid("e1", "B", DataValueType::Pm10)),
            StubEntity(eid("e2", "B", DataValueType::Pm10)),
        ]);

        reconcile(&mut registry, &EntryId::new("e1"), &existing, &[], &directory());

        assert!(!registry.contains(&eid("e1", "B", DataValueType::Pm10)));
        assert!(registry.contains(&eid("e2", "B", DataValueType::Pm10)));
    }

    #[test]
    fn newly_chosen_stations_come_from_directory() {
        let existing = Selection::from_choices(&directory(), &["Center".into()]);
        let mut registry: InMemoryRegistry<StubEntity> = InMemoryRegistry::new();

        let result = reconcile(
            &mut registry,
            &EntryId::new("e1"),
            &existing,
            &["Center".into(), "Airport".into()],
            &directory(),
        );

        assert!(result.removed.is_empty());
        assert!(result.removed_entities.is_empty());
        assert_eq!(result.selection.len(), 2);
        assert!(result.selection.contains(&id("C")));
    }

    #[test]
    fn station_gone_from_directory_drops_out_of_selection() {
        // "Port" is still submitted but no longer listed upstream.
        let existing = Selection::from_choices(&directory(), &["Center".into(), "Port".into()]);
        let fresh = vec![StationSummary::new(id("A"), "Center")];
        let mut registry = InMemoryRegistry::new();
        registry.add(vec![StubEntity(eid("e1", "B", DataValueType::Pm10))]);

        let result = reconcile(
            &mut registry,
            &EntryId::new("e1"),
            &existing,
            &["Center".into(), "Port".into()],
            &fresh,
        );

        assert!(result.removed.is_empty());
        assert!(!result.selection.contains(&id("B")));
        // Removal only follows what the operator deselected.
        assert!(registry.contains(&eid("e1", "B", DataValueType::Pm10)));
    }
}
