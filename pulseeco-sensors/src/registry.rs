//! The host's entity registry, as seen from this crate.
//!
//! The host owns entity storage. This crate only asks it to add entities,
//! remove them by id, and list the ids registered for an entry.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::{EntityId, EntryId};

/// Anything the registry can hold.
pub trait Entity {
    fn entity_id(&self) -> &EntityId;
}

/// Entity lifecycle callbacks provided by the host.
pub trait EntityRegistry {
    type Entity: Entity;

    /// Register new entities.
    fn add(&mut self, entities: Vec<Self::Entity>);

    /// Remove an entity. Returns whether it was registered.
    fn remove(&mut self, id: &EntityId) -> bool;

    /// Ids of every entity registered for `entry_id`.
    fn entity_ids(&self, entry_id: &EntryId) -> Vec<EntityId>;
}

/// Registry that keeps entities in memory, ordered by id.
///
/// Used by the `pulseeco-poll` binary as its host, and by tests.
#[derive(Debug)]
pub struct InMemoryRegistry<E> {
    entities: BTreeMap<EntityId, E>,
}

impl<E> Default for InMemoryRegistry<E> {
    fn default() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }
}

impl<E: Entity> InMemoryRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut E> {
        self.entities.get_mut(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// All entities, in id order.
    pub fn entities(&self) -> impl Iterator<Item = &E> {
        self.entities.values()
    }

    /// All entities mutably, in id order.
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.entities.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<E: Entity> EntityRegistry for InMemoryRegistry<E> {
    type Entity = E;

    fn add(&mut self, entities: Vec<E>) {
        for entity in entities {
            let id = entity.entity_id().clone();
            if self.entities.contains_key(&id) {
                // The host refuses duplicate unique ids; keep the first one.
                warn!(unique_id = %id, "entity already registered");
                continue;
            }
            debug!(unique_id = %id, "entity added");
            self.entities.insert(id, entity);
        }
    }

    fn remove(&mut self, id: &EntityId) -> bool {
        let removed = self.entities.remove(id).is_some();
        if removed {
            debug!(unique_id = %id, "entity removed");
        }
        removed
    }

    fn entity_ids(&self, entry_id: &EntryId) -> Vec<EntityId> {
        self.entities
            .keys()
            .filter(|id| &id.entry_id == entry_id)
            .cloned()
            .collect()
    }
}
