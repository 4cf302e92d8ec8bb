//! In-memory property host
//!
//! Keeps property values per entity in hash maps. Used by headless hosts and
//! by tests that need to observe what the engine wrote.

use crate::property::{EntityId, PropertyHost, PropertyId, PropertyValue};
use rustc_hash::FxHashMap;

/// A [`PropertyHost`] that stores every written value
#[derive(Debug, Default)]
pub struct PropertyStore {
    entities: FxHashMap<EntityId, FxHashMap<PropertyId, PropertyValue>>,
    writes: usize,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity with no explicit properties
    ///
    /// Reading an unset property on a registered entity yields the
    /// property's default value.
    pub fn insert_entity(&mut self, entity: EntityId) {
        self.entities.entry(entity).or_default();
    }

    /// Drop an entity and all its properties
    ///
    /// Returns `false` if the entity was unknown.
    pub fn remove_entity(&mut self, entity: EntityId) -> bool {
        let removed = self.entities.remove(&entity).is_some();
        if removed {
            tracing::trace!("PropertyStore: removed entity {}", entity);
        }
        removed
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Total number of writes applied since creation
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PropertyHost for PropertyStore {
    fn read(&self, entity: EntityId, property: &PropertyId) -> Option<PropertyValue> {
        let props = self.entities.get(&entity)?;
        Some(
            props
                .get(property)
                .copied()
                .unwrap_or_else(|| property.default_value()),
        )
    }

    fn write(&mut self, entity: EntityId, property: &PropertyId, value: PropertyValue) {
        self.writes += 1;
        self.entities
            .entry(entity)
            .or_default()
            .insert(property.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_unknown_entity_reads_none() {
        let store = PropertyStore::new();
        assert_eq!(store.read(EntityId::new(7), &PropertyId::Alpha), None);
    }

    #[test]
    fn test_registered_entity_reads_defaults() {
        let mut store = PropertyStore::new();
        let e = EntityId::new(1);
        store.insert_entity(e);

        assert_eq!(store.read_float(e, &PropertyId::ScaleY), Some(1.0));
        assert_eq!(store.read_color(e, &PropertyId::BackgroundColor), Some(Color::BLACK));
    }

    #[test]
    fn test_write_then_remove() {
        let mut store = PropertyStore::new();
        let e = EntityId::new(2);

        store.write(e, &PropertyId::TranslationX, PropertyValue::Float(12.0));
        assert!(store.contains(e));
        assert_eq!(store.read_float(e, &PropertyId::TranslationX), Some(12.0));
        assert_eq!(store.write_count(), 1);

        assert!(store.remove_entity(e));
        assert!(!store.remove_entity(e));
        assert_eq!(store.entity_count(), 0);
    }
}
