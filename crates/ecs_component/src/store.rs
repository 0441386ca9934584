//! Component storage.
//!
//! A [`ComponentStore<T>`] is a homogeneous table mapping [`EntityId`] to a
//! value of one component type. The world keeps one store per registered
//! type behind the object-safe [`ErasedStore`] view so it can attach, detach
//! and encode components when it only knows the type tag.

use std::any::Any;

use dashmap::DashMap;

use crate::component::{Component, ComponentRecord, ComponentTypeId};
use crate::entity::EntityId;
use crate::error::EcsError;

/// Typed table of component values keyed by entity.
///
/// The store performs no validation of its own: callers are responsible for
/// only writing entries for entities that have the type attached.
#[derive(Debug)]
pub struct ComponentStore<T: Component> {
    entries: DashMap<EntityId, T>,
}

impl<T: Component> ComponentStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert or overwrite the value for `entity`, returning the previous one.
    pub fn set(&self, entity: EntityId, value: T) -> Option<T> {
        self.entries.insert(entity, value)
    }

    /// Returns a copy of the value stored for `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ComponentMissing`] if there is no entry.
    pub fn get(&self, entity: EntityId) -> Result<T, EcsError> {
        self.entries
            .get(&entity)
            .map(|entry| entry.value().clone())
            .ok_or(EcsError::ComponentMissing {
                entity,
                component: T::component_type_id(),
            })
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entries.contains_key(&entity)
    }

    /// Remove the entry for `entity`, returning its value.
    pub fn remove(&self, entity: EntityId) -> Option<T> {
        self.entries.remove(&entity).map(|(_, value)| value)
    }

    /// Returns the number of entities with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Component> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStore`].
pub trait ErasedStore: Send + Sync {
    /// The tag of the component type held by this store.
    fn component_type(&self) -> ComponentTypeId;

    /// The human-readable name of the component type.
    fn component_name(&self) -> &'static str;

    /// Write the type's default value for `entity`.
    fn insert_default(&self, entity: EntityId);

    /// Remove the entry for `entity`. Returns `true` if one existed.
    fn remove_entry(&self, entity: EntityId) -> bool;

    fn contains_entry(&self, entity: EntityId) -> bool;

    /// Encode the entry for `entity` into a [`ComponentRecord`].
    fn record(&self, entity: EntityId) -> Result<ComponentRecord, EcsError>;

    /// Access the concrete store for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Component> ErasedStore for ComponentStore<T> {
    fn component_type(&self) -> ComponentTypeId {
        T::component_type_id()
    }

    fn component_name(&self) -> &'static str {
        T::type_name()
    }

    fn insert_default(&self, entity: EntityId) {
        self.set(entity, T::default());
    }

    fn remove_entry(&self, entity: EntityId) -> bool {
        self.remove(entity).is_some()
    }

    fn contains_entry(&self, entity: EntityId) -> bool {
        self.contains(entity)
    }

    fn record(&self, entity: EntityId) -> Result<ComponentRecord, EcsError> {
        let value = self.get(entity)?;
        ComponentRecord::encode(entity, &value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Counter {
        value: i64,
    }

    impl Component for Counter {
        fn type_name() -> &'static str {
            "Counter"
        }
    }

    #[test]
    fn test_get_missing_entry() {
        let store = ComponentStore::<Counter>::new();
        let err = store.get(EntityId(1)).unwrap_err();
        assert!(matches!(
            err,
            EcsError::ComponentMissing { entity, component }
                if entity == EntityId(1) && component == Counter::component_type_id()
        ));
    }

    #[test]
    fn test_set_overwrites() {
        let store = ComponentStore::new();
        assert!(store.set(EntityId(1), Counter { value: 1 }).is_none());
        let previous = store.set(EntityId(1), Counter { value: 5 });
        assert_eq!(previous, Some(Counter { value: 1 }));
        assert_eq!(store.get(EntityId(1)).unwrap(), Counter { value: 5 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_entries_are_per_entity() {
        let store = ComponentStore::new();
        store.set(EntityId(1), Counter { value: 1 });
        store.set(EntityId(2), Counter { value: 2 });
        assert_eq!(store.get(EntityId(1)).unwrap().value, 1);
        assert_eq!(store.get(EntityId(2)).unwrap().value, 2);
    }

    #[test]
    fn test_erased_insert_default_and_remove() {
        let store: Box<dyn ErasedStore> = Box::new(ComponentStore::<Counter>::new());
        assert_eq!(store.component_type(), Counter::component_type_id());
        assert_eq!(store.component_name(), "Counter");

        store.insert_default(EntityId(4));
        assert!(store.contains_entry(EntityId(4)));
        assert!(store.remove_entry(EntityId(4)));
        assert!(!store.remove_entry(EntityId(4)));
    }

    #[test]
    fn test_erased_record_and_downcast() {
        let store: Box<dyn ErasedStore> = Box::new(ComponentStore::<Counter>::new());
        let typed = store
            .as_any()
            .downcast_ref::<ComponentStore<Counter>>()
            .unwrap();
        typed.set(EntityId(2), Counter { value: 9 });

        let record = store.record(EntityId(2)).unwrap();
        assert_eq!(record.decode::<Counter>().unwrap(), Counter { value: 9 });
        assert!(store.record(EntityId(3)).is_err());
    }
}
