//! Entity registry. Allocates entities and tracks their attached types.
//!
//! The registry is the authority on which component types an entity carries.
//! Component stores mirror it: a store holds an entry for an entity exactly
//! when the registry lists that store's type for the entity.

use dashmap::DashMap;

use ecs_component::{ComponentSet, ComponentTypeId, EcsError, EntityAllocator, EntityId};

/// Mapping from entity to the set of component types attached to it.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    /// Entity ID allocator.
    allocator: EntityAllocator,
    /// Attached component types, keyed by entity.
    attached: DashMap<EntityId, ComponentSet>,
}

impl EntityRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            attached: DashMap::new(),
        }
    }

    /// Allocate a fresh entity with no components attached.
    pub fn create(&self) -> EntityId {
        let entity = self.reserve();
        self.publish(entity);
        entity
    }

    /// Allocate an identifier without making it visible yet.
    pub(crate) fn reserve(&self) -> EntityId {
        self.allocator.allocate()
    }

    /// Make a reserved identifier known, with no components attached.
    pub(crate) fn publish(&self, entity: EntityId) {
        self.attached.entry(entity).or_default();
    }

    /// Record `type_id` as attached to `entity`.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnknownEntity`] if the entity was never created.
    /// - [`EcsError::AlreadyAttached`] if the type is already attached.
    pub fn attach(&self, entity: EntityId, type_id: ComponentTypeId) -> Result<(), EcsError> {
        let mut set = self
            .attached
            .get_mut(&entity)
            .ok_or(EcsError::UnknownEntity(entity))?;
        if !set.insert(type_id) {
            return Err(EcsError::AlreadyAttached {
                entity,
                component: type_id,
            });
        }
        Ok(())
    }

    /// Remove `type_id` from `entity`'s attached set.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnknownEntity`] if the entity was never created.
    /// - [`EcsError::ComponentMissing`] if the type is not attached.
    pub fn detach(&self, entity: EntityId, type_id: ComponentTypeId) -> Result<(), EcsError> {
        let mut set = self
            .attached
            .get_mut(&entity)
            .ok_or(EcsError::UnknownEntity(entity))?;
        if !set.remove(type_id) {
            return Err(EcsError::ComponentMissing {
                entity,
                component: type_id,
            });
        }
        Ok(())
    }

    /// Returns `true` if `entity` has every type in `types` attached.
    ///
    /// An unknown entity never qualifies, even for an empty `types`.
    #[must_use]
    pub fn has_all(&self, entity: EntityId, types: &ComponentSet) -> bool {
        self.attached
            .get(&entity)
            .is_some_and(|set| types.is_subset(&set))
    }

    /// Returns `true` if `type_id` is attached to `entity`.
    #[must_use]
    pub fn has(&self, entity: EntityId, type_id: ComponentTypeId) -> bool {
        self.attached
            .get(&entity)
            .is_some_and(|set| set.contains(type_id))
    }

    /// Returns the subset of `types` that is not attached to `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity was never created.
    pub fn missing(&self, entity: EntityId, types: &ComponentSet) -> Result<ComponentSet, EcsError> {
        let set = self
            .attached
            .get(&entity)
            .ok_or(EcsError::UnknownEntity(entity))?;
        Ok(types.difference(&set))
    }

    /// Returns a copy of the types attached to `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity was never created.
    pub fn attached(&self, entity: EntityId) -> Result<ComponentSet, EcsError> {
        self.attached
            .get(&entity)
            .map(|set| set.value().clone())
            .ok_or(EcsError::UnknownEntity(entity))
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.attached.contains_key(&entity)
    }

    /// Returns the number of entities created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITION: ComponentTypeId = ComponentTypeId(1);
    const VELOCITY: ComponentTypeId = ComponentTypeId(2);

    #[test]
    fn test_create_starts_empty() {
        let registry = EntityRegistry::new();
        let e = registry.create();
        assert!(e.is_valid());
        assert!(registry.contains(e));
        assert!(registry.attached(e).unwrap().is_empty());
    }

    #[test]
    fn test_create_is_strictly_increasing() {
        let registry = EntityRegistry::new();
        let a = registry.create();
        let b = registry.create();
        assert!(b > a);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_attach_twice_fails() {
        let registry = EntityRegistry::new();
        let e = registry.create();
        registry.attach(e, POSITION).unwrap();
        let err = registry.attach(e, POSITION).unwrap_err();
        assert!(matches!(err, EcsError::AlreadyAttached { entity, component }
            if entity == e && component == POSITION));
        assert_eq!(registry.attached(e).unwrap().len(), 1);
    }

    #[test]
    fn test_attach_unknown_entity() {
        let registry = EntityRegistry::new();
        let err = registry.attach(EntityId(42), POSITION).unwrap_err();
        assert!(matches!(err, EcsError::UnknownEntity(EntityId(42))));
    }

    #[test]
    fn test_has_all() {
        let registry = EntityRegistry::new();
        let e = registry.create();
        registry.attach(e, POSITION).unwrap();

        let position_only = ComponentSet::new().with_id(POSITION);
        let both = ComponentSet::new().with_id(POSITION).with_id(VELOCITY);

        assert!(registry.has_all(e, &position_only));
        assert!(!registry.has_all(e, &both));
        assert!(registry.has_all(e, &ComponentSet::new()));
        assert!(!registry.has_all(EntityId(99), &ComponentSet::new()));
    }

    #[test]
    fn test_missing_lists_absent_types() {
        let registry = EntityRegistry::new();
        let e = registry.create();
        registry.attach(e, POSITION).unwrap();

        let both = ComponentSet::new().with_id(POSITION).with_id(VELOCITY);
        assert_eq!(
            registry.missing(e, &both).unwrap(),
            ComponentSet::new().with_id(VELOCITY)
        );
        assert!(registry.missing(EntityId(99), &both).is_err());
    }

    #[test]
    fn test_detach() {
        let registry = EntityRegistry::new();
        let e = registry.create();
        registry.attach(e, VELOCITY).unwrap();
        registry.detach(e, VELOCITY).unwrap();
        assert!(!registry.has(e, VELOCITY));

        let err = registry.detach(e, VELOCITY).unwrap_err();
        assert!(matches!(err, EcsError::ComponentMissing { .. }));

        // Detached types can be attached again.
        registry.attach(e, VELOCITY).unwrap();
        assert!(registry.has(e, VELOCITY));
    }
}
