//! World state storage.
//!
//! The [`World`] holds the canonical entity and component data for one game
//! session: an [`EntityRegistry`] plus one [`ComponentStore`] per registered
//! component type. Component types are registered while the world is still
//! exclusively owned; afterwards every operation takes `&self` so a session
//! can share the world between threads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use ecs_component::{
    Component, ComponentRecord, ComponentSet, ComponentStore, ComponentTypeId, EcsError, EntityId,
    ErasedStore,
};

use crate::registry::EntityRegistry;

/// Identifies the game session a world belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub Uuid);

impl WorldId {
    /// Generate a fresh random world ID.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for WorldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "World({})", self.0)
    }
}

/// The canonical world state of one game session.
pub struct World {
    /// Session identity.
    id: WorldId,
    /// Entity allocation and attached-type bookkeeping.
    registry: EntityRegistry,
    /// One store per registered component type.
    stores: HashMap<ComponentTypeId, Box<dyn ErasedStore>>,
    /// Per-entity mutual exclusion for mutations.
    locks: DashMap<EntityId, Arc<Mutex<()>>>,
}

impl World {
    /// Create a new empty world with a random [`WorldId`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(WorldId::new_v4())
    }

    /// Create a new empty world with a caller-chosen identity.
    #[must_use]
    pub fn with_id(id: WorldId) -> Self {
        Self {
            id,
            registry: EntityRegistry::new(),
            stores: HashMap::new(),
            locks: DashMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> WorldId {
        self.id
    }

    /// Create the store for component type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DuplicateComponent`] if a type with the same
    /// [`ComponentTypeId`] is already registered.
    pub fn register<T: Component>(&mut self) -> Result<ComponentTypeId, EcsError> {
        let type_id = T::component_type_id();
        if self.is_registered(type_id) {
            return Err(EcsError::DuplicateComponent {
                name: T::type_name(),
                id: type_id,
            });
        }
        self.stores
            .insert(type_id, Box::new(ComponentStore::<T>::new()));
        debug!(world = %self.id, component = T::type_name(), %type_id, "registered component type");
        Ok(type_id)
    }

    #[must_use]
    pub fn is_registered(&self, type_id: ComponentTypeId) -> bool {
        self.stores.contains_key(&type_id)
    }

    /// Returns the name of a registered component type.
    #[must_use]
    pub fn component_name(&self, type_id: ComponentTypeId) -> Option<&'static str> {
        self.stores.get(&type_id).map(|store| store.component_name())
    }

    /// Allocate a new entity with no components.
    pub fn add_entity(&self) -> EntityId {
        // The lock must exist before the registry publishes the entity.
        let entity = self.registry.reserve();
        self.locks.insert(entity, Arc::new(Mutex::new(())));
        self.registry.publish(entity);
        debug!(world = %self.id, %entity, "added entity");
        entity
    }

    /// Attach component type `type_id` to `entity` with its default value.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnknownEntity`] if the entity was never created.
    /// - [`EcsError::UnregisteredComponent`] if no store exists for the type.
    /// - [`EcsError::AlreadyAttached`] if the type is already attached; the
    ///   stored value is left untouched.
    pub fn initialize_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<(), EcsError> {
        self.exclusive(entity, |world| {
            let store = world.erased(type_id)?;
            if world.registry.has(entity, type_id) {
                return Err(EcsError::AlreadyAttached {
                    entity,
                    component: type_id,
                });
            }
            // Store first so a reader that sees the type in the registry
            // always finds the value.
            store.insert_default(entity);
            world.registry.attach(entity, type_id)?;
            debug!(world = %world.id, %entity, component = store.component_name(), "initialized component");
            Ok(())
        })
    }

    /// Typed shorthand for [`World::initialize_component`].
    ///
    /// # Errors
    ///
    /// Same as [`World::initialize_component`].
    pub fn initialize<T: Component>(&self, entity: EntityId) -> Result<(), EcsError> {
        self.initialize_component(entity, T::component_type_id())
    }

    /// Remove component type `type_id` from `entity`, dropping its value.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnknownEntity`] if the entity was never created.
    /// - [`EcsError::UnregisteredComponent`] if no store exists for the type.
    /// - [`EcsError::ComponentMissing`] if the type is not attached.
    pub fn detach_component(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<(), EcsError> {
        self.exclusive(entity, |world| {
            let store = world.erased(type_id)?;
            world.registry.detach(entity, type_id)?;
            store.remove_entry(entity);
            debug!(world = %world.id, %entity, component = store.component_name(), "detached component");
            Ok(())
        })
    }

    /// Read the current value of component `T` on `entity`.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnknownEntity`] if the entity was never created.
    /// - [`EcsError::UnregisteredComponent`] if `T` was never registered.
    /// - [`EcsError::ComponentMissing`] if `T` is not attached.
    pub fn query<T: Component>(&self, entity: EntityId) -> Result<T, EcsError> {
        if !self.registry.contains(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        self.store::<T>()?.get(entity)
    }

    /// Read the current value of a component identified only by its tag.
    ///
    /// # Errors
    ///
    /// Same as [`World::query`], plus [`EcsError::Encode`].
    pub fn query_record(
        &self,
        entity: EntityId,
        type_id: ComponentTypeId,
    ) -> Result<ComponentRecord, EcsError> {
        if !self.registry.contains(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        self.erased(type_id)?.record(entity)
    }

    /// Overwrite the value of an attached component with one supplied from
    /// outside the engine.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnknownEntity`] if the entity was never created.
    /// - [`EcsError::UnregisteredComponent`] if `T` was never registered.
    /// - [`EcsError::ComponentMissing`] if `T` is not attached.
    /// - [`EcsError::InvalidComponent`] if `T::validate` rejects the value.
    pub fn set_component<T: Component>(&self, entity: EntityId, value: T) -> Result<(), EcsError> {
        self.exclusive(entity, |world| {
            let store = world.store::<T>()?;
            let type_id = T::component_type_id();
            if !world.registry.has(entity, type_id) {
                return Err(EcsError::ComponentMissing {
                    entity,
                    component: type_id,
                });
            }
            value
                .validate()
                .map_err(|reason| EcsError::InvalidComponent {
                    component: T::type_name(),
                    reason,
                })?;
            store.set(entity, value);
            debug!(world = %world.id, %entity, component = T::type_name(), "set component");
            Ok(())
        })
    }

    /// Returns `true` if `entity` has every type in `types` attached.
    #[must_use]
    pub fn has_all(&self, entity: EntityId, types: &ComponentSet) -> bool {
        self.registry.has_all(entity, types)
    }

    /// Returns the component types attached to `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnknownEntity`] if the entity was never created.
    pub fn attached(&self, entity: EntityId) -> Result<ComponentSet, EcsError> {
        self.registry.attached(entity)
    }

    pub(crate) fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Returns the typed store for `T`.
    ///
    /// Writes through the store bypass the registry; callers must hold the
    /// entity lock and have checked that `T` is attached.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::UnregisteredComponent`] if `T` was never registered.
    pub(crate) fn store<T: Component>(&self) -> Result<&ComponentStore<T>, EcsError> {
        let type_id = T::component_type_id();
        self.stores
            .get(&type_id)
            .and_then(|store| store.as_any().downcast_ref::<ComponentStore<T>>())
            .ok_or(EcsError::UnregisteredComponent(type_id))
    }

    /// Returns the total number of entities in the world.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.registry.len()
    }

    fn erased(&self, type_id: ComponentTypeId) -> Result<&dyn ErasedStore, EcsError> {
        self.stores
            .get(&type_id)
            .map(|store| &**store)
            .ok_or(EcsError::UnregisteredComponent(type_id))
    }

    /// Run `f` while holding `entity`'s lock.
    ///
    /// The lock is not re-entrant: `f` must only use the non-locking parts of
    /// the world (`query`, `store`, the registry), never another mutating
    /// `World` method on the same entity.
    pub(crate) fn exclusive<R>(
        &self,
        entity: EntityId,
        f: impl FnOnce(&World) -> Result<R, EcsError>,
    ) -> Result<R, EcsError> {
        let lock = self
            .locks
            .get(&entity)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(EcsError::UnknownEntity(entity))?;
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f(self)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("id", &self.id)
            .field("entities", &self.registry.len())
            .field("component_types", &self.stores.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::SystemData;

    #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Health {
        current: i64,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }

        fn validate(&self) -> Result<(), String> {
            if self.current < 0 {
                return Err("health cannot be negative".to_string());
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Armor {
        rating: i64,
    }

    impl Component for Armor {
        fn type_name() -> &'static str {
            "Armor"
        }
    }

    fn make_world() -> World {
        let mut world = World::new();
        world.register::<Health>().unwrap();
        world.register::<Armor>().unwrap();
        world
    }

    #[test]
    fn test_register_twice_fails() {
        let mut world = World::new();
        world.register::<Health>().unwrap();
        let err = world.register::<Health>().unwrap_err();
        assert!(matches!(err, EcsError::DuplicateComponent { name: "Health", .. }));
        assert!(world.is_registered(Health::component_type_id()));
        assert!(!world.is_registered(Armor::component_type_id()));
        assert_eq!(world.component_name(Health::component_type_id()), Some("Health"));
    }

    #[test]
    fn test_initialize_sets_default() {
        let world = make_world();
        let e = world.add_entity();
        world.initialize::<Health>(e).unwrap();
        assert_eq!(world.query::<Health>(e).unwrap(), Health::default());
    }

    #[test]
    fn test_query_requires_attach() {
        let world = make_world();
        let e = world.add_entity();
        assert!(matches!(
            world.query::<Health>(e),
            Err(EcsError::ComponentMissing { .. })
        ));
        assert!(matches!(
            world.query::<Health>(EntityId(77)),
            Err(EcsError::UnknownEntity(EntityId(77)))
        ));
    }

    #[test]
    fn test_initialize_twice_keeps_value() {
        let world = make_world();
        let e = world.add_entity();
        world.initialize::<Health>(e).unwrap();
        world.set_component(e, Health { current: 40 }).unwrap();

        let err = world.initialize::<Health>(e).unwrap_err();
        assert!(matches!(err, EcsError::AlreadyAttached { .. }));
        assert_eq!(world.query::<Health>(e).unwrap(), Health { current: 40 });
    }

    #[test]
    fn test_initialize_unknown_entity_and_unregistered_type() {
        let world = World::new();
        assert!(matches!(
            world.initialize::<Health>(EntityId(5)),
            Err(EcsError::UnknownEntity(_))
        ));
        let e = world.add_entity();
        assert!(matches!(
            world.initialize::<Health>(e),
            Err(EcsError::UnregisteredComponent(_))
        ));
        assert!(world.attached(e).unwrap().is_empty());
    }

    #[test]
    fn test_detach_removes_value() {
        let world = make_world();
        let e = world.add_entity();
        world.initialize::<Armor>(e).unwrap();
        world.detach_component(e, Armor::component_type_id()).unwrap();

        assert!(world.query::<Armor>(e).is_err());
        assert!(world.store::<Armor>().unwrap().is_empty());
        assert!(matches!(
            world.detach_component(e, Armor::component_type_id()),
            Err(EcsError::ComponentMissing { .. })
        ));
    }

    #[test]
    fn test_has_all_follows_attach_and_detach() {
        let world = make_world();
        let e = world.add_entity();
        let both = ComponentSet::new().with::<Health>().with::<Armor>();
        assert!(!world.has_all(e, &both));

        world.initialize::<Health>(e).unwrap();
        world.initialize::<Armor>(e).unwrap();
        assert!(world.has_all(e, &both));

        world.detach_component(e, Armor::component_type_id()).unwrap();
        assert!(!world.has_all(e, &both));
        assert!(world.has_all(e, &ComponentSet::new().with::<Health>()));
    }

    #[test]
    fn test_query_tracks_attach_state() {
        let world = make_world();
        let e = world.add_entity();
        let health = ComponentSet::new().with::<Health>();
        let in_lockstep = |world: &World| {
            world.query::<Health>(e).is_ok() == world.has_all(e, &health)
                && world.store::<Health>().unwrap().contains(e) == world.has_all(e, &health)
        };

        assert!(in_lockstep(&world));
        world.initialize::<Health>(e).unwrap();
        assert!(in_lockstep(&world));
        world.detach_component(e, Health::component_type_id()).unwrap();
        assert!(in_lockstep(&world));

        // Committing system output never attaches a component.
        let err = (Health { current: 9 },).commit(&world, e).unwrap_err();
        assert!(matches!(err, EcsError::MissingComponents { .. }));
        assert!(in_lockstep(&world));
        assert!(world.query::<Health>(e).is_err());

        world.initialize::<Health>(e).unwrap();
        assert!(in_lockstep(&world));
        assert_eq!(world.query::<Health>(e).unwrap(), Health::default());
    }

    #[test]
    fn test_published_entity_is_lockable() {
        const COUNT: u64 = 200;
        let world = make_world();
        std::thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..COUNT {
                    world.add_entity();
                }
            });
            s.spawn(|| {
                for raw in 1..=COUNT {
                    let e = EntityId(raw);
                    while !world.registry().contains(e) {
                        std::thread::yield_now();
                    }
                    world.initialize::<Health>(e).unwrap();
                }
            });
        });
        assert_eq!(world.entity_count(), COUNT as usize);
    }

    #[test]
    fn test_set_component_validates() {
        let world = make_world();
        let e = world.add_entity();
        assert!(matches!(
            world.set_component(e, Health { current: 10 }),
            Err(EcsError::ComponentMissing { .. })
        ));

        world.initialize::<Health>(e).unwrap();
        let err = world.set_component(e, Health { current: -1 }).unwrap_err();
        assert!(matches!(err, EcsError::InvalidComponent { component: "Health", .. }));
        assert_eq!(world.query::<Health>(e).unwrap(), Health::default());
    }

    #[test]
    fn test_query_record() {
        let world = make_world();
        let e = world.add_entity();
        world.initialize::<Armor>(e).unwrap();
        world.set_component(e, Armor { rating: 3 }).unwrap();

        let record = world.query_record(e, Armor::component_type_id()).unwrap();
        assert_eq!(record.decode::<Armor>().unwrap(), Armor { rating: 3 });
        assert!(world.query_record(e, Health::component_type_id()).is_err());
    }

    #[test]
    fn test_store_matches_registry() {
        let world = make_world();
        let a = world.add_entity();
        let b = world.add_entity();
        world.initialize::<Health>(a).unwrap();
        world.initialize::<Armor>(b).unwrap();

        for e in [a, b] {
            let attached = world.attached(e).unwrap();
            assert_eq!(
                attached.contains(Health::component_type_id()),
                world.store::<Health>().unwrap().contains(e)
            );
            assert_eq!(
                attached.contains(Armor::component_type_id()),
                world.store::<Armor>().unwrap().contains(e)
            );
        }
        assert_eq!(world.entity_count(), 2);
    }
}
