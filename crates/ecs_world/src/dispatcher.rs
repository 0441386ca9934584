//! System dispatcher: eligibility checks and atomic commits.
//!
//! The dispatcher keeps a registry of systems by name. An invocation names a
//! system, a target entity, and the component types the caller expects the
//! system to touch. The entity must carry all of them (and everything the
//! system itself declares) before any system code runs.

use std::collections::HashMap;

use tracing::debug;

use ecs_component::{ComponentRecord, ComponentSet, EcsError, EntityId};

use crate::system::{DynSystem, System, SystemData};
use crate::world::World;

/// Information about a registered system.
pub struct SystemInfo {
    /// The system's name.
    pub name: &'static str,
    /// The component types the system declares.
    pub required: ComponentSet,
    system: Box<dyn DynSystem>,
}

impl std::fmt::Debug for SystemInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemInfo")
            .field("name", &self.name)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Registry of systems plus the invocation entry points.
#[derive(Debug, Default)]
pub struct Dispatcher {
    /// Systems keyed by name.
    systems: HashMap<&'static str, SystemInfo>,
}

impl Dispatcher {
    /// Create a dispatcher with no systems.
    #[must_use]
    pub fn new() -> Self {
        Self {
            systems: HashMap::new(),
        }
    }

    /// Register a system under its [`System::name`].
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DuplicateSystem`] if the name is taken.
    pub fn register<S: System>(&mut self, system: S) -> Result<(), EcsError> {
        let name = system.name();
        if self.systems.contains_key(name) {
            return Err(EcsError::DuplicateSystem(name.to_string()));
        }
        let required = S::Data::required();
        debug!(system = name, required = %required, "registered system");
        self.systems.insert(
            name,
            SystemInfo {
                name,
                required,
                system: Box::new(system),
            },
        );
        Ok(())
    }

    /// Invoke the system registered as `name` on `entity`.
    ///
    /// The entity must carry every type in `required` as well as every type
    /// the system declares. On success the new values are committed and
    /// returned as records, one per component the system touched.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnknownSystem`] if no system has that name.
    /// - [`EcsError::UnknownEntity`] if the entity was never created.
    /// - [`EcsError::MissingComponents`] if the entity lacks a required type.
    /// - [`EcsError::SystemFailed`] if the system rejected its input.
    ///
    /// No component is modified when an error is returned.
    pub fn invoke(
        &self,
        world: &World,
        name: &str,
        entity: EntityId,
        required: &ComponentSet,
    ) -> Result<Vec<ComponentRecord>, EcsError> {
        let info = self
            .systems
            .get(name)
            .ok_or_else(|| EcsError::UnknownSystem(name.to_string()))?;
        let required = required.union(&info.required);
        let records = dispatch(world, info.name, entity, &required, |world| {
            info.system.apply(world, entity)
        })?;
        debug!(system = info.name, %entity, components = records.len(), "system applied");
        Ok(records)
    }

    /// Run `system` on `entity` directly, returning the committed values.
    ///
    /// The system does not need to be registered. Eligibility and atomicity
    /// are the same as for [`Dispatcher::invoke`].
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::invoke`], minus [`EcsError::UnknownSystem`].
    pub fn run<S: System>(world: &World, system: &S, entity: EntityId) -> Result<S::Data, EcsError> {
        let required = S::Data::required();
        dispatch(world, system.name(), entity, &required, |world| {
            let output = system.execute(S::Data::fetch(world, entity)?)?;
            output.commit(world, entity)?;
            Ok(output)
        })
    }

    /// Returns information about a system by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SystemInfo> {
        self.systems.get(name)
    }

    /// Returns an iterator over all registered systems.
    pub fn iter(&self) -> impl Iterator<Item = &SystemInfo> {
        self.systems.values()
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }
}

/// Check eligibility and run `body` inside the entity's critical section.
fn dispatch<R>(
    world: &World,
    system: &'static str,
    entity: EntityId,
    required: &ComponentSet,
    body: impl FnOnce(&World) -> Result<R, EcsError>,
) -> Result<R, EcsError> {
    world.exclusive(entity, |world| {
        let missing = world.registry().missing(entity, required)?;
        if !missing.is_empty() {
            debug!(system, %entity, %missing, "system rejected: missing components");
            return Err(EcsError::MissingComponents { entity, missing });
        }
        body(world)
    })
}
