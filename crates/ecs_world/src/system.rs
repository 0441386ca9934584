//! System abstraction.
//!
//! A [`System`] is a pure transform over the component values of a single
//! entity. It never sees the world: the dispatcher fetches the values named
//! by [`System::Data`], hands them to [`System::execute`], and commits what
//! comes back.

use ecs_component::{Component, ComponentRecord, ComponentSet, EcsError, EntityId};

use crate::world::World;

/// A tuple of component values read from, and written back to, one entity.
///
/// Implemented for tuples of one to four [`Component`] types.
pub trait SystemData: Clone + Send + Sized {
    /// The component types this tuple needs.
    fn required() -> ComponentSet;

    /// Read every value for `entity` from the world.
    ///
    /// # Errors
    ///
    /// Fails if any type is unregistered or not attached.
    fn fetch(world: &World, entity: EntityId) -> Result<Self, EcsError>;

    /// Encode every value as a [`ComponentRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Encode`] if a value cannot be serialised.
    fn records(&self, entity: EntityId) -> Result<Vec<ComponentRecord>, EcsError>;

    /// Write every value back for `entity`.
    ///
    /// Every type must already be attached. All stores are resolved before
    /// the first write, so either every value is written or none is.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnknownEntity`] if the entity was never created.
    /// - [`EcsError::MissingComponents`] if a type is not attached.
    /// - [`EcsError::UnregisteredComponent`] if a store is missing.
    fn commit(&self, world: &World, entity: EntityId) -> Result<(), EcsError>;
}

macro_rules! impl_system_data {
    ($($ty:ident . $idx:tt),+) => {
        impl<$($ty: Component),+> SystemData for ($($ty,)+) {
            fn required() -> ComponentSet {
                ComponentSet::new()$(.with::<$ty>())+
            }

            fn fetch(world: &World, entity: EntityId) -> Result<Self, EcsError> {
                Ok(($(world.store::<$ty>()?.get(entity)?,)+))
            }

            fn records(&self, entity: EntityId) -> Result<Vec<ComponentRecord>, EcsError> {
                Ok(vec![$(ComponentRecord::encode(entity, &self.$idx)?),+])
            }

            fn commit(&self, world: &World, entity: EntityId) -> Result<(), EcsError> {
                let missing = world.registry().missing(entity, &Self::required())?;
                if !missing.is_empty() {
                    return Err(EcsError::MissingComponents { entity, missing });
                }
                let stores = ($(world.store::<$ty>()?,)+);
                $(stores.$idx.set(entity, self.$idx.clone());)+
                Ok(())
            }
        }
    };
}

impl_system_data!(A.0);
impl_system_data!(A.0, B.1);
impl_system_data!(A.0, B.1, C.2);
impl_system_data!(A.0, B.1, C.2, D.3);

/// A named, pure transform over one entity's components.
///
/// # Examples
///
/// ```rust
/// use ecs_component::{Component, EcsError};
/// use ecs_world::System;
/// # #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
/// # struct Health { current: i64 }
/// # impl Component for Health { fn type_name() -> &'static str { "Health" } }
///
/// struct Regenerate;
///
/// impl System for Regenerate {
///     type Data = (Health,);
///
///     fn name(&self) -> &'static str {
///         "regenerate"
///     }
///
///     fn execute(&self, (mut health,): Self::Data) -> Result<Self::Data, EcsError> {
///         health.current += 1;
///         Ok((health,))
///     }
/// }
/// ```
pub trait System: Send + Sync + 'static {
    /// The components this system reads and writes.
    type Data: SystemData;

    /// Unique name the system is invoked by.
    fn name(&self) -> &'static str;

    /// Produce the new component values from the current ones.
    ///
    /// # Errors
    ///
    /// Return [`EcsError::SystemFailed`] to reject the input; nothing is
    /// committed in that case.
    fn execute(&self, data: Self::Data) -> Result<Self::Data, EcsError>;
}

/// Object-safe view of a [`System`] used by the dispatcher's registry.
pub(crate) trait DynSystem: Send + Sync {
    /// Fetch, execute and commit for `entity`. The caller holds the entity
    /// lock and has checked eligibility.
    fn apply(&self, world: &World, entity: EntityId) -> Result<Vec<ComponentRecord>, EcsError>;
}

impl<S: System> DynSystem for S {
    fn apply(&self, world: &World, entity: EntityId) -> Result<Vec<ComponentRecord>, EcsError> {
        let output = self.execute(S::Data::fetch(world, entity)?)?;
        // Encode before committing so an encoding failure leaves the world untouched.
        let records = output.records(entity)?;
        output.commit(world, entity)?;
        Ok(records)
    }
}
