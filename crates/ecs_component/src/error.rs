//! Engine error types.

use crate::component::ComponentTypeId;
use crate::entity::EntityId;
use crate::query::ComponentSet;

/// Errors returned by every core ECS operation.
///
/// Any operation that fails leaves the world exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The entity identifier was never issued by this world.
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// The component type is already attached to the entity.
    #[error("component {component} already attached to {entity}")]
    AlreadyAttached {
        entity: EntityId,
        component: ComponentTypeId,
    },

    /// The component type is not attached to the entity.
    #[error("component {component} missing on {entity}")]
    ComponentMissing {
        entity: EntityId,
        component: ComponentTypeId,
    },

    /// The entity does not carry every component a system requires.
    #[error("{entity} is missing components required by the system: {missing}")]
    MissingComponents {
        entity: EntityId,
        missing: ComponentSet,
    },

    /// No store has been registered for the component type.
    #[error("component type {0} is not registered")]
    UnregisteredComponent(ComponentTypeId),

    /// A record was decoded as a component type other than the one it holds.
    #[error("record holds component {found}, not {expected}")]
    RecordMismatch {
        expected: ComponentTypeId,
        found: ComponentTypeId,
    },

    /// A store for the component type already exists.
    #[error("component type {name} ({id}) is already registered")]
    DuplicateComponent {
        name: &'static str,
        id: ComponentTypeId,
    },

    /// No system is registered under the name.
    #[error("unknown system: {0}")]
    UnknownSystem(String),

    /// A system with the same name is already registered.
    #[error("system {0} is already registered")]
    DuplicateSystem(String),

    /// A value supplied from outside failed the component's validation.
    #[error("invalid {component} value: {reason}")]
    InvalidComponent {
        component: &'static str,
        reason: String,
    },

    /// The system's transform rejected the input (e.g. arithmetic overflow).
    #[error("system {system} failed: {reason}")]
    SystemFailed {
        system: &'static str,
        reason: String,
    },

    /// Failed to encode a component value to MessagePack.
    #[error("failed to encode component: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode a component value from MessagePack.
    #[error("failed to decode component: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}
