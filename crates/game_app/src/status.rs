//! Player-facing status messages.

use ecs_component::EcsError;

pub const MOVED: &str = "Character moved successfully!";
pub const VELOCITY_APPLIED: &str = "Velocity applied successfully!";

/// Map an engine error to a message telling the player what to do next.
#[must_use]
pub fn status_message(err: &EcsError) -> &'static str {
    match err {
        EcsError::UnknownEntity(_) => "Character not found. Please initialize the game first.",
        EcsError::AlreadyAttached { .. } => "Component already initialized.",
        EcsError::ComponentMissing { .. } => "Component not initialized for this character.",
        EcsError::MissingComponents { .. } => "Initialize required components first.",
        EcsError::UnregisteredComponent(_) => "Unknown component type.",
        EcsError::RecordMismatch { .. } => "Unexpected component data. Please refresh the game.",
        EcsError::DuplicateComponent { .. } | EcsError::DuplicateSystem(_) => {
            "Game is already set up."
        }
        EcsError::UnknownSystem(_) => "Unknown action.",
        EcsError::InvalidComponent { .. } => "Invalid value. Please check your input.",
        EcsError::SystemFailed { .. } => "Move rejected: the character cannot go any further.",
        EcsError::Encode(_) | EcsError::Decode(_) => {
            "Could not read the game state. Please try again."
        }
    }
}

#[cfg(test)]
mod tests {
    use ecs_component::{ComponentSet, ComponentTypeId, EntityId};

    use super::*;

    #[test]
    fn test_missing_components_asks_for_initialization() {
        let err = EcsError::MissingComponents {
            entity: EntityId(1),
            missing: ComponentSet::new().with_id(ComponentTypeId(2)),
        };
        assert_eq!(status_message(&err), "Initialize required components first.");
    }

    #[test]
    fn test_every_core_error_has_distinct_message() {
        let errors = [
            EcsError::UnknownEntity(EntityId(1)),
            EcsError::AlreadyAttached {
                entity: EntityId(1),
                component: ComponentTypeId(1),
            },
            EcsError::ComponentMissing {
                entity: EntityId(1),
                component: ComponentTypeId(1),
            },
            EcsError::MissingComponents {
                entity: EntityId(1),
                missing: ComponentSet::new(),
            },
            EcsError::UnregisteredComponent(ComponentTypeId(1)),
            EcsError::RecordMismatch {
                expected: ComponentTypeId(1),
                found: ComponentTypeId(2),
            },
        ];
        let mut messages: Vec<_> = errors.iter().map(status_message).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }
}
