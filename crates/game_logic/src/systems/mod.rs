//! Systems that move entities.

pub mod apply_velocity;
pub mod movement;

pub use apply_velocity::ApplyVelocity;
pub use movement::Movement;

use ecs_component::EcsError;

fn overflow(system: &'static str) -> EcsError {
    EcsError::SystemFailed {
        system,
        reason: "position overflow".to_string(),
    }
}
