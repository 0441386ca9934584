//! # game_logic
//!
//! The concrete game built on the engine: [`Position`] and [`Velocity`]
//! components, and the [`Movement`] and [`ApplyVelocity`] systems.
//!
//! [`install`] registers all of them with a fresh world and dispatcher.

pub mod components;
pub mod systems;

pub use components::{Position, Velocity};
pub use systems::{ApplyVelocity, Movement};

use ecs_component::{ComponentSet, EcsError};
use ecs_world::{Dispatcher, World};
use tracing::info;

/// Register the game's component types with `world` and its systems with
/// `dispatcher`.
///
/// # Errors
///
/// Fails if any of them is already registered.
pub fn install(world: &mut World, dispatcher: &mut Dispatcher) -> Result<(), EcsError> {
    world.register::<Position>()?;
    world.register::<Velocity>()?;
    dispatcher.register(Movement)?;
    dispatcher.register(ApplyVelocity)?;
    let systems: Vec<_> = dispatcher.iter().map(|info| info.name).collect();
    info!(
        world = %world.id(),
        components = 2,
        ?systems,
        "game logic installed"
    );
    Ok(())
}

/// The component types the [`Movement`] system is invoked with.
#[must_use]
pub fn movement_requirements() -> ComponentSet {
    ComponentSet::new().with::<Position>()
}

/// The component types the [`ApplyVelocity`] system is invoked with.
#[must_use]
pub fn apply_velocity_requirements() -> ComponentSet {
    ComponentSet::new().with::<Position>().with::<Velocity>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_registers_both_systems() {
        let mut world = World::new();
        let mut dispatcher = Dispatcher::new();
        install(&mut world, &mut dispatcher).unwrap();

        let mut names: Vec<_> = dispatcher.iter().map(|info| info.name).collect();
        names.sort_unstable();
        assert_eq!(names, [ApplyVelocity::NAME, Movement::NAME]);
        assert_eq!(
            dispatcher.get(ApplyVelocity::NAME).unwrap().required,
            apply_velocity_requirements()
        );
        assert!(matches!(
            install(&mut world, &mut dispatcher),
            Err(EcsError::DuplicateComponent { .. })
        ));
    }
}
