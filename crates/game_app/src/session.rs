//! Game session: one world plus the actions a player takes.
//!
//! One [`GameSession`] owns exactly one [`World`]. Every action goes through
//! the dispatcher by system name, the same way a remote caller would.

use tracing::{debug, info};

use ecs_component::{ComponentRecord, EcsError, EntityId};
use ecs_world::{Dispatcher, World};
use game_logic::{
    ApplyVelocity, Movement, Position, Velocity, apply_velocity_requirements,
    movement_requirements,
};

use crate::config::SessionConfig;

#[derive(Debug)]
pub struct GameSession {
    world: World,
    dispatcher: Dispatcher,
    config: SessionConfig,
}

impl GameSession {
    /// Build a world with the game's components and systems installed.
    ///
    /// # Errors
    ///
    /// Fails only if installation registers something twice.
    pub fn new(config: SessionConfig) -> Result<Self, EcsError> {
        let mut world = World::new();
        let mut dispatcher = Dispatcher::new();
        game_logic::install(&mut world, &mut dispatcher)?;
        info!(world = %world.id(), ?config, "game session created");
        Ok(Self {
            world,
            dispatcher,
            config,
        })
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn the configured entities, each with a position and, where the
    /// config says so, a velocity.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidComponent`] if the configured description
    /// is too long.
    pub fn spawn_all(&self) -> Result<Vec<EntityId>, EcsError> {
        (0..self.config.entities)
            .map(|index| self.spawn(self.config.has_velocity(index)))
            .collect()
    }

    /// Spawn one entity with a position, and a velocity if `with_velocity`.
    ///
    /// # Errors
    ///
    /// Same as [`GameSession::spawn_all`].
    pub fn spawn(&self, with_velocity: bool) -> Result<EntityId, EcsError> {
        let entity = self.world.add_entity();
        self.world.initialize::<Position>(entity)?;
        if let Some(description) = &self.config.description {
            self.world
                .set_component(entity, Position::default().with_description(description.clone()))?;
        }
        if with_velocity {
            self.world.initialize::<Velocity>(entity)?;
            self.set_velocity(entity, self.config.velocity)?;
        }
        debug!(%entity, with_velocity, "spawned character");
        Ok(entity)
    }

    /// Invoke the movement system once.
    ///
    /// # Errors
    ///
    /// Any error from [`Dispatcher::invoke`].
    pub fn move_entity(&self, entity: EntityId) -> Result<Vec<ComponentRecord>, EcsError> {
        self.dispatcher
            .invoke(&self.world, Movement::NAME, entity, &movement_requirements())
    }

    /// Invoke the movement system the configured number of times, stopping at
    /// the first failure.
    ///
    /// # Errors
    ///
    /// Any error from [`Dispatcher::invoke`].
    pub fn move_repeatedly(&self, entity: EntityId) -> Result<u32, EcsError> {
        for _ in 0..self.config.moves {
            self.move_entity(entity)?;
        }
        Ok(self.config.moves)
    }

    /// Invoke the apply-velocity system once.
    ///
    /// # Errors
    ///
    /// Any error from [`Dispatcher::invoke`];
    /// [`EcsError::MissingComponents`] for entities without a velocity.
    pub fn apply_velocity(&self, entity: EntityId) -> Result<Vec<ComponentRecord>, EcsError> {
        self.dispatcher.invoke(
            &self.world,
            ApplyVelocity::NAME,
            entity,
            &apply_velocity_requirements(),
        )
    }

    /// Change an entity's velocity.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentMissing`] if the entity has no velocity.
    pub fn set_velocity(&self, entity: EntityId, velocity: Velocity) -> Result<(), EcsError> {
        self.world.set_component(entity, velocity)
    }

    /// Current position of `entity`.
    ///
    /// # Errors
    ///
    /// Any error from [`World::query`].
    pub fn position(&self, entity: EntityId) -> Result<Position, EcsError> {
        self.world.query::<Position>(entity)
    }
}
