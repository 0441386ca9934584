//! Session configuration.

use clap::Parser;
use game_logic::Velocity;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "game_app", about = "Run a game session on the in-process ECS engine")]
pub struct Args {
    /// Number of entities to spawn
    #[arg(short, long, default_value_t = 2)]
    pub entities: usize,

    /// Movement invocations per entity
    #[arg(short, long, default_value_t = 2)]
    pub moves: u32,

    /// Velocity along x for entities that carry one
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub vx: i64,

    /// Velocity along y for entities that carry one
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub vy: i64,

    /// Give every Nth entity a velocity component (0 = none)
    #[arg(long, default_value_t = 2)]
    pub velocity_every: usize,

    /// Label stored in every position (at most 20 bytes)
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Configuration for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Entities spawned at session start.
    pub entities: usize,
    /// Movement invocations applied to each entity.
    pub moves: u32,
    /// Velocity written to entities that carry one.
    pub velocity: Velocity,
    /// Entity `i` gets a velocity when `i % velocity_every == 0`; 0 disables.
    pub velocity_every: usize,
    /// Optional label for every position.
    pub description: Option<String>,
}

impl SessionConfig {
    #[must_use]
    pub fn with_entities(mut self, entities: usize) -> Self {
        self.entities = entities;
        self
    }

    #[must_use]
    pub fn with_moves(mut self, moves: u32) -> Self {
        self.moves = moves;
        self
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_velocity_every(mut self, every: usize) -> Self {
        self.velocity_every = every;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns `true` if the entity spawned at `index` gets a velocity.
    #[must_use]
    pub fn has_velocity(&self, index: usize) -> bool {
        self.velocity_every != 0 && index % self.velocity_every == 0
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            entities: 2,
            moves: 2,
            velocity: Velocity::ZERO,
            velocity_every: 2,
            description: None,
        }
    }
}

impl From<Args> for SessionConfig {
    fn from(args: Args) -> Self {
        Self {
            entities: args.entities,
            moves: args.moves,
            velocity: Velocity::new(args.vx, args.vy),
            velocity_every: args.velocity_every,
            description: args.description,
        }
    }
}
