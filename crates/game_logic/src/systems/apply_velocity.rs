//! Apply-velocity system. Translates a position by the entity's velocity.

use ecs_component::EcsError;
use ecs_world::System;

use crate::components::{Position, Velocity};

/// Adds `vx`/`vy` of a [`Velocity`] to `x`/`y` of a [`Position`].
///
/// The velocity is read only. A zero velocity still runs and succeeds,
/// leaving the position as it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyVelocity;

impl ApplyVelocity {
    pub const NAME: &'static str = "apply_velocity";
}

impl System for ApplyVelocity {
    type Data = (Position, Velocity);

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&self, (mut position, velocity): Self::Data) -> Result<Self::Data, EcsError> {
        position.x = position
            .x
            .checked_add(velocity.vx)
            .ok_or_else(|| super::overflow(Self::NAME))?;
        position.y = position
            .y
            .checked_add(velocity.vy)
            .ok_or_else(|| super::overflow(Self::NAME))?;
        Ok((position, velocity))
    }
}
