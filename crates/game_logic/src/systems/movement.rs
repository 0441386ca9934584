//! Movement system. Steps a position diagonally by one unit.

use ecs_component::EcsError;
use ecs_world::System;

use crate::components::Position;

/// Adds one to `x` and `y` of a [`Position`]; `z` is untouched.
///
/// Repeated application accumulates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Movement;

impl Movement {
    pub const NAME: &'static str = "movement";
}

impl System for Movement {
    type Data = (Position,);

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&self, (mut position,): Self::Data) -> Result<Self::Data, EcsError> {
        position.x = position.x.checked_add(1).ok_or_else(|| super::overflow(Self::NAME))?;
        position.y = position.y.checked_add(1).ok_or_else(|| super::overflow(Self::NAME))?;
        Ok((position,))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_one_step() {
        let (p,) = Movement.execute((Position::default(),)).unwrap();
        assert_eq!(p.coords(), (1, 1, 0));
    }

    #[test]
    fn test_accumulates() {
        let (p,) = Movement.execute((Position::default(),)).unwrap();
        let (p,) = Movement.execute((p,)).unwrap();
        assert_eq!(p.coords(), (2, 2, 0));
    }

    #[test]
    fn test_keeps_z_and_description() {
        let start = Position::new(-4, 7, 9).with_description("scout");
        let (p,) = Movement.execute((start,)).unwrap();
        assert_eq!(p.coords(), (-3, 8, 9));
        assert_eq!(p.description, "scout");
    }

    #[test]
    fn test_overflow_is_rejected() {
        let err = Movement
            .execute((Position::new(0, i64::MAX, 0),))
            .unwrap_err();
        assert!(matches!(err, EcsError::SystemFailed { system: "movement", .. }));
    }
}
