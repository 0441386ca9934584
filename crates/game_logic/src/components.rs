//! Game component definitions.

use ecs_component::Component;
use serde::{Deserialize, Serialize};

/// A position in integer world units, with an optional short label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    /// Free-form label shown next to the entity. At most
    /// [`Position::DESCRIPTION_MAX_LEN`] bytes.
    pub description: String,
}

impl Position {
    /// Maximum length of [`Position::description`] in bytes.
    pub const DESCRIPTION_MAX_LEN: usize = 20;

    /// Create an unlabelled position.
    #[must_use]
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self {
            x,
            y,
            z,
            description: String::new(),
        }
    }

    /// Attach a label to the position.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the coordinates as a tuple.
    #[must_use]
    pub fn coords(&self) -> (i64, i64, i64) {
        (self.x, self.y, self.z)
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }

    fn validate(&self) -> Result<(), String> {
        if self.description.len() > Self::DESCRIPTION_MAX_LEN {
            return Err(format!(
                "description is {} bytes, limit is {}",
                self.description.len(),
                Self::DESCRIPTION_MAX_LEN
            ));
        }
        Ok(())
    }
}

/// A planar velocity in world units per application.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Velocity {
    pub vx: i64,
    pub vy: i64,
}

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self { vx: 0, vy: 0 };

    #[must_use]
    pub const fn new(vx: i64, vy: i64) -> Self {
        Self { vx, vy }
    }

    /// Returns `true` if applying this velocity leaves a position unchanged.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.vx == 0 && self.vy == 0
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}
