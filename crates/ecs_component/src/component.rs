//! Core [`Component`] trait and the type tag that identifies it.
//!
//! Every piece of data attached to an entity must implement [`Component`].
//! The trait requires `Send + Sync + 'static` so stores can be shared across
//! threads, `Default` so a freshly attached component has a well-defined
//! initial value, and serde support so values can be handed to observers as
//! [`ComponentRecord`]s.
//!
//! ## Type Identity
//!
//! [`ComponentTypeId`] is derived from the component's **string name** using
//! the FNV-1a 64-bit hash algorithm. The tag is therefore stable across runs
//! and builds, and any collaborator holding only the name can compute it.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::error::EcsError;

/// A unique identifier for a component type, derived from its string name
/// using the FNV-1a 64-bit hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] from a component's string name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a Rust component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use serde::{Serialize, Deserialize};
/// use ecs_component::Component;
///
/// #[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// struct Health {
///     current: i64,
///     max: i64,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component:
    Clone + Default + Send + Sync + 'static + Serialize + for<'de> Deserialize<'de>
{
    /// A human-readable name for this component type.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTypeId`] for this component.
    ///
    /// The default implementation hashes [`Component::type_name()`] with
    /// FNV-1a 64-bit.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }

    /// Checks a value supplied from outside the engine before it is stored.
    ///
    /// Values produced by systems and defaults are not re-validated.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// A record pairing an [`EntityId`] with one serialised component value.
///
/// This is what type-erased observers receive: they know the component tag
/// but not the Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// The entity this component belongs to.
    pub entity: EntityId,
    /// The component type the payload encodes.
    pub component: ComponentTypeId,
    /// MessagePack-encoded component bytes (named fields).
    pub data: Vec<u8>,
}

impl ComponentRecord {
    /// Encode a typed component value into a record.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Encode`] if serialisation fails.
    pub fn encode<T: Component>(entity: EntityId, value: &T) -> Result<Self, EcsError> {
        Ok(Self {
            entity,
            component: T::component_type_id(),
            data: rmp_serde::to_vec_named(value)?,
        })
    }

    /// Decode the payload back into a typed component value.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Decode`] if the payload is not a valid `T`, and
    /// [`EcsError::RecordMismatch`] if the record holds a different
    /// component type.
    pub fn decode<T: Component>(&self) -> Result<T, EcsError> {
        let expected = T::component_type_id();
        if self.component != expected {
            return Err(EcsError::RecordMismatch {
                expected,
                found: self.component,
            });
        }
        Ok(rmp_serde::from_slice(&self.data)?)
    }
}
