//! # ecs_component
//!
//! The "E" and "C" in ECS. Defines what an entity and a component are, and
//! how component values are stored per entity.
//!
//! This crate provides:
//!
//! - [`Component`] trait: the contract all ECS data must satisfy.
//! - [`EntityId`]: lightweight `u64` entity identifiers.
//! - [`EntityAllocator`]: monotonically increasing ID allocator.
//! - [`ComponentStore`]: typed table mapping entity to component value.
//! - [`ComponentSet`]: the set of component types a system requires.
//! - [`EcsError`]: the error taxonomy shared by every layer of the engine.

pub mod component;
pub mod entity;
pub mod error;
pub mod query;
pub mod store;

pub use component::{Component, ComponentRecord, ComponentTypeId};
pub use entity::{EntityAllocator, EntityId};
pub use error::EcsError;
pub use query::ComponentSet;
pub use store::{ComponentStore, ErasedStore};
