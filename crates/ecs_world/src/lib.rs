//! # ecs_world
//!
//! The runtime half of the game-state engine: the [`World`] that owns one
//! session's entities and component stores, the [`EntityRegistry`] that tracks
//! which components each entity carries, and the [`Dispatcher`] that runs
//! [`System`]s against a single entity.
//!
//! ## Usage
//!
//! ```rust
//! use ecs_component::{Component, ComponentSet, EcsError};
//! use ecs_world::{Dispatcher, System, World};
//!
//! #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
//! struct Counter { value: i64 }
//!
//! impl Component for Counter {
//!     fn type_name() -> &'static str { "Counter" }
//! }
//!
//! struct Increment;
//!
//! impl System for Increment {
//!     type Data = (Counter,);
//!     fn name(&self) -> &'static str { "increment" }
//!     fn execute(&self, (mut c,): Self::Data) -> Result<Self::Data, EcsError> {
//!         c.value += 1;
//!         Ok((c,))
//!     }
//! }
//!
//! let mut world = World::new();
//! world.register::<Counter>().unwrap();
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register(Increment).unwrap();
//!
//! let e = world.add_entity();
//! world.initialize::<Counter>(e).unwrap();
//! dispatcher
//!     .invoke(&world, "increment", e, &ComponentSet::new().with::<Counter>())
//!     .unwrap();
//! assert_eq!(world.query::<Counter>(e).unwrap().value, 1);
//! ```

pub mod dispatcher;
pub mod registry;
pub mod system;
pub mod world;

pub use dispatcher::{Dispatcher, SystemInfo};
pub use registry::EntityRegistry;
pub use system::{System, SystemData};
pub use world::{World, WorldId};
