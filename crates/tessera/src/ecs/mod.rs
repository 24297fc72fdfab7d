//! # Entity-Component Core
//!
//! Objects are [`Entity`] values owning an ordered list of components; the
//! [`EntityManager`] owns every entity. There are no systems or queries:
//! each component carries its own `update`/`render` behaviour and entities
//! talk to each other only through the event queue.
//!
//! ## Module Overview
//!
//! - [`entity`]: ids, names, layers, and the entity container
//! - [`component`]: the component trait, closed kind enum, hook contexts
//! - [`manager`]: indices, frame loop, event handlers, collision pass

pub mod component;
pub mod entity;
pub mod manager;

pub use component::{AnyComponent, Component, ComponentKind, ComponentType, InitContext, Siblings, UpdateContext};
pub use entity::{Entity, EntityId, EntityName, Layer, TILE_NAME};
#[cfg(feature = "diagnostics")]
pub use manager::FrameStats;
pub use manager::{EntityBuilder, EntityManager};
