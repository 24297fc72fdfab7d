//! # Tessera: Entity-Component Runtime for 2D Tile Games
//!
//! The runtime core of a top-down, tile-based action game: entities with
//! ordered components, a manager that owns them, a deferred event queue for
//! cross-entity notifications, and an axis-aligned collision pass.
//!
//! Windowing, pixel decoding, and text rasterization stay outside; the crate
//! talks to them through [`Platform`](game::Platform),
//! [`Renderer`](render::Renderer), [`AssetProvider`](asset::AssetProvider),
//! and [`InputSource`](input::InputSource).
//!
//! Start with `use tessera::prelude::*` and build a [`Game`](game::Game).

pub mod asset;
pub mod collision;
pub mod components;
pub mod config;
pub mod ecs;
pub mod event;
pub mod game;
pub mod input;
pub mod level;
pub mod math;
pub mod prelude;
pub mod render;
pub mod stage;
pub mod tilemap;
pub mod time;
