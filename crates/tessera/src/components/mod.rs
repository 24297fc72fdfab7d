//! Built-in component kinds.
//!
//! | Component | Needs | Does |
//! |---|---|---|
//! | [`Transform`] | | position, velocity, size, scale; integrates velocity |
//! | [`Sprite`] | `Transform` | draws a texture region, optionally animated |
//! | [`KeyboardControl`] | | turns key state into movement/shoot events |
//! | [`Collider`] | `Transform` | tagged rectangle mirroring the transform |
//! | [`LifeTimer`] | | destroys its owner after a duration |
//! | [`ProjectileEmitter`] | `Transform` | launches the owner and expires it past a range |
//! | [`TextLabel`] | | draws a string with a registered font |
//! | [`Tile`] | | one cell of the tile map |
//!
//! Attach `Transform` first; the others resolve it while initializing.

pub mod collider;
pub mod keyboard;
pub mod life_timer;
pub mod projectile;
pub mod sprite;
pub mod text_label;
pub mod tile;
pub mod transform;

pub use collider::Collider;
pub use keyboard::KeyboardControl;
pub use life_timer::LifeTimer;
pub use projectile::ProjectileEmitter;
pub use sprite::{Animation, AnimationKind, Sprite};
pub use text_label::TextLabel;
pub use tile::Tile;
pub use transform::Transform;
