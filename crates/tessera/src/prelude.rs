//! Convenience re-exports: `use tessera::prelude::*` for the common items.

// Core
pub use crate::asset::{AssetProvider, AssetRegistry, FontHandle, TextureHandle};
pub use crate::collision::{ColliderTag, check_rect_collision};
pub use crate::ecs::{Component, Entity, EntityId, EntityManager, Layer};
pub use crate::event::{Event, EventQueue};
pub use crate::game::{Game, GameStatus, Platform};
pub use crate::input::{Input, InputSource, InputState, KeyCode};
pub use crate::math::{Rect, Vec2};
pub use crate::render::{Color, DrawCommand, DrawList, Flip, Renderer};
pub use crate::stage::{ExplosionTemplate, ProjectileTemplate, Stage};
pub use crate::time::FrameClock;

// Loading
pub use crate::config::{ConfigError, GameConfig};
pub use crate::level::{LevelData, LevelError};
pub use crate::tilemap::TileMap;

// Components
pub use crate::components::{
    AnimationKind, Collider, KeyboardControl, LifeTimer, ProjectileEmitter, Sprite, TextLabel,
    Tile, Transform,
};
