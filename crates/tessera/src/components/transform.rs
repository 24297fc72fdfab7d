//! Position, velocity, and size.

use crate::ecs::component::{Component, UpdateContext};
use crate::math::Vec2;

/// Where an entity is and how fast it moves.
///
/// `width`/`height` are the unscaled size in pixels (for sprites, the size of
/// one frame on the sheet); the on-screen size is multiplied by `scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    /// Keep the entity inside the level map.
    pub clamp_to_map: bool,
}

impl Transform {
    pub fn new(position: Vec2, velocity: Vec2, width: f32, height: f32, scale: f32) -> Self {
        Self {
            position,
            velocity,
            width,
            height,
            scale,
            clamp_to_map: true,
        }
    }

    /// A stationary transform with scale 1.
    pub fn at(position: Vec2, width: f32, height: f32) -> Self {
        Self::new(position, Vec2::ZERO, width, height, 1.0)
    }

    /// Let the entity leave the map (projectiles, effects).
    pub fn unclamped(mut self) -> Self {
        self.clamp_to_map = false;
        self
    }

    /// Scaled size in pixels.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * self.scale
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size() * 0.5
    }
}

impl Component for Transform {
    fn name(&self) -> &'static str {
        "Transform"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>, dt: f32) {
        self.position += self.velocity * dt;
        if self.clamp_to_map {
            self.position = ctx.stage.clamp_to_map(self.position, self.size());
        }
    }
}
