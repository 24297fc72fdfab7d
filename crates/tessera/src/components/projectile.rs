//! Straight-line projectile motion with a range limit.

use super::Transform;
use crate::ecs::component::{Component, InitContext, UpdateContext};
use crate::math::Vec2;

/// Launches its owner at `speed` along `angle_deg` when attached. Once the
/// owner is farther than `range` from where it started it either jumps back
/// to the start (`looping`, for turret-style emitters) or is destroyed.
#[derive(Debug, Clone)]
pub struct ProjectileEmitter {
    pub speed: f32,
    /// Degrees, clockwise from +x in screen coordinates.
    pub angle_deg: f32,
    pub range: f32,
    pub looping: bool,
    origin: Vec2,
}

impl ProjectileEmitter {
    pub fn new(speed: f32, angle_deg: f32, range: f32, looping: bool) -> Self {
        Self {
            speed,
            angle_deg,
            range,
            looping,
            origin: Vec2::ZERO,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.angle_deg.to_radians()) * self.speed
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }
}

impl Component for ProjectileEmitter {
    fn name(&self) -> &'static str {
        "ProjectileEmitter"
    }

    fn initialize(&mut self, ctx: &mut InitContext<'_>) {
        let velocity = self.velocity();
        match ctx.siblings.get_mut::<Transform>() {
            Some(t) => {
                t.velocity = velocity;
                self.origin = t.position;
            }
            None => log::error!(
                "ProjectileEmitter on '{}' {} needs a Transform",
                ctx.owner_name,
                ctx.owner
            ),
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>, _dt: f32) {
        let Some(t) = ctx.siblings.get_mut::<Transform>() else {
            return;
        };
        if t.position.distance_squared(self.origin) <= self.range * self.range {
            return;
        }
        if self.looping {
            t.position = self.origin;
        } else {
            ctx.destroy_owner();
        }
    }
}
