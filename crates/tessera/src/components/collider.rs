//! Tagged collision rectangle.

use super::Transform;
use crate::collision::ColliderTag;
use crate::ecs::component::{Component, InitContext, UpdateContext};
use crate::math::{Rect, Vec2};

/// A collision box that mirrors its owner's transform every frame.
///
/// `rect` is in world space and is what the collision pass tests.
/// `screen_rect` is the same box relative to the camera.
#[derive(Debug, Clone)]
pub struct Collider {
    pub tag: ColliderTag,
    rect: Rect,
    screen_rect: Rect,
}

impl Collider {
    pub fn new(tag: ColliderTag) -> Self {
        Self {
            tag,
            rect: Rect::default(),
            screen_rect: Rect::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn screen_rect(&self) -> Rect {
        self.screen_rect
    }

    fn sync(&mut self, t: &Transform, camera: Vec2) {
        let size = t.size();
        self.rect = Rect::from_pos_size(t.position, size.x, size.y);
        self.screen_rect = self.rect.offset_by(camera);
    }
}

impl Component for Collider {
    fn name(&self) -> &'static str {
        "Collider"
    }

    fn initialize(&mut self, ctx: &mut InitContext<'_>) {
        match ctx.siblings.get::<Transform>() {
            Some(t) => self.sync(t, ctx.stage.camera),
            None => log::error!(
                "Collider ({}) on '{}' {} needs a Transform",
                self.tag.as_str(),
                ctx.owner_name,
                ctx.owner
            ),
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>, _dt: f32) {
        if let Some(t) = ctx.siblings.get::<Transform>() {
            self.sync(t, ctx.stage.camera);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_scales_and_offsets() {
        let mut c = Collider::new(ColliderTag::Enemy);
        let t = Transform::new(Vec2::new(100.0, 40.0), Vec2::ZERO, 16.0, 16.0, 3.0);
        c.sync(&t, Vec2::new(50.0, 0.0));
        assert_eq!(c.rect(), Rect::new(100, 40, 48, 48));
        assert_eq!(c.screen_rect(), Rect::new(50, 40, 48, 48));
    }
}
