//! # Sprite: Textured Quad with Sheet Animation
//!
//! A sprite draws one `width × height` cell of a texture at its transform.
//! Animated sprites pick the cell from a sheet laid out as rows of frames:
//!
//! ```text
//!            frame 0   frame 1   frame 2  ...
//!  row 0   ┌─────────┬─────────┬─────────┐   down
//!  row 1   ├─────────┼─────────┼─────────┤   right
//!  row 2   ├─────────┼─────────┼─────────┤   left
//!  row 3   └─────────┴─────────┴─────────┘   up
//! ```
//!
//! Directional sprites use all four rows and switch between them on
//! `SwitchAnimation` events. Non-directional animated sprites have a single
//! row. The frame column is `(elapsed_ms / frame_ms) % frames`, so every
//! sprite sharing a frame rate stays in lockstep.

use serde::{Deserialize, Serialize};

use super::Transform;
use crate::asset::TextureHandle;
use crate::ecs::component::{Component, InitContext, UpdateContext};
use crate::math::{Rect, Vec2};
use crate::render::{Flip, Renderer};

/// Which animation a sprite is playing. Also doubles as a facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    Down = 0,
    Up = 1,
    Right = 2,
    Left = 3,
    Single = 4,
}

impl AnimationKind {
    const COUNT: usize = 5;

    /// Heading in degrees, screen coordinates (y grows downward).
    pub fn angle_degrees(self) -> f32 {
        match self {
            AnimationKind::Right | AnimationKind::Single => 0.0,
            AnimationKind::Down => 90.0,
            AnimationKind::Left => 180.0,
            AnimationKind::Up => 270.0,
        }
    }
}

/// One row of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub row: u32,
    pub frames: u32,
    pub frame_ms: u32,
}

impl Animation {
    /// Column of the frame showing at `elapsed_ms`.
    pub fn frame_at(&self, elapsed_ms: u64) -> u32 {
        let frame_ms = u64::from(self.frame_ms.max(1));
        let frames = u64::from(self.frames.max(1));
        ((elapsed_ms / frame_ms) % frames) as u32
    }
}

#[derive(Debug, Clone)]
pub struct Sprite {
    texture_id: String,
    texture: Option<TextureHandle>,
    animations: [Option<Animation>; AnimationKind::COUNT],
    current: Option<AnimationKind>,
    /// Drawn in screen space, ignoring the camera.
    fixed: bool,
    pub flip: Flip,
    src: Rect,
    dst: Rect,
}

impl Sprite {
    /// A static sprite showing the top-left cell of `texture_id`.
    pub fn new(texture_id: &str) -> Self {
        Self {
            texture_id: texture_id.to_string(),
            texture: None,
            animations: [None; AnimationKind::COUNT],
            current: None,
            fixed: false,
            flip: Flip::None,
            src: Rect::default(),
            dst: Rect::default(),
        }
    }

    /// An animated sprite. Directional sheets get the four rows down, right,
    /// left, up and start facing down; otherwise row 0 plays as `Single`.
    pub fn animated(texture_id: &str, frames: u32, frame_ms: u32, directional: bool) -> Self {
        let mut sprite = Self::new(texture_id);
        let anim = |row| Some(Animation { row, frames, frame_ms });
        if directional {
            sprite.animations[AnimationKind::Down as usize] = anim(0);
            sprite.animations[AnimationKind::Right as usize] = anim(1);
            sprite.animations[AnimationKind::Left as usize] = anim(2);
            sprite.animations[AnimationKind::Up as usize] = anim(3);
            sprite.current = Some(AnimationKind::Down);
        } else {
            sprite.animations[AnimationKind::Single as usize] = anim(0);
            sprite.current = Some(AnimationKind::Single);
        }
        sprite
    }

    /// Draw in screen space instead of world space.
    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn with_flip(mut self, flip: Flip) -> Self {
        self.flip = flip;
        self
    }

    /// Switch to another animation. Unknown kinds are ignored.
    pub fn play(&mut self, kind: AnimationKind) {
        if self.animations[kind as usize].is_some() {
            self.current = Some(kind);
        } else {
            log::debug!("Sprite '{}' has no {:?} animation", self.texture_id, kind);
        }
    }

    pub fn current_animation(&self) -> Option<AnimationKind> {
        self.current
    }

    pub fn is_animated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn src(&self) -> Rect {
        self.src
    }

    pub fn dst(&self) -> Rect {
        self.dst
    }

    fn refresh(&mut self, t: &Transform, elapsed_ms: u64, camera: Vec2) {
        self.src.w = t.width as i32;
        self.src.h = t.height as i32;
        match self.current.and_then(|k| self.animations[k as usize]) {
            Some(anim) => {
                self.src.x = self.src.w * anim.frame_at(elapsed_ms) as i32;
                self.src.y = anim.row as i32 * self.src.h;
            }
            None => {
                self.src.x = 0;
                self.src.y = 0;
            }
        }
        let offset = if self.fixed { Vec2::ZERO } else { camera };
        let size = t.size();
        self.dst = Rect::from_pos_size(t.position, size.x, size.y).offset_by(offset);
    }
}

impl Component for Sprite {
    fn name(&self) -> &'static str {
        "Sprite"
    }

    fn initialize(&mut self, ctx: &mut InitContext<'_>) {
        self.texture = ctx.assets.texture(&self.texture_id);
        if self.texture.is_none() {
            log::warn!(
                "Sprite on '{}' {}: texture '{}' is not registered, it will not be drawn",
                ctx.owner_name,
                ctx.owner,
                self.texture_id
            );
        }
        match ctx.siblings.get::<Transform>() {
            Some(t) => self.refresh(t, 0, ctx.stage.camera),
            None => log::error!("Sprite on '{}' {} needs a Transform", ctx.owner_name, ctx.owner),
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>, _dt: f32) {
        if let Some(t) = ctx.siblings.get::<Transform>() {
            self.refresh(t, ctx.elapsed_ms, ctx.stage.camera);
        }
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        if let Some(texture) = self.texture {
            renderer.draw_texture(texture, self.src, self.dst, self.flip);
        }
    }
}
