//! One cell of a tile map.

use crate::asset::TextureHandle;
use crate::ecs::component::{Component, InitContext, UpdateContext};
use crate::math::{Rect, Vec2};
use crate::render::{Flip, Renderer};

/// A fixed `tile_size` square cut from a tileset, drawn at a world position.
#[derive(Debug, Clone)]
pub struct Tile {
    texture_id: String,
    texture: Option<TextureHandle>,
    src: Rect,
    position: Vec2,
    /// On-screen edge length in pixels.
    size: i32,
    dst: Rect,
}

impl Tile {
    pub fn new(texture_id: &str, src_x: i32, src_y: i32, position: Vec2, tile_size: u32, scale: f32) -> Self {
        let size = (tile_size as f32 * scale) as i32;
        Self {
            texture_id: texture_id.to_string(),
            texture: None,
            src: Rect::new(src_x, src_y, tile_size as i32, tile_size as i32),
            position,
            size,
            dst: Rect::new(position.x as i32, position.y as i32, size, size),
        }
    }

    pub fn src(&self) -> Rect {
        self.src
    }

    pub fn dst(&self) -> Rect {
        self.dst
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

impl Component for Tile {
    fn name(&self) -> &'static str {
        "Tile"
    }

    fn initialize(&mut self, ctx: &mut InitContext<'_>) {
        self.texture = ctx.assets.texture(&self.texture_id);
        if self.texture.is_none() {
            log::warn!("Tile {}: tileset '{}' is not registered", ctx.owner, self.texture_id);
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>, _dt: f32) {
        self.dst = Rect::from_pos_size(self.position, self.size as f32, self.size as f32)
            .offset_by(ctx.stage.camera);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        if let Some(texture) = self.texture {
            renderer.draw_texture(texture, self.src, self.dst, Flip::None);
        }
    }
}
