//! Rendering interface.
//!
//! Components render through the [`Renderer`] trait, which is the only thing
//! the runtime knows about pixels. A window-backed implementation lives in the
//! platform layer; [`DrawList`] records calls instead of drawing them and is
//! what tests and the headless demo use.

use serde::{Deserialize, Serialize};

use crate::asset::{FontHandle, TextureHandle};
use crate::math::Rect;

/// Mirroring applied when a texture is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Low-level drawing primitives.
pub trait Renderer {
    /// Copy `src` (texture pixels) to `dst` (screen pixels).
    fn draw_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect, flip: Flip);

    /// Rasterize `text` with `font` into `dst`. Only `dst.x`/`dst.y` are
    /// binding; the rasterizer picks the size.
    fn draw_text(&mut self, font: FontHandle, text: &str, color: Color, dst: Rect);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Texture {
        texture: TextureHandle,
        src: Rect,
        dst: Rect,
        flip: Flip,
    },
    Text {
        font: FontHandle,
        text: String,
        color: Color,
        dst: Rect,
    },
}

/// A [`Renderer`] that records commands in submission order.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for DrawList {
    fn draw_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect, flip: Flip) {
        self.commands.push(DrawCommand::Texture {
            texture,
            src,
            dst,
            flip,
        });
    }

    fn draw_text(&mut self, font: FontHandle, text: &str, color: Color, dst: Rect) {
        self.commands.push(DrawCommand::Text {
            font,
            text: text.to_string(),
            color,
            dst,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.draw_texture(TextureHandle(1), Rect::new(0, 0, 8, 8), Rect::new(10, 10, 16, 16), Flip::None);
        list.draw_text(FontHandle(0), "hi", Color::WHITE, Rect::new(1, 2, 0, 0));
        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::Texture { texture: TextureHandle(1), .. }));
        assert!(matches!(&list.commands()[1], DrawCommand::Text { text, .. } if text == "hi"));
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn color_alpha_defaults_to_opaque() {
        let c: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(c, Color::rgb(1, 2, 3));
    }
}
