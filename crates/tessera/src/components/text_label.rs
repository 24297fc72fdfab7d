//! Screen-space text.

use crate::asset::FontHandle;
use crate::ecs::component::{Component, InitContext};
use crate::math::{Rect, Vec2};
use crate::render::{Color, Renderer};

/// A string drawn at a fixed screen position. Rasterization is left to the
/// renderer's `draw_text`.
#[derive(Debug, Clone)]
pub struct TextLabel {
    pub position: Vec2,
    pub color: Color,
    text: String,
    font_id: String,
    font: Option<FontHandle>,
}

impl TextLabel {
    pub fn new(position: Vec2, text: &str, font_id: &str, color: Color) -> Self {
        Self {
            position,
            color,
            text: text.to_string(),
            font_id: font_id.to_string(),
            font: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn font(&self) -> Option<FontHandle> {
        self.font
    }
}

impl Component for TextLabel {
    fn name(&self) -> &'static str {
        "TextLabel"
    }

    fn initialize(&mut self, ctx: &mut InitContext<'_>) {
        self.font = ctx.assets.font(&self.font_id);
        if self.font.is_none() {
            log::warn!(
                "TextLabel on '{}' {}: font '{}' is not registered",
                ctx.owner_name,
                ctx.owner,
                self.font_id
            );
        }
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let Some(font) = self.font else {
            return;
        };
        let dst = Rect::new(self.position.x as i32, self.position.y as i32, 0, 0);
        renderer.draw_text(font, &self.text, self.color, dst);
    }
}
