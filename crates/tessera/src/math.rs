//! Math types and glam re-exports.
//!
//! World positions and velocities are [`Vec2`] (pixels, pixels per second).
//! Source, destination, and collider rectangles are integer pixel [`Rect`]s,
//! which is what the renderer and the overlap test consume.

pub use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned pixel rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a float position and size, truncating toward zero.
    pub fn from_pos_size(pos: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: pos.x as i32,
            y: pos.y as i32,
            w: w as i32,
            h: h as i32,
        }
    }

    /// Return a copy moved by `(-offset.x, -offset.y)`.
    ///
    /// Used to turn a world-space rectangle into a screen-space one.
    pub fn offset_by(self, offset: Vec2) -> Self {
        Self {
            x: self.x - offset.x as i32,
            y: self.y - offset.y as i32,
            ..self
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}
