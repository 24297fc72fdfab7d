//! Shared per-level state: camera, window, map bounds, and spawn templates.
//!
//! The [`Stage`] is owned by the [`EntityManager`](crate::ecs::EntityManager)
//! and lent read-only to components while they initialize and update.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// What a shot fired by `PlayerShoot` looks like and how it flies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTemplate {
    pub texture: String,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    /// Pixels per second.
    pub speed: f32,
    /// Pixels travelled before the projectile expires.
    pub range: f32,
}

impl Default for ProjectileTemplate {
    fn default() -> Self {
        Self {
            texture: "projectile".to_string(),
            width: 4.0,
            height: 4.0,
            scale: 1.0,
            speed: 600.0,
            range: 300.0,
        }
    }
}

/// The short-lived effect spawned where an enemy dies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionTemplate {
    pub texture: String,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub frames: u32,
    pub frame_ms: u32,
    pub duration_ms: u32,
}

impl Default for ExplosionTemplate {
    fn default() -> Self {
        Self {
            texture: "explosion".to_string(),
            width: 32.0,
            height: 32.0,
            scale: 1.0,
            frames: 8,
            frame_ms: 60,
            duration_ms: 480,
        }
    }
}

/// Camera and level bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// World position of the camera's top-left corner.
    pub camera: Vec2,
    /// Window size in pixels.
    pub window: Vec2,
    /// Size of the level map in pixels. Zero means unbounded.
    pub map_size: Vec2,
    /// Player movement speed in pixels per second.
    pub player_speed: f32,
    pub projectile: ProjectileTemplate,
    pub explosion: Option<ExplosionTemplate>,
}

impl Stage {
    pub const DEFAULT_PLAYER_SPEED: f32 = 400.0;

    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            camera: Vec2::ZERO,
            window: Vec2::new(window_width as f32, window_height as f32),
            map_size: Vec2::ZERO,
            player_speed: Self::DEFAULT_PLAYER_SPEED,
            projectile: ProjectileTemplate::default(),
            explosion: None,
        }
    }

    /// Largest camera position that keeps the window inside the map.
    pub fn camera_max(&self) -> Vec2 {
        (self.map_size - self.window).max(Vec2::ZERO)
    }

    /// Center the camera on `target`, clamped to the map.
    pub fn follow(&mut self, target: Vec2) {
        let wanted = target - self.window * 0.5;
        self.camera = if self.map_size == Vec2::ZERO {
            wanted.max(Vec2::ZERO)
        } else {
            wanted.clamp(Vec2::ZERO, self.camera_max())
        };
    }

    /// Keep a box of `size` at `pos` inside the map. No-op while the map size
    /// is unknown.
    pub fn clamp_to_map(&self, pos: Vec2, size: Vec2) -> Vec2 {
        if self.map_size == Vec2::ZERO {
            return pos;
        }
        let max = (self.map_size - size).max(Vec2::ZERO);
        pos.clamp(Vec2::ZERO, max)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_centers_and_clamps() {
        let mut stage = Stage::new(800, 600);
        stage.map_size = Vec2::new(2000.0, 1000.0);

        stage.follow(Vec2::new(1000.0, 500.0));
        assert_eq!(stage.camera, Vec2::new(600.0, 200.0));

        stage.follow(Vec2::new(10.0, 10.0));
        assert_eq!(stage.camera, Vec2::ZERO);

        stage.follow(Vec2::new(1990.0, 990.0));
        assert_eq!(stage.camera, Vec2::new(1200.0, 400.0));
    }

    #[test]
    fn clamp_to_map_respects_size() {
        let mut stage = Stage::default();
        assert_eq!(stage.clamp_to_map(Vec2::new(-5.0, 9999.0), Vec2::ONE), Vec2::new(-5.0, 9999.0));

        stage.map_size = Vec2::new(100.0, 100.0);
        let p = stage.clamp_to_map(Vec2::new(-5.0, 95.0), Vec2::new(10.0, 10.0));
        assert_eq!(p, Vec2::new(0.0, 90.0));
    }
}
