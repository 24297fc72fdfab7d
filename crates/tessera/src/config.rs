//! Game configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "window_width": 1024, "player_lives": 5, "explosion": { "texture": "boom" } }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::stage::{ExplosionTemplate, ProjectileTemplate, Stage};

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "failed to read config {}: {source}", path.display()),
            ConfigError::Parse(e) => write!(f, "config parse failed: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Target frames per second. 0 runs unpaced.
    pub fps: u32,
    /// Largest frame delta fed to the simulation, in seconds.
    pub max_delta: f32,
    /// Pixels per second.
    pub player_speed: f32,
    /// Enemy projectile hits the player survives, minus one.
    pub player_lives: u32,
    pub projectile: ProjectileTemplate,
    pub explosion: Option<ExplosionTemplate>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "tessera".to_string(),
            window_width: 800,
            window_height: 600,
            fps: 60,
            max_delta: 0.05,
            player_speed: Stage::DEFAULT_PLAYER_SPEED,
            player_lives: 3,
            projectile: ProjectileTemplate::default(),
            explosion: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&text)
    }

    /// A stage sized and tuned from this config.
    pub fn stage(&self) -> Stage {
        let mut stage = Stage::new(self.window_width, self.window_height);
        stage.player_speed = self.player_speed;
        stage.projectile = self.projectile.clone();
        stage.explosion = self.explosion.clone();
        stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = GameConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.player_speed, 400.0);
    }

    #[test]
    fn partial_override() {
        let cfg = GameConfig::from_json_str(
            r#"{ "window_width": 1024, "player_lives": 5, "projectile": { "speed": 900 }, "explosion": { "texture": "boom" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.window_width, 1024);
        assert_eq!(cfg.window_height, 600);
        assert_eq!(cfg.player_lives, 5);
        assert_eq!(cfg.projectile.speed, 900.0);
        assert_eq!(cfg.projectile.texture, "projectile");
        assert_eq!(cfg.explosion.as_ref().unwrap().texture, "boom");

        let stage = cfg.stage();
        assert_eq!(stage.window, Vec2::new(1024.0, 600.0));
        assert!(stage.explosion.is_some());
    }

    #[test]
    fn errors_are_typed() {
        assert!(matches!(GameConfig::from_json_str("[1, 2]"), Err(ConfigError::Parse(_))));
        assert!(matches!(GameConfig::load("/no/such/config.json"), Err(ConfigError::Io { .. })));
    }
}
