//! Game loop.
//!
//! [`Game`] owns the [`EntityManager`], keyboard state, and frame clock, and
//! drives them through a [`Platform`], the thin layer that owns the real
//! window, pumps OS events, and presents frames.
//!
//! # Example
//!
//! ```ignore
//! use tessera::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     env_logger::init();
//!     let mut game = Game::new(GameConfig::load("config.json")?);
//!     game.load_level_file("levels/level1.json")?;
//!     let status = game.run(&mut MyWindow::open(game.config())?);
//!     println!("{status:?}");
//!     Ok(())
//! }
//! ```

use std::path::Path;

use crate::collision::ColliderTag;
use crate::components::Transform;
use crate::config::GameConfig;
use crate::ecs::{EntityId, EntityManager};
use crate::input::{InputSource, InputState, KeyCode};
use crate::level::{LevelData, LevelError};
use crate::render::Renderer;
use crate::time::FrameClock;

/// Window, input pump, and presentation.
pub trait Platform {
    /// Feed pending key presses/releases into `input`. Returns `false` once
    /// the window was asked to close.
    fn poll_input(&mut self, input: &mut InputState) -> bool;

    /// Where this frame is drawn.
    fn renderer(&mut self) -> &mut dyn Renderer;

    /// Show the finished frame.
    fn present(&mut self) {}
}

/// How the current level is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// The player touched an enemy or ran out of lives.
    GameOver,
    /// The player reached a `LEVEL_COMPLETE` collider.
    LevelComplete,
}

pub struct Game {
    config: GameConfig,
    entities: EntityManager,
    input: InputState,
    clock: FrameClock,
    status: GameStatus,
    running: bool,
    /// Player spawned by the current level.
    level_player: Option<EntityId>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let entities = EntityManager::with_stage(config.stage());
        let clock = FrameClock::new(config.fps, config.max_delta);
        log::info!(
            "{}: {}x{} @ {} fps",
            config.title,
            config.window_width,
            config.window_height,
            config.fps
        );
        Self {
            config,
            entities,
            input: InputState::new(),
            clock,
            status: GameStatus::Playing,
            running: false,
            level_player: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop after the current iteration.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Replace the world with `level`. Relative asset paths resolve against
    /// `base_dir`. On error the world is left empty.
    pub fn load_level(&mut self, level: &LevelData, base_dir: &Path) -> Result<EntityId, LevelError> {
        self.entities.clear();
        self.entities.assets_mut().clear();
        *self.entities.stage_mut() = self.config.stage();
        self.status = GameStatus::Playing;
        self.level_player = None;
        match level.spawn_into(&mut self.entities, base_dir) {
            Ok(player) => {
                self.level_player = Some(player);
                Ok(player)
            }
            Err(e) => {
                log::error!("Level failed to load, discarding partial world: {}", e);
                self.entities.clear();
                Err(e)
            }
        }
    }

    pub fn load_level_file(&mut self, path: impl AsRef<Path>) -> Result<EntityId, LevelError> {
        let path = path.as_ref();
        let level = LevelData::load(path)?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        self.load_level(&level, base_dir)
    }

    /// Advance one frame: simulate, follow the player, check win/lose,
    /// render, and clear this frame's key edges.
    pub fn frame(&mut self, dt: f32, renderer: &mut dyn Renderer) -> GameStatus {
        self.entities.update(dt, &self.input);

        #[cfg(feature = "diagnostics")]
        {
            let stats = self.entities.frame_stats();
            if stats.spawned + stats.despawned > 0 {
                log::debug!(
                    "frame {}: +{} -{} entities, {} events",
                    self.clock.frame_count(),
                    stats.spawned,
                    stats.despawned,
                    stats.events_drained
                );
            }
        }

        match self.entities.player() {
            Some(player) => {
                if let Some(center) = self.entities.component::<Transform>(player).map(Transform::center) {
                    self.entities.stage_mut().follow(center);
                }
                if self.status == GameStatus::Playing {
                    self.status = self.check_player(player);
                }
            }
            None if self.status == GameStatus::Playing && self.level_player.is_some() => {
                log::info!("Player entity is gone");
                self.status = GameStatus::GameOver;
            }
            None => {}
        }

        self.entities.render(renderer);
        self.input.clear_just();
        self.status
    }

    fn check_player(&self, player: EntityId) -> GameStatus {
        match self.entities.check_entity_collisions(player) {
            ColliderTag::Enemy => {
                log::info!("Player ran into an enemy");
                return GameStatus::GameOver;
            }
            ColliderTag::LevelComplete => {
                log::info!("Level complete");
                return GameStatus::LevelComplete;
            }
            _ => {}
        }
        if self.entities.player_hits() >= self.config.player_lives {
            log::info!("Player out of lives after {} hits", self.entities.player_hits());
            return GameStatus::GameOver;
        }
        GameStatus::Playing
    }

    /// Run until the platform closes, Escape is pressed, [`quit`](Self::quit)
    /// is called, or the level ends.
    pub fn run(&mut self, platform: &mut dyn Platform) -> GameStatus {
        self.running = true;
        while self.running {
            if !platform.poll_input(&mut self.input) || self.input.was_pressed(KeyCode::Escape) {
                log::info!("Quit requested");
                self.quit();
                break;
            }
            let dt = self.clock.tick();
            let status = self.frame(dt, platform.renderer());
            platform.present();
            if status != GameStatus::Playing {
                self.quit();
            }
        }
        log::info!(
            "Stopped after {} frames: {:?}, {} enemies killed",
            self.clock.frame_count(),
            self.status,
            self.entities.enemies_killed()
        );
        self.status
    }
}
