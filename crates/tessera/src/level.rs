//! # Level Loading: JSON Level Descriptions
//!
//! A level file declares the assets it needs, an optional tile map, and the
//! entities to spawn with their components:
//!
//! ```json
//! {
//!   "textures": [{ "id": "hero", "path": "images/hero.png", "width": 128, "height": 128 }],
//!   "fonts":    [{ "id": "ui", "path": "fonts/ui.ttf", "size": 14 }],
//!   "map": { "texture": "jungle", "tile_size": 32, "scale": 2.0, "file": "jungle.map" },
//!   "entities": [
//!     { "name": "player", "layer": "PLAYER", "player": true, "components": [
//!         { "type": "transform", "x": 240, "y": 106, "width": 32, "height": 32 },
//!         { "type": "sprite", "texture": "hero", "animation": { "frames": 2, "frame_ms": 90, "directional": true } },
//!         { "type": "collider", "tag": "PLAYER" },
//!         { "type": "keyboard_control" }
//!     ]}
//!   ]
//! }
//! ```
//!
//! Entities are built only through [`EntityManager::add_entity`] and
//! [`EntityManager::add_component`], transform first. A level that finishes
//! loading without a player is rejected.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::collision::ColliderTag;
use crate::components::{Collider, KeyboardControl, LifeTimer, ProjectileEmitter, Sprite, TextLabel, Transform};
use crate::ecs::{EntityId, EntityManager, Layer};
use crate::input::key_from_name;
use crate::math::Vec2;
use crate::render::{Color, Flip};
use crate::tilemap::TileMap;

// ── Errors ──────────────────────────────────────────────────────────────

/// Errors from loading a level or map.
#[derive(Debug)]
pub enum LevelError {
    /// A file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The level JSON is malformed.
    Parse(serde_json::Error),
    /// A map entry has neither inline rows nor a file.
    EmptyMap,
    /// A keyboard control names a key we don't know.
    UnknownKey(String),
    /// No entity was flagged as the player.
    MissingPlayer,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            LevelError::Parse(e) => write!(f, "level parse failed: {e}"),
            LevelError::EmptyMap => write!(f, "map has neither \"rows\" nor \"file\""),
            LevelError::UnknownKey(k) => write!(f, "unknown key name \"{k}\""),
            LevelError::MissingPlayer => write!(f, "level has no player entity"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io { source, .. } => Some(source),
            LevelError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e)
    }
}

// ── Data ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TextureData {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontData {
    pub id: String,
    pub path: String,
    pub size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapData {
    pub texture: String,
    pub tile_size: u32,
    #[serde(default = "one")]
    pub scale: f32,
    /// Map text inline.
    #[serde(default)]
    pub rows: Option<String>,
    /// Map file, relative to the level file.
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationData {
    pub frames: u32,
    pub frame_ms: u32,
    #[serde(default)]
    pub directional: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentData {
    Transform {
        x: f32,
        y: f32,
        #[serde(default)]
        vx: f32,
        #[serde(default)]
        vy: f32,
        width: f32,
        height: f32,
        #[serde(default = "one")]
        scale: f32,
        #[serde(default = "yes")]
        clamp: bool,
    },
    Sprite {
        texture: String,
        #[serde(default)]
        animation: Option<AnimationData>,
        #[serde(default)]
        fixed: bool,
        #[serde(default)]
        flip: Flip,
    },
    KeyboardControl {
        #[serde(default = "key_up")]
        up: String,
        #[serde(default = "key_down")]
        down: String,
        #[serde(default = "key_left")]
        left: String,
        #[serde(default = "key_right")]
        right: String,
        #[serde(default = "key_shoot")]
        shoot: String,
    },
    Collider {
        tag: ColliderTag,
    },
    LifeTimer {
        duration_ms: u32,
    },
    ProjectileEmitter {
        speed: f32,
        angle: f32,
        range: f32,
        #[serde(default)]
        looping: bool,
    },
    TextLabel {
        x: f32,
        y: f32,
        text: String,
        font: String,
        #[serde(default)]
        color: Color,
    },
}

fn one() -> f32 {
    1.0
}
fn yes() -> bool {
    true
}
fn key_up() -> String {
    "up".into()
}
fn key_down() -> String {
    "down".into()
}
fn key_left() -> String {
    "left".into()
}
fn key_right() -> String {
    "right".into()
}
fn key_shoot() -> String {
    "space".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityData {
    pub name: String,
    pub layer: Layer,
    #[serde(default)]
    pub player: bool,
    #[serde(default)]
    pub components: Vec<ComponentData>,
}

/// A whole level as read from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub textures: Vec<TextureData>,
    #[serde(default)]
    pub fonts: Vec<FontData>,
    #[serde(default)]
    pub map: Option<MapData>,
    #[serde(default)]
    pub entities: Vec<EntityData>,
}

impl LevelData {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LevelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&text)
    }

    /// Register assets, build the map and entities in `manager`, and return
    /// the player's id. Relative paths resolve against `base_dir`.
    pub fn spawn_into(&self, manager: &mut EntityManager, base_dir: &Path) -> Result<EntityId, LevelError> {
        for t in &self.textures {
            manager.assets_mut().add_texture(&t.id, base_dir.join(&t.path), t.width, t.height);
        }
        for f in &self.fonts {
            manager.assets_mut().add_font(&f.id, base_dir.join(&f.path), f.size);
        }

        if let Some(map) = &self.map {
            let tiles = TileMap::new(&map.texture, map.tile_size, map.scale);
            match (&map.rows, &map.file) {
                (Some(rows), _) => {
                    tiles.load_str(manager, rows);
                }
                (None, Some(file)) => {
                    tiles.load_file(manager, base_dir.join(file))?;
                }
                (None, None) => return Err(LevelError::EmptyMap),
            }
        }

        let mut player = None;
        for data in &self.entities {
            let id = spawn_entity(manager, data)?;
            if data.player {
                match player {
                    None => player = Some(id),
                    Some(first) => log::warn!(
                        "Entity '{}' {} is flagged as player but {} already is; ignoring",
                        data.name,
                        id,
                        first
                    ),
                }
            }
        }

        let Some(player) = player else {
            log::error!("Level has no player entity");
            return Err(LevelError::MissingPlayer);
        };
        manager.set_player(player);
        log::info!(
            "Level loaded: {} entities, {} textures, {} fonts",
            manager.entity_count(),
            manager.assets().texture_count(),
            manager.assets().font_count()
        );
        Ok(player)
    }
}

fn spawn_entity(manager: &mut EntityManager, data: &EntityData) -> Result<EntityId, LevelError> {
    let id = manager.add_entity(&data.name, data.layer);

    // Transforms first: everything else resolves one while initializing.
    let mut components: Vec<&ComponentData> = data.components.iter().collect();
    components.sort_by_key(|c| !matches!(c, ComponentData::Transform { .. }));

    for component in components {
        attach(manager, id, component)?;
    }
    Ok(id)
}

fn key(name: &str) -> Result<crate::input::KeyCode, LevelError> {
    key_from_name(name).ok_or_else(|| LevelError::UnknownKey(name.to_string()))
}

fn attach(manager: &mut EntityManager, id: EntityId, data: &ComponentData) -> Result<(), LevelError> {
    match data {
        ComponentData::Transform {
            x,
            y,
            vx,
            vy,
            width,
            height,
            scale,
            clamp,
        } => {
            let mut t = Transform::new(Vec2::new(*x, *y), Vec2::new(*vx, *vy), *width, *height, *scale);
            t.clamp_to_map = *clamp;
            manager.add_component(id, t);
        }
        ComponentData::Sprite {
            texture,
            animation,
            fixed,
            flip,
        } => {
            let sprite = match animation {
                Some(a) => Sprite::animated(texture, a.frames, a.frame_ms, a.directional),
                None => Sprite::new(texture),
            };
            manager.add_component(id, sprite.fixed(*fixed).with_flip(*flip));
        }
        ComponentData::KeyboardControl {
            up,
            down,
            left,
            right,
            shoot,
        } => {
            let control = KeyboardControl::with_keys(key(up)?, key(down)?, key(left)?, key(right)?, key(shoot)?);
            manager.add_component(id, control);
        }
        ComponentData::Collider { tag } => {
            manager.add_component(id, Collider::new(*tag));
        }
        ComponentData::LifeTimer { duration_ms } => {
            manager.add_component(id, LifeTimer::new(*duration_ms));
        }
        ComponentData::ProjectileEmitter {
            speed,
            angle,
            range,
            looping,
        } => {
            manager.add_component(id, ProjectileEmitter::new(*speed, *angle, *range, *looping));
        }
        ComponentData::TextLabel {
            x,
            y,
            text,
            font,
            color,
        } => {
            manager.add_component(id, TextLabel::new(Vec2::new(*x, *y), text, font, *color));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    const LEVEL: &str = r#"{
        "textures": [
            { "id": "hero", "path": "hero.png", "width": 128, "height": 128 },
            { "id": "tank", "path": "tank.png", "width": 32, "height": 32 },
            { "id": "jungle", "path": "jungle.png", "width": 320, "height": 96 }
        ],
        "fonts": [{ "id": "ui", "path": "ui.ttf", "size": 14 }],
        "map": { "texture": "jungle", "tile_size": 32, "scale": 1.0, "rows": "00,01\n10,11" },
        "entities": [
            { "name": "tank", "layer": "ENEMY", "components": [
                { "type": "collider", "tag": "ENEMY" },
                { "type": "transform", "x": 10, "y": 20, "width": 32, "height": 32 },
                { "type": "sprite", "texture": "tank" },
                { "type": "projectile_emitter", "speed": 50, "angle": 180, "range": 100, "looping": true }
            ]},
            { "name": "player", "layer": "PLAYER", "player": true, "components": [
                { "type": "sprite", "texture": "hero", "animation": { "frames": 2, "frame_ms": 90, "directional": true } },
                { "type": "transform", "x": 40, "y": 40, "width": 32, "height": 32 },
                { "type": "collider", "tag": "PLAYER" },
                { "type": "keyboard_control", "shoot": "x" }
            ]},
            { "name": "title", "layer": "UI", "components": [
                { "type": "text_label", "x": 10, "y": 10, "text": "Jungle", "font": "ui" }
            ]}
        ]
    }"#;

    #[test]
    fn loads_assets_map_and_entities() {
        let level = LevelData::from_json_str(LEVEL).unwrap();
        let mut m = EntityManager::new();
        let player = level.spawn_into(&mut m, Path::new("assets")).unwrap();

        assert_eq!(m.player(), Some(player));
        assert_eq!(m.assets().texture_count(), 3);
        assert_eq!(m.entities_in_layer(Layer::Tilemap).len(), 4);
        assert_eq!(m.entity_count(), 4 + 3);

        let p = m.get_by_id(player).unwrap();
        assert_eq!(p.component_names(), vec!["Transform", "Sprite", "Collider", "KeyboardControl"]);
        assert_eq!(p.get_component::<KeyboardControl>().unwrap().shoot, KeyCode::KeyX);
        assert!(p.get_component::<Sprite>().unwrap().texture().is_some());

        // The emitter was attached after its transform despite the file order.
        let tank = m.get_by_name("tank").unwrap();
        let v = tank.get_component::<Transform>().unwrap().velocity;
        assert!((v.x + 50.0).abs() < 1e-3);
        assert_eq!(tank.get_component::<Collider>().unwrap().rect(), crate::math::Rect::new(10, 20, 32, 32));

        let label = m.get_by_name("title").unwrap().get_component::<TextLabel>().unwrap();
        assert!(label.font().is_some());
    }

    #[test]
    fn missing_player_is_fatal() {
        let level = LevelData::from_json_str(r#"{ "entities": [{ "name": "rock", "layer": "OBSTACLE" }] }"#).unwrap();
        let mut m = EntityManager::new();
        assert!(matches!(
            level.spawn_into(&mut m, Path::new(".")),
            Err(LevelError::MissingPlayer)
        ));
    }

    #[test]
    fn unknown_key_is_reported() {
        let json = r#"{ "entities": [{ "name": "p", "layer": "PLAYER", "player": true, "components": [
            { "type": "keyboard_control", "up": "hyperspace" }
        ]}]}"#;
        let level = LevelData::from_json_str(json).unwrap();
        let err = level.spawn_into(&mut EntityManager::new(), Path::new(".")).unwrap_err();
        assert_eq!(err.to_string(), "unknown key name \"hyperspace\"");
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(matches!(LevelData::from_json_str("{ nope"), Err(LevelError::Parse(_))));
        let unknown_layer = r#"{ "entities": [{ "name": "x", "layer": "SKY" }] }"#;
        assert!(matches!(LevelData::from_json_str(unknown_layer), Err(LevelError::Parse(_))));
    }

    #[test]
    fn map_needs_rows_or_file() {
        let level = LevelData::from_json_str(r#"{ "map": { "texture": "t", "tile_size": 8 } }"#).unwrap();
        assert!(matches!(
            level.spawn_into(&mut EntityManager::new(), Path::new(".")),
            Err(LevelError::EmptyMap)
        ));
    }
}
