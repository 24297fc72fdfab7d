//! Tile map loading.
//!
//! A map is plain text: one line per row, cells separated by commas. Each
//! cell is two digits, the row and column of the tile on the tileset:
//!
//! ```text
//! 21,21,21,00,00
//! 21,13,13,00,00
//! ```
//!
//! `13` is the tile at tileset row 1, column 3. Every cell becomes an entity
//! named [`TILE_NAME`] on [`Layer::Tilemap`].

use std::path::Path;

use crate::components::Tile;
use crate::ecs::{EntityManager, Layer, TILE_NAME};
use crate::level::LevelError;
use crate::math::Vec2;

#[derive(Debug, Clone)]
pub struct TileMap {
    pub texture_id: String,
    /// Edge length of one tile on the tileset, in pixels.
    pub tile_size: u32,
    pub scale: f32,
}

impl TileMap {
    pub fn new(texture_id: &str, tile_size: u32, scale: f32) -> Self {
        if texture_id.is_empty() {
            log::error!("Tile map created with an empty texture id");
        }
        Self {
            texture_id: texture_id.to_string(),
            tile_size,
            scale,
        }
    }

    /// Spawn one tile entity per cell of `text` and set the stage's map size.
    ///
    /// Malformed cells are logged and left empty. Returns the number of tiles
    /// created.
    pub fn load_str(&self, manager: &mut EntityManager, text: &str) -> usize {
        let step = self.tile_size as f32 * self.scale;
        let mut count = 0;
        let mut columns = 0;
        let mut rows = 0;

        for (y, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            rows = y + 1;
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            columns = columns.max(cells.len());
            for (x, cell) in cells.into_iter().enumerate() {
                let Some((row, col)) = parse_cell(cell) else {
                    log::warn!("Map cell ({}, {}) is malformed: {:?}", x, y, cell);
                    continue;
                };
                let src_x = (col * self.tile_size) as i32;
                let src_y = (row * self.tile_size) as i32;
                let position = Vec2::new(x as f32 * step, y as f32 * step);
                manager
                    .spawn(TILE_NAME, Layer::Tilemap)
                    .with(Tile::new(&self.texture_id, src_x, src_y, position, self.tile_size, self.scale));
                count += 1;
            }
        }

        let map_size = Vec2::new(columns as f32 * step, rows as f32 * step);
        manager.stage_mut().map_size = map_size;
        log::info!("Loaded {}x{} tile map ({} tiles, {} px)", columns, rows, count, map_size);
        count
    }

    /// Read a map file and load it with [`load_str`](Self::load_str).
    pub fn load_file(&self, manager: &mut EntityManager, path: impl AsRef<Path>) -> Result<usize, LevelError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| LevelError::Io {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        Ok(self.load_str(manager, &text))
    }
}

fn parse_cell(cell: &str) -> Option<(u32, u32)> {
    let mut digits = cell.chars();
    let row = digits.next()?.to_digit(10)?;
    let col = digits.next()?.to_digit(10)?;
    if digits.next().is_some() {
        return None;
    }
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rect;

    #[test]
    fn parses_cells() {
        assert_eq!(parse_cell("21"), Some((2, 1)));
        assert_eq!(parse_cell("09"), Some((0, 9)));
        assert_eq!(parse_cell("2"), None);
        assert_eq!(parse_cell("123"), None);
        assert_eq!(parse_cell("a1"), None);
    }

    #[test]
    fn load_creates_tiles_and_sets_map_size() {
        let mut m = EntityManager::new();
        m.assets_mut().add_texture("jungle", "jungle.png", 320, 96);
        let map = TileMap::new("jungle", 32, 2.0);

        let count = map.load_str(&mut m, "00,01,02\n10,11,12\n");
        assert_eq!(count, 6);
        assert_eq!(m.entities_in_layer(Layer::Tilemap).len(), 6);
        assert_eq!(m.stage().map_size, Vec2::new(192.0, 128.0));

        let last = m.entities_in_layer(Layer::Tilemap)[5];
        let tile = m.component::<Tile>(last).unwrap();
        assert_eq!(tile.src(), Rect::new(64, 32, 32, 32));
        assert_eq!(tile.dst(), Rect::new(128, 64, 64, 64));
        assert_eq!(m.get_by_id(last).unwrap().name(), TILE_NAME);
    }

    #[test]
    fn malformed_cells_are_skipped() {
        let mut m = EntityManager::new();
        let map = TileMap::new("jungle", 16, 1.0);
        let count = map.load_str(&mut m, "00,xx,01\n");
        assert_eq!(count, 2);
        assert_eq!(m.stage().map_size, Vec2::new(48.0, 16.0));
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut m = EntityManager::new();
        let map = TileMap::new("jungle", 16, 1.0);
        assert!(matches!(
            map.load_file(&mut m, "/definitely/not/here.map"),
            Err(LevelError::Io { .. })
        ));
    }
}
