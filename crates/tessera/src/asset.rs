//! # Assets: Texture and Font Registry
//!
//! Components never hold pixels. They hold small handles that the renderer
//! resolves, and they obtain those handles from an [`AssetProvider`] while
//! they initialize.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  AssetRegistry (owned by EntityManager)      │
//! │                                              │
//! │  textures: Vec<TextureInfo>   handle = index │
//! │  fonts:    Vec<FontInfo>      handle = index │
//! │  texture_ids: "tileset" ──► TextureHandle    │
//! │  font_ids:    "ui"      ──► FontHandle       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Handle Stability
//!
//! Handles are indices into a `Vec`. Registering an id that already exists
//! replaces the *data* at that index, so every component holding the handle
//! sees the new asset without being touched. Decoding the actual files is the
//! platform's job; the registry only records what was declared.

use std::collections::HashMap;
use std::path::PathBuf;

/// Handle to a registered texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Handle to a registered font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

/// Resolves asset ids to handles. Implemented by [`AssetRegistry`]; platform
/// layers may provide their own.
pub trait AssetProvider {
    fn texture(&self, id: &str) -> Option<TextureHandle>;
    fn font(&self, id: &str) -> Option<FontHandle>;
}

/// What we know about a declared texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub id: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// What we know about a declared font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    pub id: String,
    pub path: PathBuf,
    pub size: u32,
}

/// Id-keyed registry of textures and fonts.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    textures: Vec<TextureInfo>,
    fonts: Vec<FontInfo>,
    texture_ids: HashMap<String, TextureHandle>,
    font_ids: HashMap<String, FontHandle>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a texture. Re-declaring an id keeps its handle.
    ///
    /// Returns `None` (and logs) for an empty id.
    pub fn add_texture(
        &mut self,
        id: &str,
        path: impl Into<PathBuf>,
        width: u32,
        height: u32,
    ) -> Option<TextureHandle> {
        if id.is_empty() {
            log::error!("Refusing to register a texture with an empty id");
            return None;
        }
        let info = TextureInfo {
            id: id.to_string(),
            path: path.into(),
            width,
            height,
        };
        if let Some(&handle) = self.texture_ids.get(id) {
            log::info!("Texture '{}' replaced ({})", id, info.path.display());
            self.textures[handle.0 as usize] = info;
            return Some(handle);
        }
        let handle = TextureHandle(self.textures.len() as u32);
        log::debug!("Texture '{}' registered as {:?}", id, handle);
        self.textures.push(info);
        self.texture_ids.insert(id.to_string(), handle);
        Some(handle)
    }

    /// Declare a font at a point size. Re-declaring an id keeps its handle.
    pub fn add_font(&mut self, id: &str, path: impl Into<PathBuf>, size: u32) -> Option<FontHandle> {
        if id.is_empty() {
            log::error!("Refusing to register a font with an empty id");
            return None;
        }
        let info = FontInfo {
            id: id.to_string(),
            path: path.into(),
            size,
        };
        if let Some(&handle) = self.font_ids.get(id) {
            self.fonts[handle.0 as usize] = info;
            return Some(handle);
        }
        let handle = FontHandle(self.fonts.len() as u32);
        self.fonts.push(info);
        self.font_ids.insert(id.to_string(), handle);
        Some(handle)
    }

    pub fn texture_info(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(handle.0 as usize)
    }

    pub fn font_info(&self, handle: FontHandle) -> Option<&FontInfo> {
        self.fonts.get(handle.0 as usize)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Forget every asset. Existing handles become dangling.
    pub fn clear(&mut self) {
        self.textures.clear();
        self.fonts.clear();
        self.texture_ids.clear();
        self.font_ids.clear();
    }
}

impl AssetProvider for AssetRegistry {
    fn texture(&self, id: &str) -> Option<TextureHandle> {
        self.texture_ids.get(id).copied()
    }

    fn font(&self, id: &str) -> Option<FontHandle> {
        self.font_ids.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_stable_on_redeclare() {
        let mut assets = AssetRegistry::new();
        let a = assets.add_texture("hero", "hero.png", 32, 32).unwrap();
        let b = assets.add_texture("tiles", "tiles.png", 320, 96).unwrap();
        let a2 = assets.add_texture("hero", "hero_v2.png", 64, 64).unwrap();

        assert_ne!(a, b);
        assert_eq!(a, a2);
        assert_eq!(assets.texture_count(), 2);
        assert_eq!(assets.texture_info(a).unwrap().width, 64);
    }

    #[test]
    fn lookup_by_id() {
        let mut assets = AssetRegistry::new();
        let f = assets.add_font("ui", "ui.ttf", 14).unwrap();
        assert_eq!(assets.font("ui"), Some(f));
        assert_eq!(assets.font("missing"), None);
        assert_eq!(assets.texture("ui"), None);
    }

    #[test]
    fn empty_id_is_rejected() {
        let mut assets = AssetRegistry::new();
        assert!(assets.add_texture("", "x.png", 1, 1).is_none());
        assert!(assets.add_font("", "x.ttf", 1).is_none());
        assert_eq!(assets.texture_count(), 0);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut assets = AssetRegistry::new();
        assets.add_texture("hero", "hero.png", 32, 32);
        assets.clear();
        assert_eq!(assets.texture("hero"), None);
        assert_eq!(assets.texture_count(), 0);
    }
}
