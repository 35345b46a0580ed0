use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::game::TextureHandle;

pub const SNAKE_SHEET: &str = "res/sprites/snake.json";
pub const FRUIT_SHEET: &str = "res/sprites/fruit.json";
pub const ROCK_SHEET: &str = "res/sprites/rock.json";

const BUNDLED: [(&str, &str); 3] = [
    (SNAKE_SHEET, include_str!("../../res/sprites/snake.json")),
    (FRUIT_SHEET, include_str!("../../res/sprites/fruit.json")),
    (ROCK_SHEET, include_str!("../../res/sprites/rock.json")),
];

/// One sprite drawn in four orientations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// `glyphs[k]` is the art rotated `k` quarter turns clockwise
    pub glyphs: [String; 4],
    /// Any color name ratatui understands
    #[serde(default)]
    pub color: Option<String>,
}

impl Sprite {
    /// Glyph for a rotation, rounded to the nearest quarter turn
    pub fn glyph(&self, rotation_degrees: f32) -> &str {
        let quarter = ((rotation_degrees / 90.0).round() as i64).rem_euclid(4) as usize;
        &self.glyphs[quarter]
    }
}

/// A texture: an indexed strip of sprites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub sprites: Vec<Sprite>,
}

impl SpriteSheet {
    pub fn parse(source: &str) -> Result<Self> {
        let sheet: SpriteSheet = serde_json::from_str(source).context("Invalid sprite sheet")?;

        if sheet.sprites.is_empty() {
            bail!("Sprite sheet has no sprites");
        }

        Ok(sheet)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sprite sheet {}", path.display()))?;

        Self::parse(&source).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn sprite(&self, index: u32) -> Option<&Sprite> {
        self.sprites.get(index as usize)
    }
}

/// Path-keyed texture cache. Each path is loaded at most once; handles stay
/// valid for the lifetime of the cache.
#[derive(Debug, Default)]
pub struct TextureCache {
    /// Directory searched before the bundled sheets
    root: Option<PathBuf>,
    handles: HashMap<String, TextureHandle>,
    sheets: Vec<SpriteSheet>,
}

impl TextureCache {
    /// Cache backed only by the sheets compiled into the binary
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Cache that looks for sheets under `root` first
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Handle for the texture at `path`, loading it on first use.
    ///
    /// Returns `None` (and logs) when it cannot be loaded.
    pub fn get(&mut self, path: &str) -> Option<TextureHandle> {
        if let Some(handle) = self.handles.get(path) {
            return Some(*handle);
        }

        let sheet = match self.load(path) {
            Ok(sheet) => sheet,
            Err(err) => {
                warn!("{err:#}");
                return None;
            }
        };

        let handle = TextureHandle(self.sheets.len());
        self.sheets.push(sheet);
        self.handles.insert(path.to_string(), handle);
        Some(handle)
    }

    fn load(&self, path: &str) -> Result<SpriteSheet> {
        let bundled = BUNDLED
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, source)| *source);

        if let Some(root) = &self.root {
            let file = root.join(path);
            match SpriteSheet::load(&file) {
                Ok(sheet) => {
                    info!("Loaded sprite sheet {}", file.display());
                    return Ok(sheet);
                }
                Err(err) if bundled.is_some() => {
                    warn!("{err:#}; using the bundled sheet");
                }
                Err(err) => return Err(err),
            }
        }

        match bundled {
            Some(source) => SpriteSheet::parse(source)
                .with_context(|| format!("Bundled sprite sheet {path} is broken")),
            None => bail!("Unknown texture {path}"),
        }
    }

    pub fn sheet(&self, handle: TextureHandle) -> Option<&SpriteSheet> {
        self.sheets.get(handle.0)
    }

    /// Number of textures loaded so far
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Asset root with an empty `res/sprites` directory
    fn asset_root() -> TempDir {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("res/sprites")).unwrap();
        root
    }

    #[test]
    fn test_bundled_sheets_parse() {
        for (path, source) in BUNDLED {
            let sheet = SpriteSheet::parse(source).unwrap();
            assert!(!sheet.sprites.is_empty(), "{path} is empty");
        }
    }

    #[test]
    fn test_each_path_loaded_once() {
        let mut cache = TextureCache::builtin();

        let first = cache.get(SNAKE_SHEET).unwrap();
        let again = cache.get(SNAKE_SHEET).unwrap();
        let fruit = cache.get(FRUIT_SHEET).unwrap();

        assert_eq!(first, again);
        assert_ne!(first, fruit);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_unknown_path() {
        let mut cache = TextureCache::builtin();
        assert!(cache.get("res/sprites/missing.json").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_glyph_rotation() {
        let mut cache = TextureCache::builtin();
        let handle = cache.get(SNAKE_SHEET).unwrap();
        let head = cache.sheet(handle).unwrap().sprite(0).unwrap();

        assert_eq!(head.glyph(0.0), "▶ ");
        assert_eq!(head.glyph(90.0), "▼ ");
        assert_eq!(head.glyph(270.0), "▲ ");
        assert_eq!(head.glyph(-90.0), "▲ ");
        assert_eq!(head.glyph(360.0), "▶ ");
    }

    #[test]
    fn test_disk_sheet_overrides_bundled() {
        let root = asset_root();
        std::fs::write(
            root.path().join(ROCK_SHEET),
            r###"{ "sprites": [ { "glyphs": ["##", "##", "##", "##"] } ] }"###,
        )
        .unwrap();

        let mut cache = TextureCache::with_root(root.path());
        let handle = cache.get(ROCK_SHEET).unwrap();
        let rock = cache.sheet(handle).unwrap().sprite(0).unwrap();

        assert_eq!(rock.glyph(0.0), "##");
        assert_eq!(rock.color, None);
    }

    #[test]
    fn test_broken_disk_sheet_falls_back() {
        let root = asset_root();
        let sprites = root.path().join("res/sprites");
        std::fs::write(root.path().join(FRUIT_SHEET), "{ not json").unwrap();
        std::fs::write(sprites.join("custom.json"), r#"{ "sprites": [] }"#).unwrap();

        let mut cache = TextureCache::with_root(root.path());
        assert!(cache.get(FRUIT_SHEET).is_some());
        assert!(cache.get("res/sprites/custom.json").is_none());
    }
}
