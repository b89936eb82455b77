/// Sprite images and the two collaborators every entity renders through:
/// the resource cache that owns images and the surface that draws them.

use std::collections::HashMap;
use std::fmt;

use crossterm::style::Color;
use tracing::warn;

pub const ENEMY_BUG: &str = "images/enemy-bug.png";
pub const CHAR_BOY: &str = "images/char-boy.png";

/// Opaque identifier of a sprite asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(pub String);

impl SpriteId {
    pub fn new(id: impl Into<String>) -> Self {
        SpriteId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpriteId {
    fn from(id: &str) -> Self {
        SpriteId::new(id)
    }
}

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A loaded image.  `width`/`height` are the natural pixel size; `art` is the
/// glyph rendition used by character-cell surfaces.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width: f32,
    pub height: f32,
    pub art: Vec<&'static str>,
    pub color: Color,
}

pub trait ResourceCache {
    /// Always yields an image; unknown ids resolve to a placeholder.
    fn get(&self, id: &SpriteId) -> &Image;
}

pub trait Surface {
    fn draw_image(&mut self, image: &Image, x: f32, y: f32) -> std::io::Result<()>;

    /// Right boundary of the play field in pixels.
    fn canvas_width(&self) -> f32;
}

/// In-memory sprite atlas with the game's built-in images.
#[derive(Clone, Debug)]
pub struct SpriteCache {
    images: HashMap<SpriteId, Image>,
    placeholder: Image,
}

impl SpriteCache {
    pub fn new() -> Self {
        SpriteCache {
            images: HashMap::new(),
            placeholder: Image {
                width: 101.0,
                height: 171.0,
                art: vec![" [??????] ", " [??????] "],
                color: Color::Magenta,
            },
        }
    }

    pub fn with_builtin() -> Self {
        let mut cache = Self::new();
        cache.insert(
            ENEMY_BUG.into(),
            Image {
                width: 101.0,
                height: 171.0,
                art: vec![" ▄▆████▆▄▶", " ▀o▀▀▀▀o▀ "],
                color: Color::Red,
            },
        );
        cache.insert(
            CHAR_BOY.into(),
            Image {
                width: 101.0,
                height: 171.0,
                art: vec!["   (°_°)  ", "   /|_|\\  "],
                color: Color::White,
            },
        );
        cache
    }

    pub fn insert(&mut self, id: SpriteId, image: Image) {
        self.images.insert(id, image);
    }

    pub fn contains(&self, id: &SpriteId) -> bool {
        self.images.contains_key(id)
    }

    /// Check that every id the game will draw is available before the loop
    /// starts.  Returns the ids that will fall back to the placeholder.
    pub fn preload<'a>(&self, ids: impl IntoIterator<Item = &'a SpriteId>) -> Vec<SpriteId> {
        let mut missing = Vec::new();
        for id in ids {
            if !self.contains(id) && !missing.contains(id) {
                warn!(sprite = %id, "sprite not in cache, using placeholder");
                missing.push(id.clone());
            }
        }
        missing
    }
}

impl Default for SpriteCache {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ResourceCache for SpriteCache {
    fn get(&self, id: &SpriteId) -> &Image {
        self.images.get(id).unwrap_or(&self.placeholder)
    }
}
