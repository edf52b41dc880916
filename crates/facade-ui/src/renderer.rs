use std::collections::BTreeMap;

use facade_engine::coords::Vec2;
use serde::Serialize;

use crate::error::{LayoutError, ResourceKind, Result};

// ── Handles ───────────────────────────────────────────────────────────────

/// Resolved sprite reference, opaque to the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SpriteHandle(String);

impl SpriteHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Resolved font reference, opaque to the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FontHandle(String);

impl FontHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────

/// Backend services the compiler needs while rendering elements.
///
/// Implementations are read-only from the compiler's point of view and are
/// only ever called from the thread driving the compilation.
pub trait Renderer {
    /// Maps an element's design-space rect (top-left `canvas_pos`, `size`) to
    /// the local position of its node in display space.
    fn calc_position(&self, canvas_pos: Vec2, size: Vec2) -> Vec2;

    /// Size of the design canvas the layout was exported against.
    fn canvas_size(&self) -> Vec2;

    fn sprite(&self, name: &str) -> Result<SpriteHandle>;

    fn font(&self, name: &str) -> Result<FontHandle>;
}

// ── AssetCatalog ──────────────────────────────────────────────────────────

/// Name-keyed sprite and font tables.
///
/// Keys are usually paths relative to an asset directory (`"ui/frame.png"`).
/// Sprite lookups also accept the key without its extension, which is how
/// most design exports refer to images.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    sprites: BTreeMap<String, SpriteHandle>,
    fonts: BTreeMap<String, FontHandle>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sprite(mut self, key: impl Into<String>) -> Self {
        self.add_sprite(key);
        self
    }

    pub fn with_font(mut self, key: impl Into<String>) -> Self {
        self.add_font(key);
        self
    }

    pub fn add_sprite(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.sprites.insert(key.clone(), SpriteHandle(key));
    }

    pub fn add_font(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.fonts.insert(key.clone(), FontHandle(key));
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn find_sprite(&self, name: &str) -> Option<&SpriteHandle> {
        lookup(&self.sprites, name)
    }

    pub fn find_font(&self, name: &str) -> Option<&FontHandle> {
        lookup(&self.fonts, name)
    }
}

fn lookup<'a, T>(table: &'a BTreeMap<String, T>, name: &str) -> Option<&'a T> {
    table.get(name).or_else(|| {
        table
            .iter()
            .find(|(key, _)| strip_extension(key) == name)
            .map(|(_, v)| v)
    })
}

fn strip_extension(key: &str) -> &str {
    match key.rfind('.') {
        Some(dot) if !key[dot..].contains('/') => &key[..dot],
        _ => key,
    }
}

// ── CanvasRenderer ────────────────────────────────────────────────────────

/// Reference [`Renderer`]: canvas-centered display space backed by an
/// [`AssetCatalog`].
///
/// Design space has its origin at the canvas top-left with +Y down. Display
/// space has its origin at the canvas center with +Y up, and positions refer
/// to the center of a rect.
#[derive(Debug, Clone)]
pub struct CanvasRenderer {
    canvas_size: Vec2,
    assets: AssetCatalog,
}

impl CanvasRenderer {
    pub fn new(canvas_size: Vec2, assets: AssetCatalog) -> Self {
        Self { canvas_size, assets }
    }

    pub fn assets(&self) -> &AssetCatalog {
        &self.assets
    }
}

impl Renderer for CanvasRenderer {
    fn calc_position(&self, canvas_pos: Vec2, size: Vec2) -> Vec2 {
        let center = canvas_pos + size / 2.0;
        let p = center - self.canvas_size / 2.0;
        Vec2::new(p.x, -p.y)
    }

    fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    fn sprite(&self, name: &str) -> Result<SpriteHandle> {
        self.assets.find_sprite(name).cloned().ok_or_else(|| LayoutError::ResourceNotFound {
            kind: ResourceKind::Sprite,
            name: name.to_string(),
        })
    }

    fn font(&self, name: &str) -> Result<FontHandle> {
        self.assets.find_font(name).cloned().ok_or_else(|| LayoutError::ResourceNotFound {
            kind: ResourceKind::Font,
            name: name.to_string(),
        })
    }
}
