//! Facade UI: compiles design-tool layout exports into a resolved node tree.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use facade_ui::prelude::*;
//!
//! let doc = Document::parse_str(&std::fs::read_to_string("title.layout.json")?)?;
//! let assets = AssetCatalog::new().with_sprite("title/logo.png").with_font("Body.ttf");
//! let renderer = CanvasRenderer::new(doc.canvas_size.unwrap_or(Vec2::new(1136.0, 640.0)), assets);
//!
//! let out = compile(doc.root, &renderer)?;
//! println!("{}", serde_json::to_string_pretty(&out.tree.snapshot(out.root))?);
//! ```
//!
//! # Pipeline
//!
//! 1. [`Element::generate`] parses JSON into an [`Element`] tree; every group
//!    stores its children in reverse declaration order (render order).
//! 2. [`compile`] renders that tree depth-first through a [`Renderer`],
//!    consuming Mask / `"Area"` / item children as it goes.
//! 3. The result is a [`NodeTree`] ready for a backend to materialize.

pub mod ctx;
pub mod document;
pub mod elements;
pub mod error;
pub mod factory;
pub mod mask;
pub mod node;
pub mod pivot;
pub mod renderer;

pub use document::Document;
pub use elements::{Element, Widget};
pub use error::{LayoutError, Result};
pub use node::{NodeId, NodeTree};
pub use renderer::{AssetCatalog, CanvasRenderer, Renderer};

use ctx::RenderCtx;

/// Output of one compilation.
#[derive(Debug)]
pub struct Compiled {
    pub tree: NodeTree,
    pub root: NodeId,
}

/// Renders `root` into a fresh [`NodeTree`].
///
/// Consumes the element tree: rendering removes the children it rewrites,
/// so a second pass needs a fresh parse.
pub fn compile(mut root: Element, renderer: &dyn Renderer) -> Result<Compiled> {
    let mut tree = NodeTree::new();
    let root_id = {
        let mut ctx = RenderCtx::new(renderer, &mut tree);
        root.render(&mut ctx)?
    };
    log::debug!("compiled {:?} into {} nodes", root.name(), tree.len());
    Ok(Compiled { tree, root: root_id })
}

/// Parses JSON text holding a single element.
pub fn parse_str(src: &str) -> Result<Element> {
    let value: serde_json::Value = serde_json::from_str(src)?;
    Element::generate(&value)
}

/// Everything needed to compile a layout. Import this in tools.
pub mod prelude {
    pub use crate::document::Document;
    pub use crate::elements::{Element, Widget};
    pub use crate::error::{LayoutError, Result};
    pub use crate::node::{Behavior, DisplayNode, NodeId, NodeTree, Visual};
    pub use crate::renderer::{AssetCatalog, CanvasRenderer, Renderer};
    pub use crate::{Compiled, compile, parse_str};

    pub use facade_engine::coords::{Area, Vec2};
    pub use facade_engine::paint::Color;
}

#[cfg(test)]
pub(crate) mod testing {
    use facade_engine::coords::Vec2;
    use serde_json::Value;

    use super::*;

    /// 200x100 canvas with the sprites and fonts the unit tests reference.
    pub fn canvas_renderer() -> CanvasRenderer {
        let assets = ["icon.png", "frame.png", "bg.png", "fg.png", "fill.png", "area.png"]
            .into_iter()
            .fold(AssetCatalog::new(), AssetCatalog::with_sprite)
            .with_font("Body.ttf");
        CanvasRenderer::new(Vec2::new(200.0, 100.0), assets)
    }

    pub fn compile_value(value: Value) -> Compiled {
        let root = Element::generate(&value).unwrap();
        compile(root, &canvas_renderer()).unwrap()
    }

    /// Compiles a single element on its own and returns its node.
    pub fn render_value(value: Value) -> (NodeTree, NodeId) {
        let out = compile_value(value);
        (out.tree, out.root)
    }
}

// ── compile tests ─────────────────────────────────────────────────────────
