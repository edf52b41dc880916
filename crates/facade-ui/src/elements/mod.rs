//! The element model: one variant per layout `type` keyword.
//!
//! Elements are parsed once from JSON and rendered once. Rendering consumes
//! structure: masks, list areas and list items are removed from their
//! parent's children as they are used, so re-rendering the same tree needs a
//! fresh parse.

pub mod button;
pub mod group;
pub mod image;
pub mod list;
pub mod null;
pub mod slider;
pub mod text;

use facade_engine::coords::Area;
use serde_json::Value;

use crate::ctx::RenderCtx;
use crate::error::Result;
use crate::node::NodeId;

pub use button::Button;
pub use group::Group;
pub use image::ImageElement;
pub use list::{List, ScrollAxis};
pub use null::NullElement;
pub use slider::Slider;
pub use text::TextElement;

// ── Widget trait ──────────────────────────────────────────────────────────

/// Capabilities shared by every element variant.
pub trait Widget {
    fn name(&self) -> &str;

    /// Bounding box in design space. Groups derive theirs from their current
    /// children, so the result changes as render removes children.
    fn area(&self) -> Area;

    /// Builds this element's node (and its subtree) in `ctx.nodes`.
    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId>;
}

// ── Element ───────────────────────────────────────────────────────────────

/// A parsed layout element.
#[derive(Debug)]
pub enum Element {
    /// Top-level group; always placed at the origin of its frame.
    Root(Group),
    Group(Group),
    Image(ImageElement),
    /// An image that clips its parent instead of being displayed.
    Mask(ImageElement),
    Text(TextElement),
    Button(Button),
    List(List),
    Slider(Slider),
    Null(NullElement),
}

impl Element {
    /// Builds an element tree from one JSON object; see [`crate::factory`].
    pub fn generate(value: &Value) -> Result<Element> {
        crate::factory::generate(value)
    }

    /// The `type` keyword this variant is registered under.
    pub fn type_name(&self) -> &'static str {
        match self {
            Element::Root(_) => "Root",
            Element::Group(_) => "Group",
            Element::Image(_) => "Image",
            Element::Mask(_) => "Mask",
            Element::Text(_) => "Text",
            Element::Button(_) => "Button",
            Element::List(_) => "List",
            Element::Slider(_) => "Slider",
            Element::Null(_) => "Null",
        }
    }

    fn widget(&self) -> &dyn Widget {
        match self {
            Element::Root(g) | Element::Group(g) => g as &dyn Widget,
            Element::Image(i) | Element::Mask(i) => i,
            Element::Text(t) => t,
            Element::Button(b) => b,
            Element::List(l) => l,
            Element::Slider(s) => s,
            Element::Null(n) => n,
        }
    }

    pub fn name(&self) -> &str {
        self.widget().name()
    }

    pub fn area(&self) -> Area {
        self.widget().area()
    }

    pub fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId> {
        log::debug!("render {} {:?}", self.type_name(), self.name());
        match self {
            Element::Root(g) => g.render_root(ctx),
            Element::Group(g) => g.render(ctx),
            Element::Image(i) | Element::Mask(i) => i.render(ctx),
            Element::Text(t) => t.render(ctx),
            Element::Button(b) => b.render(ctx),
            Element::List(l) => l.render(ctx),
            Element::Slider(s) => s.render(ctx),
            Element::Null(n) => n.render(ctx),
        }
    }

    pub fn is_mask(&self) -> bool {
        matches!(self, Element::Mask(_))
    }

    /// Image or Mask: anything that renders an image visual.
    pub fn is_image(&self) -> bool {
        matches!(self, Element::Image(_) | Element::Mask(_))
    }

    /// The group state of group-like variants (Root, Group, Button, List, Slider).
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Element::Root(g) | Element::Group(g) => Some(g),
            Element::Button(b) => Some(b.group()),
            Element::List(l) => Some(l.group()),
            Element::Slider(s) => Some(s.group()),
            _ => None,
        }
    }
}
