//! The compiled output: an arena of display nodes with resolved geometry.
//!
//! A node is what a concrete backend turns into an on-screen object. It
//! carries a [`RectTransform`] in the parent's frame, at most one visual
//! component, and optional mask / layout / widget wiring.

use std::ops::{Index, IndexMut};

use facade_engine::coords::Vec2;
use facade_engine::paint::Color;
use serde::Serialize;

use crate::renderer::{FontHandle, SpriteHandle};

// ── NodeId ────────────────────────────────────────────────────────────────

/// Handle to a node inside a [`NodeTree`].
///
/// Ids are never reused; a destroyed node keeps its slot but is detached and
/// skipped by traversal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

// ── RectTransform ─────────────────────────────────────────────────────────

/// Placement of a node inside its parent.
///
/// `position` is measured from the anchor reference point to the node's
/// pivot. Anchors and pivot are unit-rectangle fractions.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct RectTransform {
    pub position: Vec2,
    pub size: Vec2,
    pub anchor_min: Vec2,
    pub anchor_max: Vec2,
    pub pivot: Vec2,
    pub scale: Vec2,
}

impl Default for RectTransform {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            size: Vec2::zero(),
            anchor_min: Vec2::splat(0.5),
            anchor_max: Vec2::splat(0.5),
            pivot: Vec2::splat(0.5),
            scale: Vec2::one(),
        }
    }
}

impl RectTransform {
    /// Stretch over the whole parent rect with no offset and identity scale.
    pub fn fill_parent(&mut self) {
        self.anchor_min = Vec2::zero();
        self.anchor_max = Vec2::one();
        self.position = Vec2::zero();
        self.size = Vec2::zero();
        self.scale = Vec2::one();
    }

    /// Point anchor: both corners at `anchor`.
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor_min = anchor;
        self.anchor_max = anchor;
    }
}

// ── Components ────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Nine-slice: borders keep their size when the rect is resized.
    Sliced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageVisual {
    pub sprite: SpriteHandle,
    pub color: Color,
    pub draw_mode: DrawMode,
    /// Whether the image receives pointer hits.
    pub raycast_target: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextVisual {
    pub message: String,
    pub font: FontHandle,
    pub font_size: u32,
    pub color: Color,
    /// `None` when the export used an alignment keyword we do not map.
    pub align: Option<TextAlign>,
    /// Glyphs may run past the rect on both axes instead of wrapping.
    pub overflow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visual {
    Image(ImageVisual),
    Text(TextVisual),
}

/// Clips descendants to this node's image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Mask {
    pub show_graphic: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layout {
    /// Stacks children along `axis`.
    Group {
        axis: Axis,
        force_expand_width: bool,
        force_expand_height: bool,
    },
    /// Size hints read by a parent layout group.
    Element {
        min_width: Option<f32>,
        min_height: Option<f32>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    None,
    ColorTint,
}

/// Interactive wiring a backend attaches to the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    Button {
        target: Option<NodeId>,
        transition: Transition,
    },
    Slider {
        fill: Option<NodeId>,
        transition: Transition,
    },
    List {
        content: NodeId,
        item_template: NodeId,
        vertical: bool,
        horizontal: bool,
    },
}

// ── DisplayNode ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNode {
    pub name: String,
    pub active: bool,
    pub rect: RectTransform,
    pub visual: Option<Visual>,
    pub mask: Option<Mask>,
    pub layout: Option<Layout>,
    pub behavior: Option<Behavior>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    destroyed: bool,
}

impl DisplayNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: true,
            rect: RectTransform::default(),
            visual: None,
            mask: None,
            layout: None,
            behavior: None,
            parent: None,
            children: Vec::new(),
            destroyed: false,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn image(&self) -> Option<&ImageVisual> {
        match &self.visual {
            Some(Visual::Image(image)) => Some(image),
            _ => None,
        }
    }

    pub fn image_mut(&mut self) -> Option<&mut ImageVisual> {
        match &mut self.visual {
            Some(Visual::Image(image)) => Some(image),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&TextVisual> {
        match &self.visual {
            Some(Visual::Text(text)) => Some(text),
            _ => None,
        }
    }
}

// ── NodeFactory ───────────────────────────────────────────────────────────

/// Creates bare positioned nodes with no visual.
pub trait NodeFactory {
    fn create_node(&mut self, name: &str) -> NodeId;
}

// ── NodeTree ──────────────────────────────────────────────────────────────

/// Owns every node produced by one compilation.
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: Vec<DisplayNode>,
}

impl NodeFactory for NodeTree {
    fn create_node(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DisplayNode::new(name));
        id
    }
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not destroyed) nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.destroyed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: NodeId) -> Option<&DisplayNode> {
        self.nodes.get(id.0).filter(|n| !n.destroyed)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DisplayNode> {
        self.nodes.get_mut(id.0).filter(|n| !n.destroyed)
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Position in the root frame, summing local positions up the parent chain.
    ///
    /// Exact for nodes whose ancestors use centered point anchors, which is
    /// how every node is created.
    pub fn world_position(&self, id: NodeId) -> Vec2 {
        let mut pos = Vec2::zero();
        let mut cur = Some(id);
        while let Some(n) = cur {
            pos += self[n].rect.position;
            cur = self[n].parent;
        }
        pos
    }

    /// Moves `child` to the end of `parent`'s children.
    ///
    /// With `keep_world` the local position is rebased so the node stays at
    /// the same world position; otherwise the local position is kept as is.
    /// Size, anchors and pivot are never touched.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId, keep_world: bool) {
        if keep_world {
            let world = self.world_position(child);
            let parent_world = self.world_position(parent);
            self[child].rect.position = world - parent_world;
        }
        self.detach(child);
        self[child].parent = Some(parent);
        self[parent].children.push(child);
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(old) = self[id].parent.take() {
            self[old].children.retain(|&c| c != id);
        }
    }

    /// Copies the whole rect of `from` onto `to`.
    pub fn copy_rect(&mut self, from: NodeId, to: NodeId) {
        self[to].rect = self[from].rect;
    }

    /// Copies the image visual of `from` onto `to`, replacing any visual `to`
    /// had. Returns `false` (and changes nothing) if `from` has no image.
    pub fn copy_image(&mut self, from: NodeId, to: NodeId) -> bool {
        let Some(image) = self[from].image().cloned() else {
            return false;
        };
        self[to].visual = Some(Visual::Image(image));
        true
    }

    /// Detaches `id` from its parent and drops it with all descendants.
    pub fn destroy(&mut self, id: NodeId) {
        self.detach(id);
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            let node = &mut self[n];
            node.destroyed = true;
            stack.extend(node.children.drain(..));
        }
    }

    /// First direct child of `parent` called `name`.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self[parent].children.iter().copied().find(|&c| self[c].name == name)
    }

    /// First node called `name` in depth-first order below (and including) `root`.
    pub fn find(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.iter_depth_first(root).find(|&id| self[id].name == name)
    }

    /// Pre-order traversal of the live subtree rooted at `root`.
    pub fn iter_depth_first(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = if self.is_alive(root) { vec![root] } else { Vec::new() };
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self[id].children.iter().rev().copied());
            Some(id)
        })
    }

    /// Serializable nested view of the subtree rooted at `root`.
    pub fn snapshot(&self, root: NodeId) -> NodeSnapshot<'_> {
        let node = &self[root];
        NodeSnapshot {
            id: root,
            name: &node.name,
            active: node.active,
            rect: node.rect,
            visual: node.visual.as_ref(),
            mask: node.mask,
            layout: node.layout,
            behavior: node.behavior.as_ref(),
            children: node.children.iter().map(|&c| self.snapshot(c)).collect(),
        }
    }
}

impl Index<NodeId> for NodeTree {
    type Output = DisplayNode;

    fn index(&self, id: NodeId) -> &DisplayNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeTree {
    fn index_mut(&mut self, id: NodeId) -> &mut DisplayNode {
        &mut self.nodes[id.0]
    }
}

/// Borrowed, nested form of a subtree for serialization.
#[derive(Debug, Serialize)]
pub struct NodeSnapshot<'a> {
    pub id: NodeId,
    pub name: &'a str,
    pub active: bool,
    pub rect: RectTransform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual: Option<&'a Visual>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<Mask>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<&'a Behavior>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot<'a>>,
}
