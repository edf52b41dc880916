use facade_engine::coords::{Area, Vec2};

use crate::ctx::RenderCtx;
use crate::document::Fields;
use crate::elements::{Element, Widget};
use crate::error::Result;
use crate::mask;
use crate::node::NodeId;
use crate::pivot::{self, Pivot};

/// Where a group's own node is placed when it is created.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Placement {
    /// At the renderer's display position for the group's area.
    Canvas,
    /// At the origin of the frame; the root defines the frame.
    Origin,
}

/// Container state shared by Root, Group, Button, List and Slider.
///
/// `children` is stored in render order: the reverse of the declaration
/// order in the file, so later (visually topmost) entries come first.
#[derive(Debug)]
pub struct Group {
    pub(crate) name: String,
    pub(crate) pivot: Pivot,
    pub(crate) children: Vec<Element>,
}

impl Group {
    pub fn new(name: impl Into<String>, pivot: Pivot, children: Vec<Element>) -> Self {
        Self { name: name.into(), pivot, children }
    }

    /// Reads `name`, optional `pivot` and `elements`, parsing each entry and
    /// reversing the list into render order.
    pub fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        let name = fields.str("name")?;
        let pivot = Pivot::parse(fields.opt_str("pivot")?);
        let mut children = fields
            .array("elements")?
            .iter()
            .map(Element::generate)
            .collect::<Result<Vec<_>>>()?;
        children.reverse();
        Ok(Self::new(name, pivot, children))
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    /// Current children in render order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Removes and returns the first child (in render order) matching `pred`.
    pub(crate) fn take_first(&mut self, pred: impl Fn(&Element) -> bool) -> Option<Element> {
        let index = self.children.iter().position(pred)?;
        Some(self.children.remove(index))
    }

    /// Creates the group's own node sized to its children's union, then
    /// consumes a Mask child if there is one.
    pub(crate) fn create_self(
        &mut self,
        ctx: &mut RenderCtx<'_>,
        placement: Placement,
    ) -> Result<NodeId> {
        let node = ctx.create_node(&self.name);
        let area = self.area();
        let position = match placement {
            Placement::Origin => Vec2::zero(),
            Placement::Canvas => {
                ctx.renderer.calc_position(area.min().unwrap_or_default(), area.size())
            }
        };
        let rect = &mut ctx.nodes[node].rect;
        rect.size = area.size();
        rect.position = position;

        mask::apply_mask(self, ctx, node)?;
        Ok(node)
    }

    /// Renders every remaining child under `parent`, in render order.
    ///
    /// Each child node is reparented keeping its world position and its size;
    /// group-like children then get their pivot applied. `observe` sees every
    /// rendered child after that, in order.
    pub(crate) fn render_children(
        &mut self,
        ctx: &mut RenderCtx<'_>,
        parent: NodeId,
        mut observe: impl FnMut(NodeId, &Element),
    ) -> Result<()> {
        let canvas = ctx.renderer.canvas_size();
        for child in &mut self.children {
            let node = child.render(ctx)?;
            let size = ctx.nodes[node].rect.size;
            ctx.nodes.set_parent(node, parent, true);
            ctx.nodes[node].rect.size = size;
            if let Some(group) = child.as_group() {
                pivot::apply(ctx.nodes, node, group.pivot, canvas);
            }
            observe(node, child);
        }
        Ok(())
    }

    pub(crate) fn render_root(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId> {
        let node = self.create_self(ctx, Placement::Origin)?;
        self.render_children(ctx, node, |_, _| {})?;
        Ok(node)
    }
}

impl Widget for Group {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        self.children.iter().map(Element::area).collect()
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId> {
        let node = self.create_self(ctx, Placement::Canvas)?;
        self.render_children(ctx, node, |_, _| {})?;
        Ok(node)
    }
}
