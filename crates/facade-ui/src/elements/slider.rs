use facade_engine::coords::Area;

use crate::ctx::RenderCtx;
use crate::document::Fields;
use crate::elements::group::Placement;
use crate::elements::{Group, Widget};
use crate::error::Result;
use crate::node::{Behavior, NodeId, Transition};

/// Name of the image child stretched over the slider as its fill.
pub const FILL: &str = "Fill";

#[derive(Debug)]
pub struct Slider {
    group: Group,
}

impl Slider {
    pub fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self { group: Group::from_fields(fields)? })
    }

    pub fn group(&self) -> &Group {
        &self.group
    }
}

impl Widget for Slider {
    fn name(&self) -> &str {
        &self.group.name
    }

    fn area(&self) -> Area {
        self.group.area()
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId> {
        let node = self.group.create_self(ctx, Placement::Canvas)?;

        let mut fill = None;
        self.group.render_children(ctx, node, |child, element| {
            if fill.is_none() && element.is_image() && element.name() == FILL {
                fill = Some(child);
            }
        })?;

        if let Some(fill) = fill {
            ctx.nodes[fill].rect.fill_parent();
        }
        ctx.nodes[node].behavior = Some(Behavior::Slider { fill, transition: Transition::None });
        Ok(node)
    }
}
