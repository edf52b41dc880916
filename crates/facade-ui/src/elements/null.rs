use facade_engine::coords::Area;

use crate::ctx::RenderCtx;
use crate::document::Fields;
use crate::elements::Widget;
use crate::error::Result;
use crate::node::NodeId;

/// Reserves a named node with no visual and no area.
#[derive(Debug, Clone, PartialEq)]
pub struct NullElement {
    name: String,
}

impl NullElement {
    pub fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self { name: fields.str("name")?.to_string() })
    }
}

impl Widget for NullElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        Area::NONE
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId> {
        Ok(ctx.create_node(&self.name))
    }
}
