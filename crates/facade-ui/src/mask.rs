//! Structural rewrites that turn a child element into clipping on its parent.
//!
//! The consumed child is removed from the group in one step, rendered on its
//! own to resolve its sprite and geometry, copied onto the parent, and the
//! temporary node is destroyed.

use facade_engine::coords::Vec2;

use crate::ctx::RenderCtx;
use crate::elements::{Element, Group};
use crate::error::{LayoutError, Result};
use crate::node::{Mask, NodeId};

/// Name of the image child that gives a List its viewport.
pub const LIST_AREA: &str = "Area";

/// Consumes the first Mask child of `group` (in render order), if any, and
/// turns `target` into a hidden clipping image with the mask's visual.
pub(crate) fn apply_mask(group: &mut Group, ctx: &mut RenderCtx<'_>, target: NodeId) -> Result<()> {
    let Some(mut source) = group.take_first(Element::is_mask) else {
        return Ok(());
    };

    let temp = source.render(ctx)?;
    ctx.nodes.set_parent(temp, target, true);
    ctx.nodes.copy_image(temp, target);
    ctx.nodes.destroy(temp);

    let node = &mut ctx.nodes[target];
    if let Some(image) = node.image_mut() {
        image.raycast_target = false;
    }
    node.mask = Some(Mask { show_graphic: false });

    log::trace!("{}: clipped by mask {:?}", group.name, source.name());
    Ok(())
}

/// Consumes the `"Area"` image of a List and writes its rectangle onto both
/// the list node and its `content` node, with the image as a hidden mask.
///
/// The list node moves onto the Area's rect; `content` takes the same rect
/// expressed in the list's frame.
pub(crate) fn apply_list_area(
    group: &mut Group,
    ctx: &mut RenderCtx<'_>,
    list: NodeId,
    content: NodeId,
) -> Result<()> {
    let Some(mut source) = group.take_first(is_list_area) else {
        return Err(missing_area(&group.name));
    };

    let temp = source.render(ctx)?;
    ctx.nodes[temp].active = false;
    ctx.nodes.set_parent(temp, list, true);

    let area_rect = ctx.nodes[temp].rect;
    let offset = area_rect.position;
    let list_position = ctx.nodes[list].rect.position;
    ctx.nodes[list].rect = area_rect;
    ctx.nodes[list].rect.position = list_position + offset;
    ctx.nodes.copy_rect(temp, content);
    ctx.nodes[content].rect.position = Vec2::zero();

    ctx.nodes.copy_image(temp, list);
    ctx.nodes.destroy(temp);

    // The viewport image is what catches drags for scrolling.
    let node = &mut ctx.nodes[list];
    if let Some(image) = node.image_mut() {
        image.raycast_target = true;
    }
    node.mask = Some(Mask { show_graphic: false });

    log::trace!("{}: viewport from {:?} at offset {:?}", group.name, LIST_AREA, offset);
    Ok(())
}

pub(crate) fn is_list_area(element: &Element) -> bool {
    element.is_image() && element.name() == LIST_AREA
}

pub(crate) fn missing_area(list: &str) -> LayoutError {
    LayoutError::structure(list, format!("list has no {LIST_AREA:?} image"))
}
