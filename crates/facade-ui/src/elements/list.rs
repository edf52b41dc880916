use facade_engine::coords::Area;

use crate::ctx::RenderCtx;
use crate::document::Fields;
use crate::elements::group::Placement;
use crate::elements::{Element, Group, Widget};
use crate::error::{LayoutError, Result};
use crate::mask;
use crate::node::{Axis, Behavior, Layout, NodeId};

/// Scrolling direction of a [`List`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScrollAxis {
    Vertical,
    Horizontal,
}

impl ScrollAxis {
    /// Exact keyword match; anything else means the list does not scroll.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "Vertical" => Some(ScrollAxis::Vertical),
            "Horizontal" => Some(ScrollAxis::Horizontal),
            _ => None,
        }
    }
}

/// A scrolling viewport over copies of a single item template.
///
/// Besides an optional Mask, the children must be one image named `"Area"`
/// (the viewport) and exactly one group-like element (the item template).
#[derive(Debug)]
pub struct List {
    group: Group,
    scroll: Option<ScrollAxis>,
}

impl List {
    pub fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        let group = Group::from_fields(fields)?;
        let scroll = match fields.opt_str("scroll")? {
            Some(keyword) => {
                let axis = ScrollAxis::parse(keyword);
                if axis.is_none() {
                    log::warn!("{}: unknown scroll direction {keyword:?}", group.name);
                }
                axis
            }
            None => None,
        };
        check_structure(&group)?;
        Ok(Self { group, scroll })
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn scroll(&self) -> Option<ScrollAxis> {
        self.scroll
    }

    fn setup_scroll(&self, ctx: &mut RenderCtx<'_>, content: NodeId) {
        let layout = match self.scroll {
            Some(ScrollAxis::Vertical) => Layout::Group {
                axis: Axis::Vertical,
                force_expand_width: true,
                force_expand_height: false,
            },
            Some(ScrollAxis::Horizontal) => Layout::Group {
                axis: Axis::Horizontal,
                force_expand_width: false,
                force_expand_height: true,
            },
            None => return,
        };
        ctx.nodes[content].layout = Some(layout);
    }

    /// Renders the item template under `list`, hidden, with its extent along
    /// the scroll axis as a minimum size.
    fn create_item(&mut self, ctx: &mut RenderCtx<'_>, list: NodeId) -> Result<NodeId> {
        let mut item = take_item(&mut self.group)?;
        let node = item.render(ctx)?;

        let area = item.area();
        let layout = match self.scroll {
            Some(ScrollAxis::Vertical) => {
                Layout::Element { min_width: None, min_height: Some(area.height()) }
            }
            Some(ScrollAxis::Horizontal) => {
                Layout::Element { min_width: Some(area.width()), min_height: None }
            }
            None => Layout::Element { min_width: None, min_height: None },
        };

        ctx.nodes[node].layout = Some(layout);
        ctx.nodes.set_parent(node, list, true);
        ctx.nodes[node].active = false;
        Ok(node)
    }
}

impl Widget for List {
    fn name(&self) -> &str {
        &self.group.name
    }

    fn area(&self) -> Area {
        self.group.area()
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId> {
        let node = self.group.create_self(ctx, Placement::Canvas)?;
        let content = ctx.create_node("Content");
        ctx.nodes.set_parent(content, node, false);

        self.setup_scroll(ctx, content);
        mask::apply_list_area(&mut self.group, ctx, node, content)?;

        let item_template = self.create_item(ctx, node)?;
        ctx.nodes[node].behavior = Some(Behavior::List {
            content,
            item_template,
            vertical: self.scroll == Some(ScrollAxis::Vertical),
            horizontal: self.scroll == Some(ScrollAxis::Horizontal),
        });
        Ok(node)
    }
}

/// Verifies that, once the first Mask and the Area image are set aside, a
/// single group-like child is left.
fn check_structure(group: &Group) -> Result<()> {
    let mut rest: Vec<&Element> = group.children.iter().collect();
    if let Some(i) = rest.iter().position(|c| c.is_mask()) {
        rest.remove(i);
    }
    let Some(i) = rest.iter().position(|c| mask::is_list_area(c)) else {
        return Err(mask::missing_area(&group.name));
    };
    rest.remove(i);
    match rest.as_slice() {
        [item] if item.as_group().is_some() => Ok(()),
        [item] => Err(not_a_group(&group.name, item)),
        _ => Err(item_count(&group.name, rest.len())),
    }
}

/// Removes the single remaining child, which must be group-like.
fn take_item(group: &mut Group) -> Result<Element> {
    if group.children.len() != 1 {
        return Err(item_count(&group.name, group.children.len()));
    }
    let item = group.children.remove(0);
    if item.as_group().is_none() {
        return Err(not_a_group(&group.name, &item));
    }
    Ok(item)
}

fn not_a_group(list: &str, item: &Element) -> LayoutError {
    LayoutError::structure(
        list,
        format!("list item {:?} is a {}, not a group", item.name(), item.type_name()),
    )
}

fn item_count(list: &str, found: usize) -> LayoutError {
    LayoutError::structure(list, format!("list needs exactly one item, found {found}"))
}
