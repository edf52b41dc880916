use facade_engine::coords::Area;

use crate::ctx::RenderCtx;
use crate::document::Fields;
use crate::elements::group::Placement;
use crate::elements::{Group, Widget};
use crate::error::Result;
use crate::node::{Behavior, NodeId, Transition};

/// A group whose topmost image child receives clicks.
#[derive(Debug)]
pub struct Button {
    group: Group,
}

impl Button {
    pub fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self { group: Group::from_fields(fields)? })
    }

    pub fn group(&self) -> &Group {
        &self.group
    }
}

impl Widget for Button {
    fn name(&self) -> &str {
        &self.group.name
    }

    fn area(&self) -> Area {
        self.group.area()
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId> {
        let node = self.group.create_self(ctx, Placement::Canvas)?;

        let mut target = None;
        self.group.render_children(ctx, node, |child, element| {
            if target.is_none() && element.is_image() {
                target = Some(child);
            }
        })?;

        if let Some(image) = target.and_then(|t| ctx.nodes.get_mut(t)).and_then(|n| n.image_mut()) {
            image.raycast_target = true;
        }
        ctx.nodes[node].behavior =
            Some(Behavior::Button { target, transition: Transition::ColorTint });

        log::trace!("{}: button target {:?}", self.group.name, target);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::compile_value;

    #[test]
    fn last_declared_image_is_target() {
        let out = compile_value(json!({
            "type": "Root", "name": "Screen", "elements": [
                { "type": "Button", "name": "Ok", "elements": [
                    { "type": "Image", "name": "Bg", "image": "bg", "x": 0, "y": 0, "w": 40, "h": 20, "opacity": 100 },
                    { "type": "Image", "name": "Fg", "image": "fg", "x": 2, "y": 2, "w": 36, "h": 16, "opacity": 100 },
                ]}
            ]
        }));
        let button = out.tree.find(out.root, "Ok").unwrap();
        let fg = out.tree.find_child(button, "Fg").unwrap();
        let bg = out.tree.find_child(button, "Bg").unwrap();

        assert_eq!(out.tree[button].children(), [fg, bg]);
        assert_eq!(
            out.tree[button].behavior,
            Some(Behavior::Button { target: Some(fg), transition: Transition::ColorTint })
        );
        assert_eq!(out.tree[fg].image().unwrap().sprite.name(), "fg.png");
        assert!(out.tree[fg].image().unwrap().raycast_target);
        assert!(!out.tree[bg].image().unwrap().raycast_target);
    }

    #[test]
    fn text_children_are_not_targets() {
        let out = compile_value(json!({
            "type": "Root", "name": "Screen", "elements": [
                { "type": "Button", "name": "Ok", "elements": [
                    { "type": "Image", "name": "Bg", "image": "bg", "x": 0, "y": 0, "w": 40, "h": 20, "opacity": 100 },
                    { "type": "Text", "name": "Label", "text": "OK", "font": "Body", "size": 12,
                      "align": "center", "color": "#000000", "x": 0, "y": 0, "w": 40, "h": 20, "vh": 20 },
                ]}
            ]
        }));
        let button = out.tree.find(out.root, "Ok").unwrap();
        let bg = out.tree.find_child(button, "Bg").unwrap();
        assert!(matches!(
            out.tree[button].behavior,
            Some(Behavior::Button { target: Some(t), .. }) if t == bg
        ));
    }

    #[test]
    fn button_without_image_has_no_target() {
        let out = compile_value(json!({
            "type": "Root", "name": "Screen", "elements": [
                { "type": "Button", "name": "Hotspot", "elements": [{ "type": "Null", "name": "Spot" }] }
            ]
        }));
        let button = out.tree.find(out.root, "Hotspot").unwrap();
        assert_eq!(
            out.tree[button].behavior,
            Some(Behavior::Button { target: None, transition: Transition::ColorTint })
        );
    }
}
