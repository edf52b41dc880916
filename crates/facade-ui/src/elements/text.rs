use facade_engine::coords::{Area, Vec2};
use facade_engine::paint::Color;

use crate::ctx::RenderCtx;
use crate::document::Fields;
use crate::elements::Widget;
use crate::error::Result;
use crate::node::{NodeId, TextAlign, TextVisual, Visual};

/// A single-style text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    name: String,
    message: String,
    font: String,
    font_size: u32,
    /// `"left"`, `"center"` or `"right"`; anything else keeps default placement.
    align: String,
    /// Height the node is given, independent of the exported `h`.
    virtual_height: f32,
    color: Color,
    canvas_position: Vec2,
    size: Vec2,
}

impl TextElement {
    pub fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.str("name")?.to_string(),
            message: fields.str("text")?.to_string(),
            font: fields.str("font")?.to_string(),
            font_size: fields.u32("size")?,
            align: fields.str("align")?.to_string(),
            color: fields.color("color")?,
            size: fields.vec2("w", "h")?,
            canvas_position: fields.vec2("x", "y")?,
            virtual_height: fields.f32("vh")?,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text anchor, pivot, and horizontal shift from the rect center for
    /// the alignment keyword.
    fn alignment(&self) -> Option<(TextAlign, Vec2, f32)> {
        let half = self.size.x / 2.0;
        match self.align.as_str() {
            "left" => Some((TextAlign::MiddleLeft, Vec2::new(0.0, 0.5), -half)),
            "center" => Some((TextAlign::MiddleCenter, Vec2::new(0.5, 0.5), 0.0)),
            "right" => Some((TextAlign::MiddleRight, Vec2::new(1.0, 0.5), half)),
            _ => None,
        }
    }
}

impl Widget for TextElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        Area::from_position_and_size(self.canvas_position, self.size)
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId> {
        let font = ctx.renderer.font(&self.font)?;
        let mut position = ctx.renderer.calc_position(self.canvas_position, self.size);
        let alignment = self.alignment();

        let node = ctx.create_node(&self.name);
        let n = &mut ctx.nodes[node];
        if let Some((_, pivot, shift)) = alignment {
            n.rect.pivot = pivot;
            position.x += shift;
        } else {
            log::warn!("{}: unknown text alignment {:?}", self.name, self.align);
        }
        n.rect.position = position;
        n.rect.size = Vec2::new(self.size.x, self.virtual_height);
        n.visual = Some(Visual::Text(TextVisual {
            message: self.message.clone(),
            font,
            font_size: self.font_size,
            color: self.color,
            align: alignment.map(|(align, _, _)| align),
            overflow: true,
        }));
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::elements::Element;
    use crate::error::LayoutError;
    use crate::testing::render_value;

    fn label(align: &str) -> serde_json::Value {
        json!({ "type": "Text", "name": "Label", "text": "Hello", "font": "Body", "size": 24,
                "align": align, "color": "#ff000080", "x": 20, "y": 40, "w": 60, "h": 20, "vh": 32 })
    }

    #[test]
    fn center_alignment_keeps_position() {
        let (tree, node) = render_value(label("center"));
        let n = &tree[node];
        // Center (50, 50) on the 200x100 test canvas.
        assert_eq!(n.rect.position, Vec2::new(-50.0, 0.0));
        assert_eq!(n.rect.pivot, Vec2::new(0.5, 0.5));
        assert_eq!(n.rect.size, Vec2::new(60.0, 32.0));

        let text = n.text().unwrap();
        assert_eq!(text.message, "Hello");
        assert_eq!(text.font.name(), "Body.ttf");
        assert_eq!(text.font_size, 24);
        assert_eq!(text.align, Some(TextAlign::MiddleCenter));
        assert_eq!(text.color.r, 1.0);
        assert!((text.color.a - 128.0 / 255.0).abs() < 1e-6);
        assert!(text.overflow);
    }

    #[test]
    fn left_alignment_pivots_on_left_edge() {
        let (tree, node) = render_value(label("left"));
        assert_eq!(tree[node].rect.pivot, Vec2::new(0.0, 0.5));
        assert_eq!(tree[node].rect.position, Vec2::new(-80.0, 0.0));
        assert_eq!(tree[node].text().unwrap().align, Some(TextAlign::MiddleLeft));
    }

    #[test]
    fn right_alignment_pivots_on_right_edge() {
        let (tree, node) = render_value(label("right"));
        assert_eq!(tree[node].rect.pivot, Vec2::new(1.0, 0.5));
        assert_eq!(tree[node].rect.position, Vec2::new(-20.0, 0.0));
    }

    #[test]
    fn unknown_alignment_keeps_defaults() {
        let (tree, node) = render_value(label("justify"));
        assert_eq!(tree[node].rect.pivot, Vec2::splat(0.5));
        assert_eq!(tree[node].text().unwrap().align, None);
    }

    #[test]
    fn area_uses_exported_height() {
        let el = Element::generate(&label("left")).unwrap();
        assert_eq!(el.area().size(), Vec2::new(60.0, 20.0));
    }

    #[test]
    fn bad_color_fails_to_parse() {
        let mut v = label("left");
        v["color"] = json!("red");
        assert!(matches!(Element::generate(&v), Err(LayoutError::InvalidColor { .. })));
    }
}
