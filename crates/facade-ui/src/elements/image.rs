use facade_engine::coords::{Area, Vec2};
use facade_engine::paint::Color;

use crate::ctx::RenderCtx;
use crate::document::Fields;
use crate::elements::Widget;
use crate::error::Result;
use crate::node::{DrawMode, ImageVisual, NodeId, Visual};

/// A sprite placed at a fixed design-space rect.
///
/// Backs both the `Image` and `Mask` element types.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    name: String,
    sprite: String,
    canvas_position: Vec2,
    size: Vec2,
    /// Percent, `0`–`100`.
    opacity: f32,
    /// Stretch over the parent and take pointer hits.
    background: bool,
}

impl ImageElement {
    pub fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.str("name")?.to_string(),
            sprite: fields.str("image")?.to_string(),
            canvas_position: fields.vec2("x", "y")?,
            size: fields.vec2("w", "h")?,
            opacity: fields.f32("opacity")?,
            background: fields.opt_bool("background")?.unwrap_or(false),
        })
    }

    pub fn sprite(&self) -> &str {
        &self.sprite
    }

    pub fn is_background(&self) -> bool {
        self.background
    }
}

impl Widget for ImageElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn area(&self) -> Area {
        Area::from_position_and_size(self.canvas_position, self.size)
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) -> Result<NodeId> {
        let sprite = ctx.renderer.sprite(&self.sprite)?;
        let position = ctx.renderer.calc_position(self.canvas_position, self.size);

        let node = ctx.create_node(&self.name);
        let n = &mut ctx.nodes[node];
        n.rect.position = position;
        n.rect.size = self.size;
        n.visual = Some(Visual::Image(ImageVisual {
            sprite,
            color: Color::WHITE.with_alpha(self.opacity / 100.0),
            draw_mode: DrawMode::Sliced,
            raycast_target: self.background,
        }));

        if self.background {
            n.rect.anchor_min = Vec2::zero();
            n.rect.anchor_max = Vec2::one();
            n.rect.size = Vec2::zero();
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::elements::Element;
    use crate::error::LayoutError;
    use crate::testing::{compile_value, render_value};

    fn icon() -> serde_json::Value {
        json!({ "type": "Image", "name": "Icon", "image": "icon.png",
                "x": 10, "y": 20, "w": 100, "h": 50, "opacity": 100 })
    }

    #[test]
    fn area_from_position_and_size() {
        let el = Element::generate(&icon()).unwrap();
        let area = el.area();
        assert_eq!(area.min(), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(area.max(), Some(Vec2::new(110.0, 70.0)));
    }

    #[test]
    fn renders_sized_sliced_opaque_image() {
        let (tree, node) = render_value(icon());
        let n = &tree[node];
        assert_eq!(n.name, "Icon");
        assert_eq!(n.rect.size, Vec2::new(100.0, 50.0));
        // Center (60, 45) on the 200x100 test canvas.
        assert_eq!(n.rect.position, Vec2::new(-40.0, 5.0));

        let image = n.image().unwrap();
        assert_eq!(image.sprite.name(), "icon.png");
        assert_eq!(image.color.a, 1.0);
        assert_eq!(image.draw_mode, DrawMode::Sliced);
        assert!(!image.raycast_target);
    }

    #[test]
    fn opacity_is_a_percentage() {
        let (tree, node) = render_value(json!({
            "type": "Image", "name": "Shade", "image": "icon", "x": 0, "y": 0, "w": 1, "h": 1, "opacity": 25
        }));
        assert_eq!(tree[node].image().unwrap().color.a, 0.25);
    }

    #[test]
    fn background_stretches_and_hits() {
        let out = compile_value(json!({
            "type": "Root", "name": "Screen", "elements": [
                { "type": "Image", "name": "Bg", "image": "icon", "background": true,
                  "x": 0, "y": 0, "w": 200, "h": 100, "opacity": 100 },
            ]
        }));
        let bg = out.tree.find(out.root, "Bg").unwrap();
        let n = &out.tree[bg];
        assert_eq!(n.rect.anchor_min, Vec2::zero());
        assert_eq!(n.rect.anchor_max, Vec2::one());
        assert_eq!(n.rect.size, Vec2::zero());
        assert!(n.image().unwrap().raycast_target);
    }

    #[test]
    fn unknown_sprite_fails() {
        let el = Element::generate(&json!({
            "type": "Image", "name": "Ghost", "image": "nope", "x": 0, "y": 0, "w": 1, "h": 1, "opacity": 100
        }))
        .unwrap();
        let err = crate::compile(el, &crate::testing::canvas_renderer()).unwrap_err();
        assert!(matches!(err, LayoutError::ResourceNotFound { ref name, .. } if name == "nope"));
    }

    #[test]
    fn missing_opacity_fails_to_parse() {
        let err = Element::generate(&json!({
            "type": "Image", "name": "Icon", "image": "icon", "x": 0, "y": 0, "w": 1, "h": 1
        }))
        .unwrap_err();
        assert!(matches!(err, LayoutError::MissingField { ref field, .. } if field == "opacity"));
    }
}
