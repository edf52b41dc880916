//! Re-expresses a centered node position against an edge or corner anchor.
//!
//! Groups are laid out relative to the canvas center. A pivot keyword such
//! as `"bottom-left"` moves the node's anchor to that corner of its parent
//! and shifts the position by half the canvas so the node lands on the same
//! spot, but now follows that corner when the parent is resized.

use facade_engine::coords::Vec2;

use crate::node::{NodeId, NodeTree};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Vertical {
    Bottom,
    #[default]
    Middle,
    Top,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Horizontal {
    Left,
    #[default]
    Center,
    Right,
}

/// Parsed pivot keyword. The default is the centered pivot (`"none"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Pivot {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Pivot {
    /// Case-insensitive containment match on `top` / `bottom` / `left` /
    /// `right`. `bottom` wins over `top` and `left` over `right` when a
    /// keyword names both. Unset or unrecognized keywords are centered.
    pub fn parse(keyword: Option<&str>) -> Self {
        let k = keyword.unwrap_or("none").to_ascii_lowercase();
        let vertical = if k.contains("bottom") {
            Vertical::Bottom
        } else if k.contains("top") {
            Vertical::Top
        } else {
            Vertical::Middle
        };
        let horizontal = if k.contains("left") {
            Horizontal::Left
        } else if k.contains("right") {
            Horizontal::Right
        } else {
            Horizontal::Center
        };
        Self { vertical, horizontal }
    }

    /// Unit-rectangle anchor point for this pivot.
    pub fn anchor(self) -> Vec2 {
        let x = match self.horizontal {
            Horizontal::Left => 0.0,
            Horizontal::Center => 0.5,
            Horizontal::Right => 1.0,
        };
        let y = match self.vertical {
            Vertical::Bottom => 0.0,
            Vertical::Middle => 0.5,
            Vertical::Top => 1.0,
        };
        Vec2::new(x, y)
    }

    /// Converts a center-anchored position to one relative to [`anchor`](Self::anchor).
    pub fn place(self, centered: Vec2, canvas: Vec2) -> Vec2 {
        let half = canvas / 2.0;
        let mut p = centered;
        match self.vertical {
            Vertical::Bottom => p.y += half.y,
            Vertical::Top => p.y -= half.y,
            Vertical::Middle => {}
        }
        match self.horizontal {
            Horizontal::Left => p.x += half.x,
            Horizontal::Right => p.x -= half.x,
            Horizontal::Center => {}
        }
        p
    }
}

/// Point-anchors `node` at `pivot` and rewrites its position accordingly.
///
/// Must run after `node` has been parented, since it reinterprets the
/// node's local position.
pub fn apply(nodes: &mut NodeTree, node: NodeId, pivot: Pivot, canvas: Vec2) {
    let rect = &mut nodes[node].rect;
    let position = pivot.place(rect.position, canvas);
    log::trace!(
        "pivot {:?}: {:?} -> anchor {:?} at {:?}",
        pivot, rect.position, pivot.anchor(), position
    );
    rect.set_anchor(pivot.anchor());
    rect.position = position;
}

#[cfg(test)]
mod tests {
    use crate::node::NodeFactory;

    use super::*;

    const CANVAS: Vec2 = Vec2::new(1136.0, 640.0);

    #[test]
    fn parse_keywords() {
        assert_eq!(Pivot::parse(None), Pivot::default());
        assert_eq!(Pivot::parse(Some("")), Pivot::default());
        assert_eq!(Pivot::parse(Some("none")), Pivot::default());
        assert_eq!(
            Pivot::parse(Some("BottomLeft")),
            Pivot { vertical: Vertical::Bottom, horizontal: Horizontal::Left }
        );
        assert_eq!(
            Pivot::parse(Some("top-right")),
            Pivot { vertical: Vertical::Top, horizontal: Horizontal::Right }
        );
        assert_eq!(
            Pivot::parse(Some("RIGHT")),
            Pivot { vertical: Vertical::Middle, horizontal: Horizontal::Right }
        );
    }

    #[test]
    fn bottom_beats_top_and_left_beats_right() {
        let p = Pivot::parse(Some("topbottom leftright"));
        assert_eq!(p.vertical, Vertical::Bottom);
        assert_eq!(p.horizontal, Horizontal::Left);
    }

    #[test]
    fn none_keeps_center_and_position() {
        let mut tree = NodeTree::new();
        let n = tree.create_node("G");
        tree[n].rect.position = Vec2::new(12.0, -7.0);

        apply(&mut tree, n, Pivot::parse(Some("none")), CANVAS);

        assert_eq!(tree[n].rect.anchor_min, Vec2::splat(0.5));
        assert_eq!(tree[n].rect.anchor_max, Vec2::splat(0.5));
        assert_eq!(tree[n].rect.position, Vec2::new(12.0, -7.0));
    }

    #[test]
    fn bottom_left_shifts_by_half_canvas() {
        let mut tree = NodeTree::new();
        let n = tree.create_node("G");
        tree[n].rect.position = Vec2::new(12.0, -7.0);

        apply(&mut tree, n, Pivot::parse(Some("bottom-left")), CANVAS);

        assert_eq!(tree[n].rect.anchor_min, Vec2::zero());
        assert_eq!(tree[n].rect.anchor_max, Vec2::zero());
        assert_eq!(tree[n].rect.position, Vec2::new(12.0 + 568.0, -7.0 + 320.0));
    }

    #[test]
    fn top_right_shifts_negative() {
        let p = Pivot::parse(Some("topRight"));
        assert_eq!(p.anchor(), Vec2::one());
        assert_eq!(p.place(Vec2::zero(), CANVAS), Vec2::new(-568.0, -320.0));
    }

    #[test]
    fn pivot_does_not_touch_size() {
        let mut tree = NodeTree::new();
        let n = tree.create_node("G");
        tree[n].rect.size = Vec2::new(30.0, 40.0);
        apply(&mut tree, n, Pivot::parse(Some("top")), CANVAS);
        assert_eq!(tree[n].rect.size, Vec2::new(30.0, 40.0));
        assert_eq!(tree[n].rect.pivot, Vec2::splat(0.5));
    }
}
