use serde::Serialize;

use super::Vec2;

/// Axis-aligned bounding box in design-canvas units (top-left origin, +Y down).
///
/// `Area::NONE` carries no bounds and is the identity of [`merge`](Area::merge):
/// a group with no visible children has the `NONE` area, and merging it into
/// anything leaves the other operand unchanged.
///
/// Invariant: when bounds are present, `min.x <= max.x` and `min.y <= max.y`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct Area {
    bounds: Option<(Vec2, Vec2)>,
}

impl Area {
    pub const NONE: Area = Area { bounds: None };

    /// Builds an area from its top-left corner and extent.
    ///
    /// Negative extents are folded back so the min/max invariant holds.
    #[inline]
    pub fn from_position_and_size(position: Vec2, size: Vec2) -> Self {
        Self::from_min_max(position, position + size)
    }

    #[inline]
    pub fn from_min_max(a: Vec2, b: Vec2) -> Self {
        Self { bounds: Some((a.min(b), a.max(b))) }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.bounds.is_none()
    }

    #[inline]
    pub fn min(self) -> Option<Vec2> {
        self.bounds.map(|(min, _)| min)
    }

    #[inline]
    pub fn max(self) -> Option<Vec2> {
        self.bounds.map(|(_, max)| max)
    }

    /// Extent of the box; zero for `NONE`.
    #[inline]
    pub fn size(self) -> Vec2 {
        match self.bounds {
            Some((min, max)) => max - min,
            None => Vec2::zero(),
        }
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size().x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size().y
    }

    /// Smallest box containing both operands.
    #[must_use]
    pub fn merge(self, other: Area) -> Area {
        match (self.bounds, other.bounds) {
            (Some((a_min, a_max)), Some((b_min, b_max))) => Area {
                bounds: Some((a_min.min(b_min), a_max.max(b_max))),
            },
            (Some(_), None) => self,
            (None, _) => other,
        }
    }
}

impl FromIterator<Area> for Area {
    fn from_iter<I: IntoIterator<Item = Area>>(iter: I) -> Self {
        iter.into_iter().fold(Area::NONE, Area::merge)
    }
}
