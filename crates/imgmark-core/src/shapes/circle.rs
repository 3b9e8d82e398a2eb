//! Circle shape.

use super::ShapeTrait;
use crate::input::PixelPoint;
use kurbo::{BezPath, Circle as KurboCircle, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle outline with a whole-pixel radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: PixelPoint,
    /// Radius in pixels.
    pub radius: u32,
}

impl Circle {
    pub fn new(center: PixelPoint, radius: u32) -> Self {
        Self { center, radius }
    }

    /// Create a circle whose outline passes through `edge` (radius truncated).
    pub fn through(center: PixelPoint, edge: PixelPoint) -> Self {
        Self::new(center, center.distance_to(edge))
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center.to_point(), f64::from(self.radius))
    }
}

impl ShapeTrait for Circle {
    fn bounds(&self) -> Rect {
        self.as_kurbo().bounding_box()
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }
}
