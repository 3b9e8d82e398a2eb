//! Line shape.

use super::ShapeTrait;
use crate::input::PixelPoint;
use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};

/// A straight segment between two clicked points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Start point.
    pub start: PixelPoint,
    /// End point.
    pub end: PixelPoint,
}

impl Line {
    pub fn new(start: PixelPoint, end: PixelPoint) -> Self {
        Self { start, end }
    }
}

impl ShapeTrait for Line {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start.to_point(), self.end.to_point())
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start.to_point());
        path.line_to(self.end.to_point());
        path
    }
}
