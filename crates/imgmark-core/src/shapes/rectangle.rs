//! Rectangle shape.

use super::ShapeTrait;
use crate::input::PixelPoint;
use kurbo::{BezPath, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle spanned by two opposite corners.
///
/// The corners are kept as sampled; `as_rect` normalizes them, so the
/// order in which they were given never changes the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Anchor corner (where the drag started).
    pub start: PixelPoint,
    /// Opposite corner.
    pub end: PixelPoint,
}

impl Rectangle {
    pub fn new(start: PixelPoint, end: PixelPoint) -> Self {
        Self { start, end }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.start.to_point(), self.end.to_point())
    }
}

impl ShapeTrait for Rectangle {
    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn to_path(&self) -> BezPath {
        let rect = self.as_rect();
        if rect.width() == 0.0 || rect.height() == 0.0 {
            // A flat rectangle is a segment; stroking it as a closed
            // contour would double back over itself.
            let mut path = BezPath::new();
            path.move_to((rect.x0, rect.y0));
            path.line_to((rect.x1, rect.y1));
            return path;
        }
        rect.to_path(0.1)
    }
}
