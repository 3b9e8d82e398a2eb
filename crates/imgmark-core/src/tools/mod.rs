//! Tool strategies: how each shape kind samples pointer input and draws
//! itself into the preview.

use crate::input::PixelPoint;
use crate::raster;
use crate::shapes::{Circle, Line, Rectangle, Shape, ShapeStyle};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    /// Press at one corner, drag to the opposite one.
    Rectangle,
    /// Click the two end points.
    Line,
    /// Press at the center, drag out the radius.
    Circle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Rectangle, ToolKind::Line, ToolKind::Circle];

    /// Display name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Line => "Line",
            ToolKind::Circle => "Circle",
        }
    }

    /// Number of samples that fully define the shape.
    pub fn sample_count(self) -> usize {
        2
    }

    /// Whether the shape follows the pointer while the button is held.
    /// Tools without a drag phase only react to presses.
    pub fn has_drag_phase(self) -> bool {
        match self {
            ToolKind::Rectangle | ToolKind::Circle => true,
            ToolKind::Line => false,
        }
    }

    /// Record a button press.
    ///
    /// Drag tools restart from the pressed point; the line tool appends
    /// it until both end points are known.
    pub fn press(self, samples: &mut Vec<PixelPoint>, point: PixelPoint) {
        if self.has_drag_phase() {
            samples.clear();
            samples.push(point);
        } else if samples.len() < self.sample_count() {
            samples.push(point);
        }
    }

    /// Move the free end of a drag to `point`.
    pub fn update_from_pointer(self, samples: &mut Vec<PixelPoint>, point: PixelPoint) {
        if !self.has_drag_phase() || samples.is_empty() {
            return;
        }
        samples.truncate(1);
        samples.push(point);
    }

    /// Whether every sample the shape needs has been collected.
    pub fn is_complete(self, samples: &[PixelPoint]) -> bool {
        samples.len() >= self.sample_count()
    }

    /// Build the shape described by `samples`, if there is one yet.
    pub fn shape(self, samples: &[PixelPoint]) -> Option<Shape> {
        let anchor = *samples.first()?;
        // A drag that has not moved yet is a zero-size shape at the anchor.
        let current = samples.get(1).copied();

        match self {
            ToolKind::Rectangle => Some(Shape::Rectangle(Rectangle::new(
                anchor,
                current.unwrap_or(anchor),
            ))),
            ToolKind::Circle => Some(Shape::Circle(Circle::through(
                anchor,
                current.unwrap_or(anchor),
            ))),
            ToolKind::Line => current.map(|end| Shape::Line(Line::new(anchor, end))),
        }
    }

    /// Whether the shape may be committed.
    ///
    /// Degenerate rectangles and lines are accepted; a circle needs a
    /// positive radius.
    pub fn is_valid_to_commit(self, samples: &[PixelPoint]) -> bool {
        match self.shape(samples) {
            Some(Shape::Circle(circle)) => circle.radius > 0,
            Some(_) => true,
            None => false,
        }
    }

    /// Draw the in-progress shape into `buffer`.
    pub fn rasterize(self, samples: &[PixelPoint], style: &ShapeStyle, buffer: &mut RgbaImage) {
        if let Some(shape) = self.shape(samples) {
            raster::stroke_shape(buffer, &shape, style);
        } else if let (ToolKind::Line, Some(first)) = (self, samples.first()) {
            raster::fill_marker(buffer, *first, style);
        }
    }

    /// Instructions shown when a session starts.
    pub fn instructions(self) -> &'static str {
        match self {
            ToolKind::Rectangle => "click and drag, Enter to confirm, Esc to cancel",
            ToolKind::Line => "click two points, Enter to confirm, Esc to cancel",
            ToolKind::Circle => {
                "click the center and drag out the radius, Enter to confirm, Esc to cancel"
            }
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
