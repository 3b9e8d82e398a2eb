//! Shape geometry derived from a tool's sample points.

mod circle;
mod line;
mod rectangle;

pub use circle::Circle;
pub use line::Line;
pub use rectangle::Rectangle;

use image::Rgba;
use kurbo::{BezPath, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Stroke color as straight (non-premultiplied) RGBA8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl StrokeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn green() -> Self {
        Self::new(0, 255, 0, 255)
    }

    /// The color as an image pixel.
    pub fn to_pixel(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl From<Color> for StrokeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<StrokeColor> for Color {
    fn from(color: StrokeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style shared by every shape of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: StrokeColor,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Radius of the anchor marker shown while a line has one point.
    pub marker_radius: f64,
}

impl ShapeStyle {
    pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
    pub const DEFAULT_MARKER_RADIUS: f64 = 3.0;

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: StrokeColor::green(),
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
            marker_radius: Self::DEFAULT_MARKER_RADIUS,
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the bounding box in image coordinates.
    fn bounds(&self) -> Rect;

    /// Get the outline to be stroked.
    fn to_path(&self) -> BezPath;

    /// A shape that collapses to a single point. It still rasterizes, as a dot.
    fn is_degenerate(&self) -> bool {
        let bounds = self.bounds();
        bounds.width() == 0.0 && bounds.height() == 0.0
    }
}

/// A shape produced by one drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Line(Line),
    Circle(Circle),
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Line(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        match self {
            Shape::Rectangle(s) => s.is_degenerate(),
            Shape::Line(s) => s.is_degenerate(),
            Shape::Circle(s) => s.is_degenerate(),
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Rectangle(r) => write!(f, "Rectangle drawn from {} to {}", r.start, r.end),
            Shape::Line(l) => write!(f, "Line drawn from {} to {}", l.start, l.end),
            Shape::Circle(c) => {
                write!(f, "Circle drawn at {} with radius {}", c.center, c.radius)
            }
        }
    }
}
