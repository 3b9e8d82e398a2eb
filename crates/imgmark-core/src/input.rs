//! Pointer/key events delivered by the windowing surface, and the
//! presentation side of that surface.

use image::RgbaImage;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A pointer position in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point, truncated to whole pixels.
    pub fn distance_to(self, other: PixelPoint) -> u32 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy) as u32
    }

    /// Get as a kurbo Point.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl std::fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Pointer event for the primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(PixelPoint),
    Move(PixelPoint),
    Up(PixelPoint),
}

impl PointerEvent {
    /// Position carried by the event.
    pub fn position(&self) -> PixelPoint {
        match *self {
            PointerEvent::Down(p) | PointerEvent::Move(p) | PointerEvent::Up(p) => p,
        }
    }
}

/// Keyboard commands understood by a drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    /// Accept the shape being drawn (Enter).
    Confirm,
    /// Throw the shape away (Escape).
    Cancel,
}

/// Something that can display a pixel buffer.
///
/// Implemented by the window layer; the controller hands it the preview
/// while a session is live and the committed image otherwise.
pub trait Surface {
    fn present(&mut self, buffer: &RgbaImage);
}
