//! Software rasterization of shapes into RGBA8 pixel buffers.
//!
//! Drawing is aliased: every pixel is either left alone or overwritten with
//! the stroke color. Pixel `(x, y)` is the unit square centered on
//! `(x + 0.5, y + 0.5)`, so a stroke along integer coordinates lands on
//! whole pixels. Buffers hold straight alpha while tiny-skia expects
//! premultiplied data; for an opaque stroke color the two agree on every
//! pixel that gets written.

use crate::input::PixelPoint;
use crate::shapes::{Shape, ShapeStyle};
use image::RgbaImage;
use kurbo::{BezPath, PathEl, Point};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, PixmapMut, Stroke, Transform};

/// Stroke a shape outline into `buffer`.
///
/// Shapes that collapse to a single point are drawn as a dot as wide as the
/// stroke.
pub fn stroke_shape(buffer: &mut RgbaImage, shape: &Shape, style: &ShapeStyle) {
    if shape.is_degenerate() {
        fill_disc(buffer, shape.bounds().origin(), style.stroke_width / 2.0, style);
        return;
    }

    let Some(path) = to_skia_path(&shape.to_path()) else {
        log::warn!("Skipping {}: outline has no drawable segments", shape);
        return;
    };

    let stroke = Stroke {
        width: style.stroke_width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Miter,
        ..Stroke::default()
    };
    let paint = solid_paint(style);
    with_pixmap(buffer, |pixmap| {
        pixmap.stroke_path(&path, &paint, &stroke, pixel_centers(), None);
    });
}

/// Fill the round anchor marker shown under a line's first point.
pub fn fill_marker(buffer: &mut RgbaImage, at: PixelPoint, style: &ShapeStyle) {
    fill_disc(buffer, at.to_point(), style.marker_radius, style);
}

fn fill_disc(buffer: &mut RgbaImage, center: Point, radius: f64, style: &ShapeStyle) {
    // Anything smaller would miss the center pixel entirely.
    let radius = radius.max(0.5) as f32;
    let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius) else {
        return;
    };
    let paint = solid_paint(style);
    with_pixmap(buffer, |pixmap| {
        pixmap.fill_path(&path, &paint, FillRule::Winding, pixel_centers(), None);
    });
}

fn solid_paint(style: &ShapeStyle) -> Paint<'static> {
    let color = style.stroke_color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = false;
    paint
}

fn pixel_centers() -> Transform {
    Transform::from_translate(0.5, 0.5)
}

fn with_pixmap(buffer: &mut RgbaImage, draw: impl FnOnce(&mut PixmapMut<'_>)) {
    let (width, height) = buffer.dimensions();
    let bytes: &mut [u8] = &mut **buffer;
    match PixmapMut::from_bytes(bytes, width, height) {
        Some(mut pixmap) => draw(&mut pixmap),
        None => log::warn!("Cannot rasterize into a {}x{} buffer", width, height),
    }
}

/// Convert a kurbo path into a tiny-skia path.
fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => {
                builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32)
            }
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
