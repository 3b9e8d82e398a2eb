//! Canvas pixel buffers.
//!
//! A canvas holds three buffers of identical size:
//! - `original`: the image as loaded, never written again;
//! - `committed`: the current drawing, changed only by [`Canvas::commit`]
//!   and [`Canvas::reset`];
//! - `preview`: scratch space for the shape being drawn, always rebuilt
//!   from `committed`.

use crate::codec::{CodecError, FileCodec, ImageCodec};
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading the source image.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Image not found: {0}")]
    NotFound(String),
    #[error("Could not decode image: {0}")]
    Decode(String),
    #[error("Image {0} has no pixels")]
    Empty(String),
}

impl From<CodecError> for LoadError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::NotFound(path) => LoadError::NotFound(path),
            other => LoadError::Decode(other.to_string()),
        }
    }
}

/// Errors raised while saving the committed image.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Empty filename, image not saved")]
    EmptyFilename,
    #[error("Could not save image: {0}")]
    Encode(#[from] CodecError),
}

/// Three-buffer pixel container.
#[derive(Debug, Clone)]
pub struct Canvas {
    original: RgbaImage,
    committed: RgbaImage,
    preview: RgbaImage,
}

impl Canvas {
    /// Create a canvas from pixels already in memory.
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            committed: image.clone(),
            preview: image.clone(),
            original: image,
        }
    }

    /// Decode the image at `path` from the filesystem.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with(&FileCodec::new(), path)
    }

    /// Decode the image at `path` through `codec`.
    pub fn load_with(codec: &dyn ImageCodec, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let image = codec.decode(path)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(LoadError::Empty(path.display().to_string()));
        }
        log::info!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_image(image))
    }

    /// The image as it was loaded.
    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    /// The current drawing.
    pub fn committed(&self) -> &RgbaImage {
        &self.committed
    }

    /// The scratch buffer of the shape being drawn.
    pub fn preview(&self) -> &RgbaImage {
        &self.preview
    }

    /// Width and height shared by all three buffers.
    pub fn dimensions(&self) -> (u32, u32) {
        self.original.dimensions()
    }

    /// Restore the committed drawing to the original image.
    pub fn reset(&mut self) {
        self.committed.clone_from(&self.original);
        self.preview.clone_from(&self.original);
    }

    /// Start the preview over from the committed drawing.
    pub fn begin_preview(&mut self) {
        self.preview.clone_from(&self.committed);
    }

    /// Rebuild the preview from the committed drawing, then let `draw`
    /// rasterize the in-progress shape on top of it.
    pub fn redraw_preview(&mut self, draw: impl FnOnce(&mut RgbaImage)) {
        self.begin_preview();
        draw(&mut self.preview);
    }

    /// Accept the preview as the new committed drawing.
    pub fn commit(&mut self) {
        self.committed.clone_from(&self.preview);
    }

    /// Drop the preview, leaving the committed drawing as it was.
    pub fn discard(&mut self) {
        self.begin_preview();
    }

    /// Encode the committed drawing to `path` on the filesystem.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        self.save_with(&FileCodec::new(), path)
    }

    /// Encode the committed drawing to `path` through `codec`.
    ///
    /// An empty or whitespace-only filename is rejected before the codec is
    /// touched.
    pub fn save_with(&self, codec: &dyn ImageCodec, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        if path.to_string_lossy().trim().is_empty() {
            return Err(SaveError::EmptyFilename);
        }
        codec.encode(&self.committed, path)?;
        log::info!("Saved image to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::MemoryCodec;
    use image::Rgba;
    use tempfile::tempdir;

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(8, 6, |x, y| Rgba([x as u8 * 30, y as u8 * 40, 90, 255]))
    }

    #[test]
    fn test_buffers_start_identical() {
        let canvas = Canvas::from_image(gradient());
        assert_eq!(canvas.original(), &gradient());
        assert_eq!(canvas.committed(), &gradient());
        assert_eq!(canvas.preview(), &gradient());
        assert_eq!(canvas.dimensions(), (8, 6));
    }

    #[test]
    fn test_preview_is_independent_copy() {
        let mut canvas = Canvas::from_image(gradient());
        canvas.redraw_preview(|buf| buf.put_pixel(0, 0, Rgba([1, 2, 3, 4])));

        assert_eq!(*canvas.preview().get_pixel(0, 0), Rgba([1, 2, 3, 4]));
        assert_eq!(canvas.committed(), &gradient());
        assert_eq!(canvas.original(), &gradient());
    }

    #[test]
    fn test_redraw_starts_from_committed() {
        let mut canvas = Canvas::from_image(gradient());
        canvas.redraw_preview(|buf| buf.put_pixel(0, 0, Rgba([1, 2, 3, 4])));
        canvas.redraw_preview(|buf| buf.put_pixel(1, 1, Rgba([5, 6, 7, 8])));

        // The first stroke must not linger.
        assert_eq!(canvas.preview().get_pixel(0, 0), gradient().get_pixel(0, 0));
        assert_eq!(*canvas.preview().get_pixel(1, 1), Rgba([5, 6, 7, 8]));
    }

    #[test]
    fn test_commit_and_discard() {
        let mut canvas = Canvas::from_image(gradient());
        canvas.redraw_preview(|buf| buf.put_pixel(2, 2, Rgba([9, 9, 9, 255])));
        canvas.commit();
        assert_eq!(canvas.committed(), canvas.preview());
        assert_eq!(*canvas.committed().get_pixel(2, 2), Rgba([9, 9, 9, 255]));

        let before = canvas.committed().clone();
        canvas.redraw_preview(|buf| buf.put_pixel(3, 3, Rgba([0, 0, 0, 0])));
        canvas.discard();
        assert_eq!(canvas.committed(), &before);
        assert_eq!(canvas.preview(), &before);
        assert_eq!(canvas.original(), &gradient());
    }

    #[test]
    fn test_reset_restores_original() {
        let mut canvas = Canvas::from_image(gradient());
        canvas.redraw_preview(|buf| buf.put_pixel(2, 2, Rgba([9, 9, 9, 255])));
        canvas.commit();

        canvas.reset();
        assert_eq!(canvas.committed(), &gradient());
        canvas.reset();
        assert_eq!(canvas.committed(), &gradient());
        assert_eq!(canvas.preview(), &gradient());
    }

    #[test]
    fn test_load_with_memory_codec() {
        let codec = MemoryCodec::new();
        codec.insert("in.png", gradient());

        let canvas = Canvas::load_with(&codec, "in.png").unwrap();
        assert_eq!(canvas.original(), &gradient());

        let missing = Canvas::load_with(&codec, "missing.png");
        assert!(matches!(missing, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.png");
        gradient().save(&path).unwrap();

        let canvas = Canvas::load(&path).unwrap();
        assert_eq!(canvas.committed(), &gradient());

        let missing = Canvas::load(dir.path().join("nope.png"));
        assert!(matches!(missing, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"\x00\x01\x02").unwrap();

        assert!(matches!(Canvas::load(&path), Err(LoadError::Decode(_))));
    }

    #[test]
    fn test_save_rejects_blank_filename() {
        let codec = MemoryCodec::new();
        let canvas = Canvas::from_image(gradient());

        assert!(matches!(canvas.save_with(&codec, ""), Err(SaveError::EmptyFilename)));
        assert!(matches!(canvas.save_with(&codec, "   "), Err(SaveError::EmptyFilename)));
        assert!(codec.is_empty());
    }

    #[test]
    fn test_save_writes_committed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut canvas = Canvas::from_image(gradient());
        canvas.redraw_preview(|buf| buf.put_pixel(0, 0, Rgba([0, 0, 0, 255])));

        // Uncommitted preview must not leak into the file.
        canvas.save(&path).unwrap();
        assert_eq!(image::open(&path).unwrap().to_rgba8(), gradient());
    }

    #[test]
    fn test_save_encode_failure_leaves_canvas_alone() {
        let dir = tempdir().unwrap();
        let canvas = Canvas::from_image(gradient());

        let result = canvas.save(dir.path().join("out.unknown"));
        assert!(matches!(result, Err(SaveError::Encode(_))));
        assert_eq!(canvas.committed(), &gradient());
    }
}
