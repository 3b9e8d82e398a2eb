//! Filesystem codec backed by the `image` crate.

use super::{CodecError, CodecResult, ImageCodec};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::Path;

/// Reads and writes image files; the format follows the file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCodec;

impl FileCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ImageCodec for FileCodec {
    fn decode(&self, path: &Path) -> CodecResult<RgbaImage> {
        if !path.is_file() {
            return Err(CodecError::NotFound(path.display().to_string()));
        }

        let decoded = image::open(path).map_err(|e| CodecError::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(decoded.to_rgba8())
    }

    fn encode(&self, buffer: &RgbaImage, path: &Path) -> CodecResult<()> {
        let encode_err = |e: image::ImageError| CodecError::Encode {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let format = ImageFormat::from_path(path).map_err(encode_err)?;
        match format {
            // JPEG has no alpha channel.
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(buffer.clone())
                .to_rgb8()
                .save_with_format(path, format)
                .map_err(encode_err),
            _ => buffer.save_with_format(path, format).map_err(encode_err),
        }
    }
}
