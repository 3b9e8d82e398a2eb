//! Image codec abstraction for loading and saving pixel buffers.

mod file;
mod memory;

pub use file::FileCodec;
pub use memory::MemoryCodec;

use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

/// Codec errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Image not found: {0}")]
    NotFound(String),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Trait for image decoding/encoding backends.
///
/// Implementations can read from the filesystem or keep images in memory.
pub trait ImageCodec {
    /// Decode the image at `path` into RGBA8 pixels.
    fn decode(&self, path: &Path) -> CodecResult<RgbaImage>;

    /// Encode `buffer` to `path`.
    fn encode(&self, buffer: &RgbaImage, path: &Path) -> CodecResult<()>;
}
