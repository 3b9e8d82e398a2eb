//! In-memory codec implementation.

use super::{CodecError, CodecResult, ImageCodec};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory codec for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryCodec {
    images: RwLock<HashMap<PathBuf, RgbaImage>>,
}

impl MemoryCodec {
    /// Create a new empty memory codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an image under `path`, as if it had been written there.
    pub fn insert(&self, path: impl Into<PathBuf>, image: RgbaImage) {
        if let Ok(mut images) = self.images.write() {
            images.insert(path.into(), image);
        }
    }

    /// Get a copy of the image stored under `path`.
    pub fn get(&self, path: &Path) -> Option<RgbaImage> {
        self.images.read().ok()?.get(path).cloned()
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.images.read().map(|images| images.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ImageCodec for MemoryCodec {
    fn decode(&self, path: &Path) -> CodecResult<RgbaImage> {
        let images = self.images.read().map_err(|e| CodecError::Decode {
            path: path.display().to_string(),
            reason: format!("Lock error: {}", e),
        })?;
        images
            .get(path)
            .cloned()
            .ok_or_else(|| CodecError::NotFound(path.display().to_string()))
    }

    fn encode(&self, buffer: &RgbaImage, path: &Path) -> CodecResult<()> {
        let mut images = self.images.write().map_err(|e| CodecError::Encode {
            path: path.display().to_string(),
            reason: format!("Lock error: {}", e),
        })?;
        images.insert(path.to_path_buf(), buffer.clone());
        Ok(())
    }
}
