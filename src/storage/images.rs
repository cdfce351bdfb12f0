//! Background image assets
//!
//! Picked images are re-encoded as JPEG and stored under a dedicated folder
//! inside the data directory. Styles refer to them by relative path
//! (`BackgroundImages/bg_<uuid>.jpg`).

use crate::{BannerError, Result};
use image::codecs::jpeg::JpegEncoder;
use std::fs;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Decoded RGBA8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Encode to compressed bytes and decode back to pixels
pub trait ImageCodec: Send + Sync {
    /// File extension of encoded output, without the dot
    fn extension(&self) -> &'static str;

    /// Re-encode raw image bytes in any supported format
    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage>;
}

/// JPEG output through the `image` crate
#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    quality: u8,
}

impl JpegCodec {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self::new(80)
    }
}

impl ImageCodec for JpegCodec {
    fn extension(&self) -> &'static str {
        "jpg"
    }

    fn encode(&self, raw: &[u8]) -> Result<Vec<u8>> {
        let decoded = image::load_from_memory(raw)?;
        // JPEG has no alpha channel
        let rgb = decoded.to_rgb8();

        let mut out = Cursor::new(Vec::new());
        let mut encoder = JpegEncoder::new_with_quality(&mut out, self.quality);
        encoder.encode_image(&rgb)?;
        Ok(out.into_inner())
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        Ok(DecodedImage {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }
}

/// File management for background images
pub struct ImageAssets {
    root: PathBuf,
    folder: String,
    codec: Box<dyn ImageCodec>,
}

impl ImageAssets {
    pub fn new(root: impl Into<PathBuf>, folder: impl Into<String>, codec: Box<dyn ImageCodec>) -> Self {
        Self {
            root: root.into(),
            folder: folder.into(),
            codec,
        }
    }

    /// Absolute path of the images directory
    pub fn directory(&self) -> PathBuf {
        self.root.join(&self.folder)
    }

    pub fn codec(&self) -> &dyn ImageCodec {
        self.codec.as_ref()
    }

    pub fn ensure_directory(&self) -> Result<()> {
        fs::create_dir_all(self.directory())?;
        Ok(())
    }

    /// Resolve a stored relative path, rejecting anything that escapes the root
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let path = Path::new(relative);
        if relative.is_empty()
            || !path
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            warn!("Rejected image path {:?}", relative);
            return None;
        }
        Some(self.root.join(path))
    }

    /// Encode and write a new image, returning its relative path
    pub fn save(&self, raw: &[u8]) -> Result<String> {
        let encoded = self.codec.encode(raw)?;
        self.ensure_directory()?;

        let file_name = format!("bg_{}.{}", Uuid::new_v4(), self.codec.extension());
        let relative = format!("{}/{}", self.folder, file_name);
        fs::write(self.directory().join(&file_name), &encoded)?;

        info!("Saved background image {} ({} bytes)", relative, encoded.len());
        Ok(relative)
    }

    /// Load and decode a stored image
    pub fn load(&self, relative: &str) -> Result<DecodedImage> {
        let path = self
            .resolve(relative)
            .ok_or_else(|| BannerError::Validation(format!("invalid image path: {relative}")))?;
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BannerError::NotFound(relative.to_string()),
            _ => e.into(),
        })?;
        self.codec.decode(&bytes)
    }

    /// Best-effort removal; a missing file is not an error
    pub fn delete(&self, relative: &str) {
        let Some(path) = self.resolve(relative) else {
            return;
        };
        match fs::remove_file(&path) {
            Ok(()) => debug!("Deleted background image {}", relative),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => error!("Failed to delete background image {}: {}", relative, e),
        }
    }

    /// Remove every file in the images directory, continuing past failures
    pub fn clear_all(&self) {
        let entries = match fs::read_dir(self.directory()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                error!("Failed to list background images: {}", e);
                return;
            }
        };

        let mut removed = 0usize;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => error!("Failed to delete {:?}: {}", path, e),
            }
        }
        info!("Cleared {} background images", removed);
    }

    /// Relative paths of every stored image, sorted
    pub fn list(&self) -> Vec<String> {
        let entries = match fs::read_dir(self.directory()) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    error!("Failed to list background images: {}", e);
                }
                return Vec::new();
            }
        };

        let mut paths: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .map(|name| format!("{}/{}", self.folder, name))
            .collect();
        paths.sort();
        paths
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.resolve(relative).is_some_and(|p| p.is_file())
    }

    pub fn size(&self, relative: &str) -> Option<u64> {
        let path = self.resolve(relative)?;
        match fs::metadata(&path) {
            Ok(meta) => Some(meta.len()),
            Err(e) => {
                debug!("No size for {}: {}", relative, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for ImageAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAssets")
            .field("root", &self.root)
            .field("folder", &self.folder)
            .field("extension", &self.codec.extension())
            .finish()
    }
}
