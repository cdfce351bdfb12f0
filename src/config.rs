//! Application configuration
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! or missing file yields a working setup.

use crate::animation::{MAX_SPEED, MIN_SPEED};
use crate::models::style::StyleLimits;
use crate::storage::DEFAULT_MAX_HISTORY;
use crate::{BannerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root for the key-value blobs and the images folder
    pub data_dir: PathBuf,

    /// History entries kept, newest first
    pub max_history_count: usize,

    /// JPEG quality for stored background images (1-100)
    pub jpeg_quality: u8,

    /// Images folder name inside `data_dir`
    pub images_folder: String,

    pub min_animation_speed: f64,
    pub max_animation_speed: f64,

    /// Whether premium features require an entitlement
    pub premium_gating: bool,

    /// Surface size used when no window reports one
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_history_count: DEFAULT_MAX_HISTORY,
            jpeg_quality: 80,
            images_folder: "BackgroundImages".to_string(),
            min_animation_speed: MIN_SPEED,
            max_animation_speed: MAX_SPEED,
            premium_gating: false,
            screen_width: 1280.0,
            screen_height: 720.0,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("ibanner"))
        .unwrap_or_else(|| PathBuf::from("ibanner-data"))
}

impl AppConfig {
    /// Load and validate a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| BannerError::Config(format!("{}: {}", path.display(), e)))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| BannerError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given and present, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path.exists() => match Self::load(path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Using default configuration: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_max_history(mut self, count: usize) -> Self {
        self.max_history_count = count;
        self
    }

    pub fn with_premium_gating(mut self, enabled: bool) -> Self {
        self.premium_gating = enabled;
        self
    }

    /// Directory holding the key-value blobs
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn style_limits(&self) -> StyleLimits {
        StyleLimits {
            min_animation_speed: self.min_animation_speed,
            max_animation_speed: self.max_animation_speed,
            ..StyleLimits::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_history_count == 0 {
            return Err(BannerError::Config(
                "max_history_count must be at least 1".to_string(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(BannerError::Config(format!(
                "jpeg_quality must be within 1-100, got {}",
                self.jpeg_quality
            )));
        }
        if !(self.min_animation_speed > 0.0
            && self.min_animation_speed.is_finite()
            && self.max_animation_speed.is_finite()
            && self.min_animation_speed <= self.max_animation_speed)
        {
            return Err(BannerError::Config(format!(
                "invalid animation speed range {}..{}",
                self.min_animation_speed, self.max_animation_speed
            )));
        }
        if self.images_folder.is_empty()
            || self.images_folder.contains(['/', '\\'])
            || self.images_folder == ".."
        {
            return Err(BannerError::Config(format!(
                "images_folder must be a plain directory name, got {:?}",
                self.images_folder
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.max_history_count, 10);
        assert_eq!(config.jpeg_quality, 80);
        assert!(!config.premium_gating);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("max_history_count = 3\n").unwrap();
        assert_eq!(config.max_history_count, 3);
        assert_eq!(config.images_folder, "BackgroundImages");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AppConfig::default().with_max_history(0).validate().is_err());

        let mut config = AppConfig::default();
        config.min_animation_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.images_folder = "../up".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ibanner.toml");
        fs::write(&path, "jpeg_quality = 95\npremium_gating = true\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.jpeg_quality, 95);
        assert!(config.premium_gating);

        fs::write(&path, "jpeg_quality = 0\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(BannerError::Config(_))));
        assert_eq!(AppConfig::load_or_default(Some(path.as_path())), AppConfig::default());
    }
}
