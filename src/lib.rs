//! iBanner - full-screen text banners with animated effects
//!
//! The library holds everything that is not window chrome: the style model,
//! the persistence store (history, templates, favorites, background images),
//! the template catalog and the tick-driven animation engine. The `ui`
//! module is a thin egui shell on top.

pub mod animation;
pub mod catalog;
pub mod config;
pub mod models;
pub mod premium;
pub mod storage;
pub mod ui;

use thiserror::Error;

pub use animation::{AnimationEngine, AnimationFrame, ScreenSize, TextMeasure};
pub use catalog::TemplateCatalog;
pub use config::AppConfig;
pub use models::{
    AnimationType, BackgroundType, BannerHistory, BannerStyle, BannerTemplate, FontStyle, Rgba,
    TemplateCategory,
};
pub use storage::{BannerStore, StoreEvent};

#[derive(Error, Debug, Clone)]
pub enum BannerError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Image codec error: {0}")]
    ImageCodec(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for BannerError {
    fn from(e: std::io::Error) -> Self {
        BannerError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for BannerError {
    fn from(e: serde_json::Error) -> Self {
        BannerError::Serialization(e.to_string())
    }
}

impl From<image::ImageError> for BannerError {
    fn from(e: image::ImageError) -> Self {
        BannerError::ImageCodec(e.to_string())
    }
}

impl BannerError {
    /// Check if this error is recoverable
    ///
    /// Nothing in the store is fatal; only a broken configuration needs the
    /// user to step in before the next start.
    pub fn is_recoverable(&self) -> bool {
        match self {
            BannerError::Io(_) => true,
            BannerError::Serialization(_) => true,
            BannerError::ImageCodec(_) => true,
            BannerError::Config(_) => false,
            BannerError::Validation(_) => true,
            BannerError::NotFound(_) => true,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            BannerError::Io(_) => "File system error occurred.".to_string(),
            BannerError::Serialization(_) => {
                "Saved data could not be read and was reset.".to_string()
            }
            BannerError::ImageCodec(_) => {
                "The image could not be processed. Please pick another one.".to_string()
            }
            BannerError::Config(_) => "Configuration error. Please check settings.".to_string(),
            BannerError::Validation(_) => "That action is not allowed.".to_string(),
            BannerError::NotFound(_) => "The requested item no longer exists.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BannerError>;
