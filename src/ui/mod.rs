//! egui shell for iBanner
//!
//! Editor screens for composing banners, browsing history and templates,
//! plus the full-screen banner surface.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::BannerApp;
pub use state::{AppState, Screen};
pub use theme::Theme;
