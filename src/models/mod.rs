pub mod color;
pub mod history;
pub mod style;
pub mod template;

pub use color::Rgba;
pub use history::BannerHistory;
pub use style::{AnimationType, BackgroundType, BannerStyle, FontStyle, MAX_TEXT_CHARS};
pub use template::{BannerTemplate, TemplateCategory};
