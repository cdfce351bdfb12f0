//! Banner style model
//!
//! A `BannerStyle` is a plain value: it is cloned into history entries and
//! templates, never shared.

use super::color::Rgba;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest banner text accepted by the settings form
pub const MAX_TEXT_CHARS: usize = 100;

/// Background fill of the banner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundType {
    #[default]
    Color,
    Image,
}

impl BackgroundType {
    pub const ALL: [BackgroundType; 2] = [BackgroundType::Color, BackgroundType::Image];

    pub fn display_name(&self) -> &'static str {
        match self {
            BackgroundType::Color => "Solid color",
            BackgroundType::Image => "Image",
        }
    }
}

/// Animation effect applied while the banner is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationType {
    #[default]
    None,
    Scroll,
    Blink,
    Gradient,
    Breathing,
    Typewriter,
    RandomFlash,
}

impl AnimationType {
    pub const ALL: [AnimationType; 7] = [
        AnimationType::None,
        AnimationType::Scroll,
        AnimationType::Blink,
        AnimationType::Gradient,
        AnimationType::Breathing,
        AnimationType::Typewriter,
        AnimationType::RandomFlash,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            AnimationType::None => "None",
            AnimationType::Scroll => "Scroll",
            AnimationType::Blink => "Blink",
            AnimationType::Gradient => "Gradient",
            AnimationType::Breathing => "Breathing",
            AnimationType::Typewriter => "Typewriter",
            AnimationType::RandomFlash => "Random flash",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnimationType::None => "Static display without animation",
            AnimationType::Scroll => "Text scrolls from right to left",
            AnimationType::Blink => "Text blinks like a marquee sign",
            AnimationType::Gradient => "Rainbow gradient sweeps across the background",
            AnimationType::Breathing => "Text fades and shrinks like a breathing light",
            AnimationType::Typewriter => "Text appears one character at a time",
            AnimationType::RandomFlash => "Text flashes at random places on screen",
        }
    }

    /// Whether the effect needs continuous repaints
    pub fn is_animated(&self) -> bool {
        !matches!(self, AnimationType::None)
    }
}

/// Decorative treatment of the banner text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontStyle {
    #[default]
    Normal,
    Artistic,
    Neon,
}

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Normal, FontStyle::Artistic, FontStyle::Neon];

    pub fn display_name(&self) -> &'static str {
        match self {
            FontStyle::Normal => "Normal",
            FontStyle::Artistic => "Artistic",
            FontStyle::Neon => "Neon",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FontStyle::Normal => "Standard text rendering",
            FontStyle::Artistic => "Decorative shadow and sheen",
            FontStyle::Neon => "Glowing neon outline",
        }
    }
}

/// Bounds applied by [`BannerStyle::validated`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleLimits {
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub min_animation_speed: f64,
    pub max_animation_speed: f64,
}

impl Default for StyleLimits {
    fn default() -> Self {
        Self {
            min_font_size: 20.0,
            max_font_size: 100.0,
            min_animation_speed: crate::animation::MIN_SPEED,
            max_animation_speed: crate::animation::MAX_SPEED,
        }
    }
}

/// Complete visual and animation parameters of one banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerStyle {
    pub text: String,
    pub font_size: f32,
    pub text_color: Rgba,
    pub background_color: Rgba,
    #[serde(default)]
    pub background_type: BackgroundType,
    /// Path relative to the data directory
    #[serde(default)]
    pub background_image_path: Option<String>,
    #[serde(default = "default_opacity")]
    pub background_image_opacity: f64,
    #[serde(default)]
    pub animation_type: AnimationType,
    #[serde(default = "default_speed")]
    pub animation_speed: f64,
    #[serde(default)]
    pub is_bold: bool,
    #[serde(default)]
    pub font_style: FontStyle,
    pub created_at: DateTime<Utc>,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_speed() -> f64 {
    1.0
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 48.0,
            text_color: Rgba::WHITE,
            background_color: Rgba::BLACK,
            background_type: BackgroundType::Color,
            background_image_path: None,
            background_image_opacity: 1.0,
            animation_type: AnimationType::None,
            animation_speed: 1.0,
            is_bold: false,
            font_style: FontStyle::Normal,
            created_at: Utc::now(),
        }
    }
}

impl BannerStyle {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_colors(mut self, text_color: Rgba, background_color: Rgba) -> Self {
        self.text_color = text_color;
        self.background_color = background_color;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_animation(mut self, animation_type: AnimationType, speed: f64) -> Self {
        self.animation_type = animation_type;
        self.animation_speed = speed;
        self
    }

    pub fn with_bold(mut self, is_bold: bool) -> Self {
        self.is_bold = is_bold;
        self
    }

    pub fn with_font_style(mut self, font_style: FontStyle) -> Self {
        self.font_style = font_style;
        self
    }

    pub fn with_background_image(mut self, path: impl Into<String>, opacity: f64) -> Self {
        self.background_type = BackgroundType::Image;
        self.background_image_path = Some(path.into());
        self.background_image_opacity = opacity;
        self
    }

    /// Whether an image background should be drawn
    pub fn uses_background_image(&self) -> bool {
        self.background_type == BackgroundType::Image && self.background_image_path.is_some()
    }

    /// Copy of this style with every field forced into its legal range
    ///
    /// Non-finite speeds fall back to 1.0 before clamping.
    pub fn validated(&self, limits: &StyleLimits) -> Self {
        let mut style = self.clone();
        if style.text.chars().count() > MAX_TEXT_CHARS {
            style.text = style.text.chars().take(MAX_TEXT_CHARS).collect();
        }
        style.font_size = if style.font_size.is_finite() {
            style
                .font_size
                .clamp(limits.min_font_size, limits.max_font_size)
        } else {
            48.0
        };
        style.background_image_opacity = if style.background_image_opacity.is_finite() {
            style.background_image_opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        style.animation_speed = crate::animation::clamp_speed(
            style.animation_speed,
            limits.min_animation_speed,
            limits.max_animation_speed,
        );
        style
    }

    /// The style with its text removed, as remembered between launches
    pub fn without_text(&self) -> Self {
        Self {
            text: String::new(),
            ..self.clone()
        }
    }
}
