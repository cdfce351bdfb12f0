use serde::{Deserialize, Serialize};

/// An RGBA color with each channel in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const RED: Rgba = Rgba::rgb(1.0, 0.231, 0.188);
    pub const ORANGE: Rgba = Rgba::rgb(1.0, 0.584, 0.0);
    pub const YELLOW: Rgba = Rgba::rgb(1.0, 0.8, 0.0);
    pub const GREEN: Rgba = Rgba::rgb(0.204, 0.78, 0.349);
    pub const BLUE: Rgba = Rgba::rgb(0.0, 0.478, 1.0);
    pub const PURPLE: Rgba = Rgba::rgb(0.686, 0.322, 0.871);
    pub const PINK: Rgba = Rgba::rgb(1.0, 0.176, 0.333);
    pub const CLEAR: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Build from 8-bit channels
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )
    }

    /// Convert to 8-bit channels, clamping out-of-range values
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.red), q(self.green), q(self.blue), q(self.alpha)]
    }

    /// Same color with alpha multiplied by `factor`
    pub fn with_opacity(self, factor: f64) -> Self {
        Self {
            alpha: (self.alpha * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// The seven-stop spectrum used by the gradient background effect
    pub fn spectrum() -> [Rgba; 7] {
        [
            Rgba::RED,
            Rgba::ORANGE,
            Rgba::YELLOW,
            Rgba::GREEN,
            Rgba::BLUE,
            Rgba::PURPLE,
            Rgba::PINK,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_conversion_clamps() {
        let c = Rgba::new(1.5, -0.2, 0.5, 1.0);
        assert_eq!(c.to_rgba8(), [255, 0, 128, 255]);
        assert_eq!(Rgba::from_rgba8(255, 0, 0, 255), Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_json_uses_channel_names() {
        let json = serde_json::to_value(Rgba::WHITE).unwrap();
        assert_eq!(json["red"], 1.0);
        assert_eq!(json["alpha"], 1.0);
    }
}
