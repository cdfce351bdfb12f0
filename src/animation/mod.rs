//! Banner animation engine
//!
//! One effect is active per display session. Continuous effects (scroll,
//! blink, gradient, breathing) are pure functions of elapsed time; the
//! timer-driven effects (typewriter, random flash) are explicit state
//! machines advanced by the same `advance` tick, so nothing here owns a
//! real timer.

pub mod easing;
mod engine;
pub mod flash;
pub mod typewriter;

pub use engine::{AnimationEngine, AnimationFrame, EffectState};
pub use flash::{FlashSpot, FlashState, FLASH_SLOTS};
pub use typewriter::{TypewriterPhase, TypewriterState};

/// Slowest accepted speed multiplier
pub const MIN_SPEED: f64 = 0.1;
/// Fastest accepted speed multiplier
pub const MAX_SPEED: f64 = 5.0;

/// Slack when comparing accumulated time against a timer interval
pub(crate) const TIMER_EPSILON: f64 = 1e-9;

/// Force a speed multiplier into `[min, max]`
///
/// Zero and negative speeds become `min`; NaN and infinities become 1.0
/// (itself clamped).
pub fn clamp_speed(speed: f64, min: f64, max: f64) -> f64 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let speed = if speed.is_finite() { speed } else { 1.0 };
    speed.clamp(min, max)
}

/// Size of the display surface in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Measures rendered text width for the scroll distance
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32, bold: bool) -> f32;
}

/// Font-free width estimate for headless sessions and tests
///
/// ASCII glyphs count as 0.6 em, everything else (CJK, emoji) as a full em.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    fn text_width(&self, text: &str, font_size: f32, bold: bool) -> f32 {
        let ems: f32 = text
            .chars()
            .map(|c| if c.is_ascii() { 0.6 } else { 1.0 })
            .sum();
        let weight = if bold { 1.05 } else { 1.0 };
        ems * font_size * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(0.0, MIN_SPEED, MAX_SPEED), MIN_SPEED);
        assert_eq!(clamp_speed(-3.0, MIN_SPEED, MAX_SPEED), MIN_SPEED);
        assert_eq!(clamp_speed(99.0, MIN_SPEED, MAX_SPEED), MAX_SPEED);
        assert_eq!(clamp_speed(f64::INFINITY, MIN_SPEED, MAX_SPEED), 1.0);
        assert_eq!(clamp_speed(1.5, MIN_SPEED, MAX_SPEED), 1.5);
        // swapped bounds are tolerated
        assert_eq!(clamp_speed(9.0, 2.0, 0.5), 2.0);
    }

    #[test]
    fn test_approx_measure() {
        let m = ApproxTextMeasure;
        assert_eq!(m.text_width("ab", 10.0, false), 12.0);
        assert_eq!(m.text_width("谢", 10.0, false), 10.0);
        assert!(m.text_width("ab", 10.0, true) > 12.0);
    }
}
