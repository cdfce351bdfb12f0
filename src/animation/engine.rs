use super::easing::{ease_in_out, lerp, loop_progress, ping_pong};
use super::flash::{FlashSpot, FlashState};
use super::typewriter::TypewriterState;
use super::{clamp_speed, ScreenSize, TextMeasure, MAX_SPEED, MIN_SPEED};
use crate::models::{AnimationType, BannerStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

/// Per-effect state of the running session
#[derive(Debug, Clone)]
pub enum EffectState {
    /// No session
    Idle,
    /// `AnimationType::None`: drawn once, no timer
    Static,
    Scroll { distance: f32, duration: f64 },
    Blink { leg: f64 },
    Gradient { distance: f32, duration: f64 },
    Breathing { leg: f64 },
    Typewriter(TypewriterState),
    RandomFlash(FlashState),
}

/// Visual parameters for one rendered frame
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    pub animation_type: AnimationType,
    /// Horizontal offset of the scrolling text run
    pub text_offset_x: f32,
    pub opacity: f64,
    pub scale: f64,
    /// Horizontal offset of the spectrum overlay, when shown
    pub gradient_offset_x: Option<f32>,
    /// Typewriter buffer; the full text is drawn when `None`
    pub revealed_text: Option<String>,
    pub flashes: Vec<FlashSpot>,
    /// False when the text is drawn only through `flashes`
    pub draw_main_text: bool,
}

impl AnimationFrame {
    fn resting(animation_type: AnimationType) -> Self {
        Self {
            animation_type,
            text_offset_x: 0.0,
            opacity: 1.0,
            scale: 1.0,
            gradient_offset_x: None,
            revealed_text: None,
            flashes: Vec::new(),
            draw_main_text: true,
        }
    }
}

/// Drives a single banner display session
pub struct AnimationEngine<R: Rng = StdRng> {
    effect: EffectState,
    animation_type: AnimationType,
    elapsed: f64,
    speed: f64,
    min_speed: f64,
    max_speed: f64,
    sessions: u64,
    rng: R,
}

impl AnimationEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for AnimationEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> AnimationEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            effect: EffectState::Idle,
            animation_type: AnimationType::None,
            elapsed: 0.0,
            speed: 1.0,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            sessions: 0,
            rng,
        }
    }

    pub fn with_speed_range(mut self, min: f64, max: f64) -> Self {
        self.min_speed = min;
        self.max_speed = max;
        self
    }

    /// Begin a session for `style`, cancelling any session in progress
    pub fn start(&mut self, style: &BannerStyle, screen: ScreenSize, measure: &dyn TextMeasure) {
        self.stop();

        let speed = clamp_speed(style.animation_speed, self.min_speed, self.max_speed);
        if speed != style.animation_speed {
            debug!(
                "Clamped animation speed {} to {}",
                style.animation_speed, speed
            );
        }

        self.speed = speed;
        self.elapsed = 0.0;
        self.animation_type = style.animation_type;
        self.sessions += 1;
        self.effect = match style.animation_type {
            AnimationType::None => EffectState::Static,
            AnimationType::Scroll => {
                let text_width = measure.text_width(&style.text, style.font_size, style.is_bold);
                EffectState::Scroll {
                    distance: text_width + screen.width * 0.5,
                    duration: 8.0 / speed,
                }
            }
            AnimationType::Blink => EffectState::Blink { leg: 0.8 / speed },
            AnimationType::Gradient => EffectState::Gradient {
                distance: screen.width,
                duration: 3.0 / speed,
            },
            AnimationType::Breathing => EffectState::Breathing { leg: 2.0 / speed },
            AnimationType::Typewriter => {
                EffectState::Typewriter(TypewriterState::new(&style.text, speed))
            }
            AnimationType::RandomFlash => {
                EffectState::RandomFlash(FlashState::new(screen, speed, &mut self.rng))
            }
        };

        info!(
            "Started {:?} animation session {} at speed {:.2}",
            self.animation_type, self.sessions, speed
        );
    }

    /// Scheduler tick; fires every discrete timer that fell due
    pub fn advance(&mut self, dt: Duration) {
        self.advance_secs(dt.as_secs_f64());
    }

    pub fn advance_secs(&mut self, dt: f64) {
        if !self.is_running() {
            return;
        }
        let dt = dt.max(0.0);
        self.elapsed += dt;
        match &mut self.effect {
            EffectState::Typewriter(state) => state.advance(dt),
            EffectState::RandomFlash(state) => state.advance(dt, &mut self.rng),
            _ => {}
        }
    }

    /// Current visual parameters
    pub fn frame(&self) -> AnimationFrame {
        let mut frame = AnimationFrame::resting(self.animation_type);
        match &self.effect {
            EffectState::Idle | EffectState::Static => {}
            EffectState::Scroll { distance, duration } => {
                let p = loop_progress(self.elapsed, *duration);
                frame.text_offset_x = -(*distance * p as f32);
            }
            EffectState::Blink { leg } => {
                let t = ease_in_out(ping_pong(self.elapsed, *leg));
                frame.opacity = lerp(1.0, 0.3, t);
            }
            EffectState::Gradient { distance, duration } => {
                let p = loop_progress(self.elapsed, *duration);
                frame.gradient_offset_x = Some(-(*distance * p as f32));
            }
            EffectState::Breathing { leg } => {
                let t = ease_in_out(ping_pong(self.elapsed, *leg));
                let v = lerp(1.0, 0.5, t);
                frame.opacity = v;
                frame.scale = v;
            }
            EffectState::Typewriter(state) => {
                frame.revealed_text = Some(state.revealed_text());
            }
            EffectState::RandomFlash(state) => {
                frame.flashes = state.spots();
                frame.draw_main_text = false;
            }
        }
        frame
    }

    /// Tear down the session; safe to call repeatedly
    pub fn stop(&mut self) {
        match &mut self.effect {
            EffectState::Idle => return,
            EffectState::Typewriter(state) => state.clear(),
            EffectState::RandomFlash(state) => state.clear(),
            _ => {}
        }
        debug!("Stopped {:?} animation session {}", self.animation_type, self.sessions);
        self.effect = EffectState::Idle;
        self.elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.effect, EffectState::Idle)
    }

    /// Whether frames change over time
    pub fn needs_repaint(&self) -> bool {
        !matches!(self.effect, EffectState::Idle | EffectState::Static)
    }

    pub fn effect(&self) -> &EffectState {
        &self.effect
    }

    pub fn animation_type(&self) -> AnimationType {
        self.animation_type
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Sessions started over the engine's lifetime
    pub fn sessions(&self) -> u64 {
        self.sessions
    }
}

impl<R: Rng> std::fmt::Debug for AnimationEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationEngine")
            .field("effect", &self.effect)
            .field("elapsed", &self.elapsed)
            .field("speed", &self.speed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ApproxTextMeasure;

    fn engine() -> AnimationEngine<StdRng> {
        AnimationEngine::with_rng(StdRng::seed_from_u64(11))
    }

    fn screen() -> ScreenSize {
        ScreenSize::new(1000.0, 600.0)
    }

    #[test]
    fn test_static_session_never_repaints() {
        let mut e = engine();
        e.start(&BannerStyle::new("Hi"), screen(), &ApproxTextMeasure);
        assert!(e.is_running());
        assert!(!e.needs_repaint());
        e.advance_secs(5.0);
        assert_eq!(e.frame(), AnimationFrame::resting(AnimationType::None));
    }

    #[test]
    fn test_scroll_distance_uses_measured_width() {
        let mut e = engine();
        let style = BannerStyle::new("abcde")
            .with_font_size(50.0)
            .with_animation(AnimationType::Scroll, 1.0);
        e.start(&style, screen(), &ApproxTextMeasure);

        match e.effect() {
            EffectState::Scroll { distance, duration } => {
                assert!((*distance - 650.0).abs() < 1e-3);
                assert_eq!(*duration, 8.0);
            }
            other => panic!("unexpected effect {:?}", other),
        }

        e.advance_secs(4.0);
        assert!((e.frame().text_offset_x + 325.0).abs() < 1e-3);
        // loops without reversing
        e.advance_secs(4.0);
        assert!(e.frame().text_offset_x.abs() < 1e-3);
    }

    #[test]
    fn test_gradient_offsets_by_screen_width() {
        let mut e = engine();
        let style = BannerStyle::new("x").with_animation(AnimationType::Gradient, 2.0);
        e.start(&style, screen(), &ApproxTextMeasure);
        e.advance_secs(0.75);
        let offset = e.frame().gradient_offset_x.unwrap();
        assert!((offset + 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut e = engine();
        let style = BannerStyle::new("abc").with_animation(AnimationType::Typewriter, 1.0);
        e.start(&style, screen(), &ApproxTextMeasure);
        e.advance_secs(0.2);
        e.stop();
        e.stop();
        assert!(!e.is_running());
        assert_eq!(e.frame().revealed_text, None);
        // ticks after stop are ignored
        e.advance_secs(1.0);
        assert_eq!(e.elapsed(), 0.0);
    }

    #[test]
    fn test_restart_replaces_previous_session() {
        let mut e = engine();
        let flash = BannerStyle::new("x").with_animation(AnimationType::RandomFlash, 1.0);
        let blink = BannerStyle::new("x").with_animation(AnimationType::Blink, 1.0);
        e.start(&flash, screen(), &ApproxTextMeasure);
        e.advance_secs(1.0);
        e.start(&blink, screen(), &ApproxTextMeasure);

        assert_eq!(e.sessions(), 2);
        assert_eq!(e.elapsed(), 0.0);
        let frame = e.frame();
        assert!(frame.flashes.is_empty());
        assert!(frame.draw_main_text);
    }

    #[test]
    fn test_zero_speed_is_clamped() {
        let mut e = engine();
        let style = BannerStyle::new("x").with_animation(AnimationType::Blink, 0.0);
        e.start(&style, screen(), &ApproxTextMeasure);
        assert_eq!(e.speed(), MIN_SPEED);
        match e.effect() {
            EffectState::Blink { leg } => assert!(leg.is_finite()),
            other => panic!("unexpected effect {:?}", other),
        }
    }
}
