//! Random flash state machine
//!
//! Five slots each hold a position and an opacity. Every `interval` one
//! random slot flashes: it fades in over `fade_in`, and `fade_out_delay`
//! after the trigger a fade-out of `fade_out` takes over from whatever
//! opacity the fade-in reached. Half the time the slot also moves.

use super::easing::{ease_in_out, lerp};
use super::{ScreenSize, TIMER_EPSILON};
use rand::Rng;

pub const FLASH_SLOTS: usize = 5;

/// Horizontal margin kept clear of flash centers
pub const FLASH_MARGIN_X: f32 = 50.0;
/// Vertical margin kept clear of flash centers
pub const FLASH_MARGIN_Y: f32 = 100.0;

/// What the renderer needs for one slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashSpot {
    pub x: f32,
    pub y: f32,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    x: f32,
    y: f32,
    /// Opacity when the current flash was triggered
    from: f64,
    /// Seconds since the current flash was triggered
    since: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct FlashState {
    slots: Vec<Slot>,
    screen: ScreenSize,
    timer: f64,
    interval: f64,
    fade_in: f64,
    fade_out_delay: f64,
    fade_out: f64,
    ticks: u64,
}

impl FlashState {
    /// `speed` must already be clamped to a positive value
    pub fn new<R: Rng + ?Sized>(screen: ScreenSize, speed: f64, rng: &mut R) -> Self {
        let slots = (0..FLASH_SLOTS)
            .map(|_| {
                let (x, y) = random_position(screen, rng);
                Slot {
                    x,
                    y,
                    from: 0.0,
                    since: None,
                }
            })
            .collect();
        Self {
            slots,
            screen,
            timer: 0.0,
            interval: 0.3 / speed,
            fade_in: 0.5 / speed,
            fade_out_delay: 0.3 / speed,
            fade_out: 0.3 / speed,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Number of timer fires so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn spots(&self) -> Vec<FlashSpot> {
        self.slots
            .iter()
            .map(|slot| FlashSpot {
                x: slot.x,
                y: slot.y,
                opacity: self.opacity_of(slot),
            })
            .collect()
    }

    fn opacity_of(&self, slot: &Slot) -> f64 {
        let Some(t) = slot.since else {
            return slot.from;
        };
        let fade_in_at = |t: f64| lerp(slot.from, 1.0, ease_in_out(t / self.fade_in));
        if t < self.fade_out_delay {
            fade_in_at(t)
        } else {
            let peak = fade_in_at(self.fade_out_delay);
            let p = (t - self.fade_out_delay) / self.fade_out;
            lerp(peak, 0.0, ease_in_out(p))
        }
    }

    /// Advance the scheduler clock by `dt` seconds
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) {
        if self.slots.is_empty() {
            return;
        }
        let dt = dt.max(0.0);
        // Fire timers in order so each slot's clock sees its own trigger time
        let mut remaining = dt;
        loop {
            let until_tick = (self.interval - self.timer).max(0.0);
            if remaining + TIMER_EPSILON < until_tick {
                let remaining = remaining.max(0.0);
                self.age_slots(remaining);
                self.timer += remaining;
                break;
            }
            self.age_slots(until_tick);
            remaining -= until_tick;
            self.timer = 0.0;
            self.tick(rng);
        }
    }

    fn age_slots(&mut self, dt: f64) {
        let done_at = self.fade_out_delay + self.fade_out;
        for slot in &mut self.slots {
            if let Some(since) = slot.since.as_mut() {
                *since += dt;
                if *since >= done_at {
                    slot.since = None;
                    slot.from = 0.0;
                }
            }
        }
    }

    /// One timer fire: flash a random slot, maybe move it
    fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.ticks += 1;
        let index = rng.random_range(0..self.slots.len());
        let current = self.opacity_of(&self.slots[index]);
        let move_it = rng.random_bool(0.5);
        let position = move_it.then(|| random_position(self.screen, rng));

        let slot = &mut self.slots[index];
        slot.from = current;
        slot.since = Some(0.0);
        if let Some((x, y)) = position {
            slot.x = x;
            slot.y = y;
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.timer = 0.0;
    }
}

/// Random point inside the safe area; centered when the screen is too small
pub fn random_position<R: Rng + ?Sized>(screen: ScreenSize, rng: &mut R) -> (f32, f32) {
    let axis = |len: f32, margin: f32, rng: &mut R| {
        if len > 2.0 * margin {
            rng.random_range(margin..=len - margin)
        } else {
            len / 2.0
        }
    };
    let x = axis(screen.width, FLASH_MARGIN_X, rng);
    let y = axis(screen.height, FLASH_MARGIN_Y, rng);
    (x, y)
}
