//! Typewriter reveal state machine
//!
//! Reveals one more character every `interval`; once the whole text is
//! shown it holds for `pause` and starts over from an empty buffer.

use super::TIMER_EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    Typing,
    Paused,
}

#[derive(Debug, Clone)]
pub struct TypewriterState {
    chars: Vec<char>,
    revealed: usize,
    phase: TypewriterPhase,
    /// Seconds accumulated toward the next timer event
    timer: f64,
    interval: f64,
    pause: f64,
    cycles: u64,
}

impl TypewriterState {
    /// `speed` must already be clamped to a positive value
    pub fn new(text: &str, speed: f64) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let phase = if chars.is_empty() {
            TypewriterPhase::Paused
        } else {
            TypewriterPhase::Typing
        };
        Self {
            chars,
            revealed: 0,
            phase,
            timer: 0.0,
            interval: 0.1 / speed,
            pause: 2.0 / speed,
            cycles: 0,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn pause(&self) -> f64 {
        self.pause
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Number of completed reveal-and-pause cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn revealed_text(&self) -> String {
        self.chars[..self.revealed].iter().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.chars.len()
    }

    /// Advance the scheduler clock by `dt` seconds, firing every due event
    pub fn advance(&mut self, dt: f64) {
        self.timer += dt.max(0.0);
        loop {
            match self.phase {
                TypewriterPhase::Typing => {
                    if self.timer + TIMER_EPSILON < self.interval {
                        break;
                    }
                    self.timer -= self.interval;
                    self.tick();
                }
                TypewriterPhase::Paused => {
                    if self.timer + TIMER_EPSILON < self.pause {
                        break;
                    }
                    self.timer -= self.pause;
                    self.restart();
                }
            }
        }
    }

    /// One timer fire while typing
    fn tick(&mut self) {
        if self.revealed < self.chars.len() {
            self.revealed += 1;
        }
        if self.is_complete() {
            self.phase = TypewriterPhase::Paused;
        }
    }

    fn restart(&mut self) {
        self.revealed = 0;
        self.cycles += 1;
        if !self.chars.is_empty() {
            self.phase = TypewriterPhase::Typing;
        }
    }

    pub fn clear(&mut self) {
        self.revealed = 0;
        self.timer = 0.0;
        self.chars.clear();
        self.phase = TypewriterPhase::Paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveals_one_char_per_interval() {
        let mut tw = TypewriterState::new("Hello", 1.0);
        assert_eq!(tw.revealed_text(), "");
        tw.advance(0.1);
        assert_eq!(tw.revealed_text(), "H");
        tw.advance(0.1);
        assert_eq!(tw.revealed_text(), "He");
    }

    #[test]
    fn test_large_step_fires_all_due_events() {
        let mut tw = TypewriterState::new("Hello", 1.0);
        tw.advance(0.3);
        assert_eq!(tw.revealed_text(), "Hel");
    }

    #[test]
    fn test_multibyte_text() {
        let mut tw = TypewriterState::new("谢谢🙏", 2.0);
        tw.advance(0.05);
        assert_eq!(tw.revealed_text(), "谢");
        tw.advance(0.1);
        assert_eq!(tw.revealed_text(), "谢谢🙏");
        assert_eq!(tw.phase(), TypewriterPhase::Paused);
    }

    #[test]
    fn test_empty_text_never_panics() {
        let mut tw = TypewriterState::new("", 1.0);
        tw.advance(10.0);
        assert_eq!(tw.revealed_text(), "");
    }
}
