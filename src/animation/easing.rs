//! Timing curves for the continuous effects

/// Cubic ease-in-out over `t` in 0.0..=1.0
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Fraction through a non-reversing loop of `duration` seconds
pub fn loop_progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    (elapsed / duration).fract()
}

/// Position in a reversing cycle where each leg lasts `leg` seconds
///
/// Rises 0 -> 1 on even legs and falls 1 -> 0 on odd legs.
pub fn ping_pong(elapsed: f64, leg: f64) -> f64 {
    if leg <= 0.0 {
        return 0.0;
    }
    let legs = elapsed / leg;
    let frac = legs.fract();
    if (legs.floor() as u64) % 2 == 0 {
        frac
    } else {
        1.0 - frac
    }
}

/// Linear interpolation
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn test_ping_pong_reverses() {
        assert!((ping_pong(0.4, 0.8) - 0.5).abs() < 1e-9);
        assert!((ping_pong(1.2, 0.8) - 0.5).abs() < 1e-9);
        assert!((ping_pong(1.0, 0.8) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_loop_progress_wraps() {
        assert!((loop_progress(9.0, 8.0) - 0.125).abs() < 1e-12);
        assert_eq!(loop_progress(1.0, 0.0), 0.0);
    }
}
