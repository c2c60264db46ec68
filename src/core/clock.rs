//! Injectable monotonic time source
//!
//! All "wait" semantics in the engine (attack cooldowns, summon timers,
//! stun expiry, despawn delays) are scheduled absolute times compared
//! against this clock at tick time. Nothing accumulates frame deltas, so
//! timing never drifts with frame-rate variation and tests can drive the
//! clock directly without sleeping.

/// Monotonic simulation clock, advanced once per tick
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    now: f64,
}

impl GameClock {
    pub fn new() -> Self {
        Self { now: 0.0 }
    }

    /// Current simulation time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance the clock by one tick's worth of seconds
    ///
    /// Negative deltas are ignored; the clock never moves backward.
    pub fn advance(&mut self, dt: f64) {
        if dt > 0.0 {
            self.now += dt;
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero() {
        assert_eq!(GameClock::new().now(), 0.0);
    }

    #[test]
    fn test_clock_advances() {
        let mut clock = GameClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert!((clock.now() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_clock_ignores_negative_delta() {
        let mut clock = GameClock::new();
        clock.advance(1.0);
        clock.advance(-5.0);
        assert_eq!(clock.now(), 1.0);
    }
}
