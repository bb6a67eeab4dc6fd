//! Frame Timers
//!
//! Countdown counters that drive cooldowns, combo windows, hit-stun,
//! invincibility and power-up durations.
//!
//! A timer is advanced exactly once per simulation tick and never goes
//! below zero. [`FrameTimer::tick`] reports the frame on which it lapses
//! so the dependent effect can be switched off on that same frame.

use serde::{Serialize, Deserialize};

/// Independent per-effect countdown, measured in frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTimer {
    remaining: u32,
}

impl FrameTimer {
    /// An idle timer.
    pub const IDLE: Self = Self { remaining: 0 };

    /// Create a timer already running for `frames`.
    #[inline]
    pub const fn running(frames: u32) -> Self {
        Self { remaining: frames }
    }

    /// (Re)start the countdown. Overwrites any remaining time.
    #[inline]
    pub fn start(&mut self, frames: u32) {
        self.remaining = frames;
    }

    /// Stop the timer immediately.
    #[inline]
    pub fn clear(&mut self) {
        self.remaining = 0;
    }

    /// Is the effect still active?
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Frames left before the timer lapses.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance one frame.
    ///
    /// Returns `true` only on the frame the timer reaches zero.
    #[inline]
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_timer_lapses_once() {
        let mut timer = FrameTimer::running(3);
        assert!(timer.is_active());

        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick()); // reaches zero here
        assert!(!timer.is_active());

        // Idle ticks are no-ops
        assert!(!timer.tick());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_restart_overwrites() {
        let mut timer = FrameTimer::running(5);
        timer.tick();
        timer.start(120);
        assert_eq!(timer.remaining(), 120);

        timer.clear();
        assert!(!timer.is_active());
    }

    proptest! {
        #[test]
        fn prop_timer_never_negative(start in 0u32..500, ticks in 0usize..1000) {
            let mut timer = FrameTimer::running(start);
            let mut lapses = 0;
            for _ in 0..ticks {
                if timer.tick() {
                    lapses += 1;
                }
            }
            prop_assert_eq!(timer.remaining(), start.saturating_sub(ticks as u32));
            prop_assert!(lapses <= 1);
            prop_assert_eq!(lapses == 1, start > 0 && ticks as u32 >= start);
        }
    }
}
