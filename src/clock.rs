//! Millisecond clocks for cooperative scheduling.
//!
//! Every timer in the crate is driven by a plain `u64` millisecond reading
//! passed into `poll` calls. The frame loop reads it from [`SystemClock`];
//! tests drive a [`ManualClock`] to simulate time deterministically.

use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic milliseconds.
pub trait Clock {
    /// Milliseconds elapsed since the clock's origin. Never decreases.
    fn now_ms(&self) -> u64;
}

/// Wall clock anchored at construction time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero.
    pub fn new() -> Self { Self { origin: Instant::now() } }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 { self.origin.elapsed().as_millis() as u64 }
}

/// Simulated clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock reading `start_ms`.
    pub const fn new(start_ms: u64) -> Self { Self { now: Cell::new(start_ms) } }

    /// Move the clock forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) { self.now.set(self.now.get().saturating_add(delta_ms)); }

    /// Jump to `ms`. Earlier readings are ignored so the clock stays monotonic.
    pub fn set(&self, ms: u64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 { self.now.get() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(0);
        clock.advance(600);
        clock.advance(400);
        assert_eq!(clock.now_ms(), 1000);
    }

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new(5000);
        clock.set(1000);
        assert_eq!(clock.now_ms(), 5000);
        clock.set(6000);
        assert_eq!(clock.now_ms(), 6000);
    }

    #[test]
    fn test_system_clock_starts_near_zero() {
        let clock = SystemClock::new();
        assert!(clock.now_ms() < 1000);
    }
}
