//! Synthetic vitals generator.
//!
//! Stands in for a real metrics source: every [`SAMPLE_PERIOD_MS`] it draws one
//! bounded random integer per tracked metric.
//!
//! | Metric | Formula | Range |
//! |--------|---------|-------|
//! | CPU | `floor(r * 30) + 15` | `[15, 44]` |
//! | Memory | `floor(r * 20) + 42` | `[42, 61]` |
//!
//! # Lifecycle
//!
//! - [`MetricSimulator::start`] produces tick 0 immediately and arms the timer.
//! - [`MetricSimulator::poll`] runs every tick that has come due since the last poll.
//! - [`MetricSimulator::stop`] runs ticks already due, then disarms the timer;
//!   repeated calls do nothing.
//!   Dropping the simulator stops it.
//!
//! # Failed Ticks
//!
//! If the random source fails during a tick, that tick is skipped: the failure is
//! logged, counted in [`MetricSimulator::failed_ticks`], the previous snapshot
//! stays current, and the timer keeps running.

use tracing::{debug, info, warn};

use crate::config::{CPU_BASE, CPU_SPAN, MEMORY_BASE, MEMORY_SPAN, SAMPLE_PERIOD_MS};
use crate::error::SampleError;
use crate::random::{RandomSource, unit_sample};
use crate::timer::PeriodicTimer;

// =============================================================================
// Metric Ranges
// =============================================================================

/// A bounded integer metric: `floor(r * span) + base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub name: &'static str,
    pub base: u32,
    /// Number of distinct values; the range is `[base, base + span - 1]`.
    pub span: u32,
}

impl MetricSpec {
    /// CPU-like metric, `[15, 44]`.
    pub const CPU: Self = Self {
        name: "cpu",
        base: CPU_BASE,
        span: CPU_SPAN,
    };

    /// Memory-like metric, `[42, 61]`.
    pub const MEMORY: Self = Self {
        name: "memory",
        base: MEMORY_BASE,
        span: MEMORY_SPAN,
    };

    /// Smallest value this metric can produce.
    #[inline]
    pub const fn min(&self) -> u32 { self.base }

    /// Largest value this metric can produce.
    #[inline]
    pub const fn max(&self) -> u32 { self.base + self.span.saturating_sub(1) }

    /// Map a unit sample to a metric value.
    ///
    /// `r` must be in `[0, 1)`; the result is additionally clamped so a value
    /// rounding up to `span` cannot escape the range.
    pub fn sample(
        &self,
        r: f64,
    ) -> u32 {
        let offset = (r * f64::from(self.span)).floor() as u32;
        self.base + offset.min(self.span.saturating_sub(1))
    }

    /// Draw one value from `source`.
    ///
    /// # Errors
    /// Propagates [`SampleError`] from the source or its range check.
    pub fn draw<R: RandomSource + ?Sized>(
        &self,
        source: &mut R,
    ) -> Result<u32, SampleError> {
        unit_sample(source).map(|r| self.sample(r))
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Values produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalsSnapshot {
    /// Tick number, 0 for the sample taken at start.
    pub tick: u64,
    /// Scheduled time of the tick (ms).
    pub at_ms: u64,
    pub cpu: u32,
    pub memory: u32,
}

// =============================================================================
// Simulator
// =============================================================================

/// Periodic CPU/memory generator.
pub struct MetricSimulator<R: RandomSource> {
    source: R,
    timer: PeriodicTimer,
    latest: Option<VitalsSnapshot>,
    /// Ticks attempted since start (successful or not).
    ticks: u64,
    failed_ticks: u64,
}

impl<R: RandomSource> MetricSimulator<R> {
    /// Create a stopped simulator with the default period.
    pub const fn new(source: R) -> Self { Self::with_period(source, SAMPLE_PERIOD_MS) }

    /// Create a stopped simulator with a custom period.
    pub const fn with_period(
        source: R,
        period_ms: u64,
    ) -> Self {
        Self {
            source,
            timer: PeriodicTimer::new(period_ms),
            latest: None,
            ticks: 0,
            failed_ticks: 0,
        }
    }

    /// Start (or restart) sampling. Tick 0 is produced before this returns.
    pub fn start(
        &mut self,
        now_ms: u64,
    ) -> Option<VitalsSnapshot> {
        self.ticks = 0;
        self.failed_ticks = 0;
        self.latest = None;
        self.timer.start(now_ms);
        info!(period_ms = self.timer.period_ms(), "metric simulator started");
        self.poll(now_ms)
    }

    /// Run every tick due at or before `now_ms`.
    ///
    /// Returns the newest snapshot produced by this call, if any.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> Option<VitalsSnapshot> {
        let mut produced = None;
        while let Some(due_ms) = self.timer.poll(now_ms) {
            if let Some(snapshot) = self.tick(due_ms) {
                produced = Some(snapshot);
            }
        }
        produced
    }

    /// Stop sampling at `now_ms`.
    ///
    /// Ticks already due at `now_ms` run first, as [`poll`](Self::poll) would
    /// run them; later polls produce nothing. Returns `true` only for the call
    /// that actually stopped a running simulator.
    pub fn stop(
        &mut self,
        now_ms: u64,
    ) -> bool {
        self.poll(now_ms);
        self.halt()
    }

    fn halt(&mut self) -> bool {
        let stopped = self.timer.stop();
        if stopped {
            info!(ticks = self.ticks, failed = self.failed_ticks, "metric simulator stopped");
        }
        stopped
    }

    #[inline]
    pub const fn is_running(&self) -> bool { self.timer.is_running() }

    /// Most recent successful snapshot.
    #[inline]
    pub const fn latest(&self) -> Option<VitalsSnapshot> { self.latest }

    /// Ticks attempted since the last start.
    #[inline]
    pub const fn ticks(&self) -> u64 { self.ticks }

    /// Ticks skipped because the random source failed.
    #[inline]
    pub const fn failed_ticks(&self) -> u64 { self.failed_ticks }

    fn tick(
        &mut self,
        at_ms: u64,
    ) -> Option<VitalsSnapshot> {
        let tick = self.ticks;
        self.ticks += 1;

        match self.sample(tick, at_ms) {
            Ok(snapshot) => {
                debug!(tick, cpu = snapshot.cpu, memory = snapshot.memory, "vitals tick");
                self.latest = Some(snapshot);
                Some(snapshot)
            }
            Err(err) => {
                self.failed_ticks += 1;
                warn!(tick, error = %err, "vitals tick failed, keeping previous sample");
                None
            }
        }
    }

    fn sample(
        &mut self,
        tick: u64,
        at_ms: u64,
    ) -> Result<VitalsSnapshot, SampleError> {
        let cpu = MetricSpec::CPU.draw(&mut self.source)?;
        let memory = MetricSpec::MEMORY.draw(&mut self.source)?;
        Ok(VitalsSnapshot {
            tick,
            at_ms,
            cpu,
            memory,
        })
    }
}

impl<R: RandomSource> Drop for MetricSimulator<R> {
    fn drop(&mut self) { self.halt(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::random::{RngSource, ScriptedSource};

    // -------------------------------------------------------------------------
    // MetricSpec Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_spec_bounds() {
        assert_eq!((MetricSpec::CPU.min(), MetricSpec::CPU.max()), (15, 44));
        assert_eq!((MetricSpec::MEMORY.min(), MetricSpec::MEMORY.max()), (42, 61));
    }

    #[test]
    fn test_spec_sample_edges() {
        assert_eq!(MetricSpec::CPU.sample(0.0), 15);
        assert_eq!(MetricSpec::CPU.sample(0.999_999), 44);
        assert_eq!(MetricSpec::MEMORY.sample(0.0), 42);
        assert_eq!(MetricSpec::MEMORY.sample(0.999_999), 61);
        assert_eq!(MetricSpec::MEMORY.sample(0.5), 52);
    }

    #[test]
    fn test_spec_sample_never_escapes() {
        // Largest f64 below 1.0
        let r = 1.0 - f64::EPSILON / 2.0;
        assert_eq!(MetricSpec::CPU.sample(r), 44);
    }

    // -------------------------------------------------------------------------
    // Simulator Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_first_sample_immediate() {
        let mut sim = MetricSimulator::new(ScriptedSource::new([0.0, 0.5]));
        let first = sim.start(0).expect("tick 0 must be produced at start");

        assert_eq!(first.tick, 0);
        assert_eq!(first.at_ms, 0);
        assert_eq!(first.cpu, 15);
        assert_eq!(first.memory, 52);
        assert_eq!(sim.latest(), Some(first));
    }

    #[test]
    fn test_no_tick_before_period() {
        let mut sim = MetricSimulator::new(RngSource::seeded(3));
        sim.start(0);
        assert_eq!(sim.poll(SAMPLE_PERIOD_MS - 1), None);
        assert_eq!(sim.ticks(), 1);

        let second = sim.poll(SAMPLE_PERIOD_MS).expect("tick 1 at one period");
        assert_eq!(second.tick, 1);
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn test_thousand_ticks_in_range() {
        let clock = ManualClock::new(0);
        let mut sim = MetricSimulator::new(RngSource::seeded(0xC0FFEE));

        let mut samples = vec![sim.start(clock.now_ms()).unwrap()];
        for _ in 0..999 {
            clock.advance(SAMPLE_PERIOD_MS);
            samples.push(sim.poll(clock.now_ms()).expect("one tick per period"));
        }

        assert_eq!(samples.len(), 1000);
        for s in &samples {
            assert!((15..=44).contains(&s.cpu), "tick {}: cpu {} out of range", s.tick, s.cpu);
            assert!((42..=61).contains(&s.memory), "tick {}: memory {} out of range", s.tick, s.memory);
        }
        assert_eq!(sim.failed_ticks(), 0);
    }

    #[test]
    fn test_overdue_ticks_all_run() {
        let mut sim = MetricSimulator::new(RngSource::seeded(9));
        sim.start(0);
        let latest = sim.poll(SAMPLE_PERIOD_MS * 5).unwrap();

        assert_eq!(latest.tick, 5);
        assert_eq!(sim.ticks(), 6);
    }

    #[test]
    fn test_scripted_sequence_reproducible() {
        let mut sim = MetricSimulator::new(ScriptedSource::new([0.1, 0.1, 0.9, 0.9]));
        let a = sim.start(0).unwrap();
        let b = sim.poll(SAMPLE_PERIOD_MS).unwrap();

        assert_eq!((a.cpu, a.memory), (18, 44));
        assert_eq!((b.cpu, b.memory), (42, 60));
    }

    #[test]
    fn test_failed_tick_swallowed_and_timer_continues() {
        // Tick 0 ok, tick 1 gets an out-of-range draw, tick 2 ok again
        let mut sim = MetricSimulator::new(ScriptedSource::new([0.0, 0.0, 1.5, 0.5, 0.5]));
        let first = sim.start(0).unwrap();

        assert_eq!(sim.poll(SAMPLE_PERIOD_MS), None);
        assert_eq!(sim.failed_ticks(), 1);
        assert_eq!(sim.latest(), Some(first), "previous snapshot stays current");
        assert!(sim.is_running());

        let third = sim.poll(SAMPLE_PERIOD_MS * 2).unwrap();
        assert_eq!(third.tick, 2);
        assert_eq!((third.cpu, third.memory), (30, 52));
    }

    #[test]
    fn test_stop_halts_ticks() {
        let mut sim = MetricSimulator::new(RngSource::seeded(5));
        sim.start(0);
        sim.poll(SAMPLE_PERIOD_MS);
        assert!(sim.stop(SAMPLE_PERIOD_MS));

        assert_eq!(sim.poll(SAMPLE_PERIOD_MS * 100), None);
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn test_stop_settles_overdue_ticks() {
        let mut sim = MetricSimulator::new(RngSource::seeded(5));
        sim.start(0);

        // Ticks 1 and 2 are due but never polled
        assert!(sim.stop(SAMPLE_PERIOD_MS * 2 + 10));
        assert_eq!(sim.ticks(), 3);
        assert_eq!(sim.latest().map(|s| s.tick), Some(2));
        assert_eq!(sim.poll(SAMPLE_PERIOD_MS * 100), None);
        assert_eq!(sim.ticks(), 3);
    }

    #[test]
    fn test_stop_idempotent() {
        let mut sim = MetricSimulator::new(RngSource::seeded(5));
        sim.start(0);
        let before = sim.latest();

        assert!(sim.stop(0));
        assert!(!sim.stop(SAMPLE_PERIOD_MS * 10));
        assert_eq!(sim.latest(), before);
        assert_eq!(sim.ticks(), 1);
        assert!(!sim.is_running());
    }

    #[test]
    fn test_stop_before_start_is_noop() {
        let mut sim = MetricSimulator::new(ScriptedSource::default());
        assert!(!sim.stop(0));
        assert_eq!(sim.poll(10_000), None);
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut sim = MetricSimulator::new(RngSource::seeded(11));
        sim.start(0);
        sim.poll(SAMPLE_PERIOD_MS * 3);
        sim.stop(SAMPLE_PERIOD_MS * 3);

        let first = sim.start(50_000).unwrap();
        assert_eq!(first.tick, 0);
        assert_eq!(first.at_ms, 50_000);
        assert_eq!(sim.ticks(), 1);
    }
}
