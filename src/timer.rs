//! Cooperative timer primitives.
//!
//! Timers never run on their own: the owner calls `poll(now_ms)` from the frame
//! loop and gets back whatever became due. This keeps all work on one thread and
//! makes cancellation trivial, since a cancelled timer is simply state that is
//! no longer consulted.
//!
//! - [`PeriodicTimer`]: fixed-period ticks, first tick immediately at `start`
//! - [`OneShotQueue`]: payloads released once each, in nondecreasing due order

/// Normalize a signed delay to a non-negative one.
///
/// Negative delays fire immediately instead of being rejected.
#[inline]
pub const fn normalize_delay_ms(delay_ms: i64) -> u64 {
    if delay_ms < 0 { 0 } else { delay_ms as u64 }
}

// =============================================================================
// Periodic Timer
// =============================================================================

/// Fixed-period timer.
///
/// `start` makes tick 0 due immediately; each following tick is due one period
/// after the previous one. Ticks missed between polls are all reported, oldest
/// first, so the tick count always matches elapsed periods.
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period_ms: u64,
    /// Due time of the next tick; `None` while stopped.
    next_due_ms: Option<u64>,
}

impl PeriodicTimer {
    /// Create a stopped timer. A zero period is raised to 1 ms.
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms: if period_ms == 0 { 1 } else { period_ms },
            next_due_ms: None,
        }
    }

    /// Arm the timer with its first tick due at `now_ms`.
    pub const fn start(
        &mut self,
        now_ms: u64,
    ) {
        self.next_due_ms = Some(now_ms);
    }

    /// Disarm the timer. Safe to call repeatedly.
    ///
    /// Returns `true` if the timer was running.
    pub const fn stop(&mut self) -> bool {
        let was_running = self.next_due_ms.is_some();
        self.next_due_ms = None;
        was_running
    }

    /// Whether the timer is armed.
    #[inline]
    pub const fn is_running(&self) -> bool { self.next_due_ms.is_some() }

    /// Period in milliseconds.
    #[inline]
    pub const fn period_ms(&self) -> u64 { self.period_ms }

    /// Consume the next due tick, if any, returning its scheduled time.
    ///
    /// Call in a loop to drain every overdue tick.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> Option<u64> {
        let due = self.next_due_ms?;
        if due > now_ms {
            return None;
        }
        self.next_due_ms = Some(due.saturating_add(self.period_ms));
        Some(due)
    }
}

// =============================================================================
// One-Shot Queue
// =============================================================================

/// Set of one-shot timers carrying payloads.
///
/// Entries are kept sorted by due time; entries with equal due times keep the
/// order they were scheduled in.
#[derive(Debug, Clone)]
pub struct OneShotQueue<T> {
    entries: Vec<(u64, T)>,
}

impl<T> OneShotQueue<T> {
    /// Create an empty queue.
    pub const fn new() -> Self { Self { entries: Vec::new() } }

    /// Schedule `payload` at `due_ms`.
    pub fn schedule(
        &mut self,
        due_ms: u64,
        payload: T,
    ) {
        // Insert after any entry with the same due time (stable order)
        let idx = self.entries.partition_point(|(due, _)| *due <= due_ms);
        self.entries.insert(idx, (due_ms, payload));
    }

    /// Remove and return every payload due at or before `now_ms`, earliest first.
    pub fn drain_due(
        &mut self,
        now_ms: u64,
    ) -> impl Iterator<Item = (u64, T)> {
        let split = self.entries.partition_point(|(due, _)| *due <= now_ms);
        self.entries.drain(..split)
    }

    /// Cancel every pending timer without releasing it.
    ///
    /// Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.entries.clear();
        cancelled
    }

    /// Number of pending timers.
    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether no timers are pending.
    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Due time of the earliest pending timer.
    #[inline]
    pub fn next_due_ms(&self) -> Option<u64> { self.entries.first().map(|(due, _)| *due) }
}

impl<T> Default for OneShotQueue<T> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_delay() {
        assert_eq!(normalize_delay_ms(-250), 0);
        assert_eq!(normalize_delay_ms(0), 0);
        assert_eq!(normalize_delay_ms(600), 600);
    }

    #[test]
    fn test_periodic_first_tick_immediate() {
        let mut timer = PeriodicTimer::new(3000);
        assert_eq!(timer.poll(0), None, "stopped timer must not tick");

        timer.start(100);
        assert_eq!(timer.poll(100), Some(100));
        assert_eq!(timer.poll(100), None);
        assert_eq!(timer.poll(3099), None);
        assert_eq!(timer.poll(3100), Some(3100));
    }

    #[test]
    fn test_periodic_catches_up_in_order() {
        let mut timer = PeriodicTimer::new(1000);
        timer.start(0);

        let ticks: Vec<u64> = std::iter::from_fn(|| timer.poll(3500)).collect();
        assert_eq!(ticks, vec![0, 1000, 2000, 3000]);
    }

    #[test]
    fn test_periodic_stop_idempotent() {
        let mut timer = PeriodicTimer::new(1000);
        timer.start(0);
        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.is_running());
        assert_eq!(timer.poll(10_000), None);
    }

    #[test]
    fn test_periodic_zero_period_raised() {
        assert_eq!(PeriodicTimer::new(0).period_ms(), 1);
    }

    #[test]
    fn test_one_shot_releases_in_due_order() {
        let mut queue = OneShotQueue::new();
        queue.schedule(1200, "c");
        queue.schedule(0, "a");
        queue.schedule(600, "b");

        let fired: Vec<&str> = queue.drain_due(700).map(|(_, p)| p).collect();
        assert_eq!(fired, vec!["a", "b"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_due_ms(), Some(1200));
    }

    #[test]
    fn test_one_shot_ties_keep_schedule_order() {
        let mut queue = OneShotQueue::new();
        queue.schedule(500, 1);
        queue.schedule(500, 2);
        queue.schedule(500, 3);

        let fired: Vec<i32> = queue.drain_due(500).map(|(_, p)| p).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_one_shot_cancel_all() {
        let mut queue = OneShotQueue::new();
        queue.schedule(100, ());
        queue.schedule(200, ());

        assert_eq!(queue.cancel_all(), 2);
        assert_eq!(queue.cancel_all(), 0);
        assert!(queue.is_empty());
        assert_eq!(queue.drain_due(u64::MAX).count(), 0);
    }
}
