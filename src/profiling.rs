//! Frame profiling and the on-screen event log.
//!
//! [`ProfilingMetrics`] keeps per-frame timing with min/max and an exponential
//! moving average, plus counters for dashboard events. [`DebugLog`] is a small
//! ring buffer of recent event lines shown on the debug page; it complements
//! the `tracing` output on the console rather than replacing it.
//!
//! ```ignore
//! let frame_start = Instant::now();
//! let update = dashboard.update(clock.now_ms());
//! metrics.record_update(&update);
//! // ... draw ...
//! metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
//! ```

use core::fmt::Write;
use std::time::{Duration, Instant};

use heapless::{Deque, String};

use crate::dashboard::FrameUpdate;

// =============================================================================
// Debug Log Configuration
// =============================================================================

/// Maximum number of log lines kept in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 10;

/// Maximum characters per log line.
pub const LOG_LINE_LENGTH: usize = 64;

// =============================================================================
// Profiling Metrics
// =============================================================================

/// Frame timing and event counters.
pub struct ProfilingMetrics {
    // Frame timing (microseconds for precision)
    /// Total frame time (update + render + sleep)
    pub frame_time_us: u32,
    /// Time spent updating and drawing
    pub render_time_us: u32,
    /// Time spent sleeping (rate limiting)
    pub sleep_time_us: u32,

    /// Minimum frame time observed
    pub frame_time_min_us: u32,
    /// Maximum frame time observed
    pub frame_time_max_us: u32,
    frame_time_avg_us: f32,

    // Counters
    pub total_frames: u64,
    /// Boot lines revealed since startup (restarts included)
    pub lines_revealed: u32,
    /// Vitals snapshots applied to the gauges
    pub vitals_updates: u32,

    start_time: Instant,
}

impl ProfilingMetrics {
    /// Exponential moving average alpha (0.1 for smooth updates).
    const EMA_ALPHA: f32 = 0.1;

    /// Create metrics, starting the uptime timer.
    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            lines_revealed: 0,
            vitals_updates: 0,
            start_time: Instant::now(),
        }
    }

    /// Record timing for one frame.
    pub fn record_frame(
        &mut self,
        total_time: Duration,
        render_time: Duration,
        sleep_time: Duration,
    ) {
        let total_us = duration_us(total_time);

        self.frame_time_us = total_us;
        self.render_time_us = duration_us(render_time);
        self.sleep_time_us = duration_us(sleep_time);

        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        self.total_frames += 1;
    }

    /// Count the dashboard events of one frame.
    pub fn record_update(
        &mut self,
        update: &FrameUpdate,
    ) {
        self.lines_revealed = self.lines_revealed.saturating_add(update.lines_revealed as u32);
        if update.vitals_updated {
            self.vitals_updates = self.vitals_updates.saturating_add(1);
        }
    }

    /// Average frame time in microseconds.
    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    /// Frames per second derived from the average frame time.
    pub fn fps(&self) -> f32 {
        if self.frame_time_avg_us <= 0.0 {
            0.0
        } else {
            1_000_000.0 / self.frame_time_avg_us
        }
    }

    #[inline]
    pub fn uptime(&self) -> Duration { self.start_time.elapsed() }

    /// Uptime as `HH:MM:SS`.
    pub fn uptime_string(&self) -> String<12> { format_hms(self.uptime().as_secs()) }
}

impl Default for ProfilingMetrics {
    fn default() -> Self { Self::new() }
}

fn duration_us(d: Duration) -> u32 { u32::try_from(d.as_micros()).unwrap_or(u32::MAX) }

/// Format seconds as `HH:MM:SS`. Hours keep counting past 99.
fn format_hms(secs: u64) -> String<12> {
    let mut s = String::new();
    write!(s, "{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60).ok();
    s
}

// =============================================================================
// Debug Log Ring Buffer
// =============================================================================

/// Ring buffer of the last [`LOG_BUFFER_SIZE`] event lines.
///
/// The oldest line is dropped when full; long lines are truncated.
pub struct DebugLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl DebugLog {
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Push a line, dropping the oldest one if the buffer is full.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }

        self.buffer.push_back(line).ok();
    }

    /// Lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(|line| line.as_str()) }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}

impl Default for DebugLog {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiling_metrics_new() {
        let metrics = ProfilingMetrics::new();
        assert_eq!(metrics.total_frames, 0);
        assert_eq!(metrics.frame_time_min_us, u32::MAX);
        assert_eq!(metrics.frame_time_max_us, 0);
        assert_eq!(metrics.fps(), 0.0);
    }

    #[test]
    fn test_record_frame() {
        let mut metrics = ProfilingMetrics::new();
        metrics.record_frame(
            Duration::from_micros(20000),
            Duration::from_micros(4000),
            Duration::from_micros(16000),
        );

        assert_eq!(metrics.total_frames, 1);
        assert_eq!(metrics.frame_time_us, 20000);
        assert_eq!(metrics.render_time_us, 4000);
        assert_eq!(metrics.sleep_time_us, 16000);
        assert_eq!(metrics.frame_time_avg_us(), 20000);
        assert!((metrics.fps() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_min_max() {
        let mut metrics = ProfilingMetrics::new();
        for us in [20000, 15000, 25000] {
            metrics.record_frame(Duration::from_micros(us), Duration::ZERO, Duration::ZERO);
        }
        assert_eq!(metrics.frame_time_min_us, 15000);
        assert_eq!(metrics.frame_time_max_us, 25000);
    }

    #[test]
    fn test_record_update_counts_events() {
        let mut metrics = ProfilingMetrics::new();
        metrics.record_update(&FrameUpdate {
            lines_revealed: 2,
            vitals_updated: true,
        });
        metrics.record_update(&FrameUpdate::default());
        metrics.record_update(&FrameUpdate {
            lines_revealed: 1,
            vitals_updated: false,
        });

        assert_eq!(metrics.lines_revealed, 3);
        assert_eq!(metrics.vitals_updates, 1);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0).as_str(), "00:00:00");
        assert_eq!(format_hms(3661).as_str(), "01:01:01");
        assert_eq!(format_hms(100 * 3600).as_str(), "100:00:00");
    }

    #[test]
    fn test_debug_log_ring_buffer() {
        let mut log = DebugLog::new();
        assert!(log.is_empty());

        for i in 0..LOG_BUFFER_SIZE {
            log.push(&format!("Message {i}"));
        }
        assert_eq!(log.len(), LOG_BUFFER_SIZE);

        log.push("New message");
        assert_eq!(log.len(), LOG_BUFFER_SIZE);
        assert_eq!(log.iter().next(), Some("Message 1"));
        assert_eq!(log.iter().last(), Some("New message"));
    }

    #[test]
    fn test_debug_log_truncation() {
        let mut log = DebugLog::new();
        log.push(&"x".repeat(200));
        assert_eq!(log.iter().next().map(str::len), Some(LOG_LINE_LENGTH));
    }
}
