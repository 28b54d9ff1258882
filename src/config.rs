//! Application configuration constants.
//!
//! Layout, timing and simulation parameters are compile-time constants so the
//! render loop never recomputes them. The boot sequence lives here as plain data:
//! its delays are hand-tuned pacing values with no timing model behind them.
//!
//! The only runtime knob is [`seed_from_env`], which lets a run be replayed with a
//! fixed random seed.

use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Drawing surface width in pixels.
pub const SCREEN_WIDTH: u32 = 800;

/// Drawing surface height in pixels.
pub const SCREEN_HEIGHT: u32 = 480;

/// Screen center X coordinate. Pre-computed as i32 to avoid casts in drawing code.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate (orb row, slightly above the true center).
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32 - 20;

/// Height of the top status bar.
pub const STATUS_BAR_HEIGHT: u32 = 32;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

// =============================================================================
// Gauge Configuration
// =============================================================================

/// Default full-scale value of a gauge.
pub const GAUGE_DEFAULT_MAX: f32 = 100.0;

/// Default ring radius in pixels.
pub const GAUGE_DEFAULT_RADIUS: f32 = 36.0;

/// Ring stroke width in pixels.
pub const GAUGE_STROKE_WIDTH: u32 = 5;

/// Duration of the dash-offset transition when a gauge value changes.
pub const GAUGE_TRANSITION_MS: u64 = 1500;

// =============================================================================
// Metric Simulation
// =============================================================================

/// Period between simulator ticks.
pub const SAMPLE_PERIOD_MS: u64 = 3000;

/// CPU-like metric: `floor(r * 30) + 15`, i.e. `[15, 44]`.
pub const CPU_BASE: u32 = 15;
/// Number of distinct CPU values.
pub const CPU_SPAN: u32 = 30;

/// Memory-like metric: `floor(r * 20) + 42`, i.e. `[42, 61]`.
pub const MEMORY_BASE: u32 = 42;
/// Number of distinct memory values.
pub const MEMORY_SPAN: u32 = 20;

// =============================================================================
// Boot Sequence
// =============================================================================

/// Reference boot sequence: (text, reveal offset in ms from player start).
pub const BOOT_SEQUENCE: [(&str, i64); 9] = [
    ("> Initializing Jarvis Core v3.2.1 ...", 0),
    ("> Loading neural mesh network ...", 600),
    ("> Establishing secure uplink ... OK", 1200),
    ("> Cognitive engine: ONLINE", 1900),
    ("> Memory banks: 64 TB allocated", 2400),
    ("> System diagnostics: ALL GREEN", 3000),
    ("> Voice synthesis: calibrated", 3500),
    ("> Spatial awareness: active", 4000),
    ("> Ready. Awaiting command, sir.", 4800),
];

/// Fade/slide-in duration of a freshly revealed terminal line.
pub const LINE_FADE_MS: u64 = 300;

/// Full on/off period of the terminal cursor.
pub const CURSOR_BLINK_MS: u64 = 1100;

// =============================================================================
// Runtime Overrides
// =============================================================================

/// Environment variable holding an optional u64 seed for the random source.
pub const SEED_ENV: &str = "JARVIS_SEED";

/// Read the random seed override, if any.
///
/// Unparseable values are ignored (and reported by the caller) rather than
/// aborting a purely cosmetic program.
pub fn seed_from_env() -> Option<u64> { std::env::var(SEED_ENV).ok().and_then(|raw| parse_seed(&raw)) }

fn parse_seed(raw: &str) -> Option<u64> { raw.trim().parse().ok() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_sequence_sorted() {
        assert!(BOOT_SEQUENCE.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(BOOT_SEQUENCE.first().map(|l| l.1), Some(0));
        assert_eq!(BOOT_SEQUENCE.last().map(|l| l.1), Some(4800));
    }

    #[test]
    fn test_metric_ranges() {
        assert_eq!(CPU_BASE + CPU_SPAN - 1, 44);
        assert_eq!(MEMORY_BASE + MEMORY_SPAN - 1, 61);
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("42"), Some(42));
        assert_eq!(parse_seed(" 7 \n"), Some(7));
        assert_eq!(parse_seed("-1"), None);
        assert_eq!(parse_seed("abc"), None);
    }
}
