//! Error types.
//!
//! The dashboard has exactly two failure modes: a gauge built with an unusable
//! configuration (rejected at construction), and a random draw that could not be
//! turned into a sample (swallowed by the simulator, see
//! [`MetricSimulator`](crate::simulator::MetricSimulator)).

use thiserror::Error;

/// Gauge construction/evaluation failure.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GaugeError {
    /// `max` or `radius` is zero, negative, or not finite.
    #[error("invalid gauge configuration: {field} must be positive and finite, got {value}")]
    InvalidConfiguration { field: &'static str, value: f32 },
}

/// A random source failed to produce a usable unit sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// The source returned a value outside `[0, 1)` (including NaN).
    #[error("random source produced {0}, expected a value in [0, 1)")]
    OutOfRange(f64),

    /// The source itself reported a failure.
    #[error("random source unavailable: {0}")]
    Unavailable(String),
}
