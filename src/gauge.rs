//! Circular gauge model: value to arc geometry, plus the offset transition.
//!
//! A gauge is a ring drawn with a dashed stroke. With the dash length equal to
//! the ring circumference, the dash offset alone decides how much of the ring is
//! visible:
//!
//! ```text
//! circumference = 2 * PI * radius
//! progress      = clamp(value, 0, max) / max * circumference
//! dash_offset   = circumference - progress
//! ```
//!
//! `dash_offset == circumference` is an empty ring, `0` a full one.
//!
//! # Transitions
//!
//! [`GaugeTween`] moves the displayed offset linearly from wherever it currently
//! is to the new target over [`GAUGE_TRANSITION_MS`]. Targets always come from
//! [`ArcGeometry::compute`]; the tween never extrapolates past them.

use core::f32::consts::PI;

use embedded_graphics::pixelcolor::Rgb565;

use crate::config::{GAUGE_DEFAULT_MAX, GAUGE_DEFAULT_RADIUS, GAUGE_TRANSITION_MS};
use crate::error::GaugeError;

// =============================================================================
// Geometry
// =============================================================================

/// Stroke parameters for a progress ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    /// Full ring length (`2 * PI * radius`).
    pub circumference: f32,
    /// Hidden length of the dash, in `[0, circumference]`.
    pub dash_offset: f32,
}

impl ArcGeometry {
    /// Compute ring geometry for `value` on a `[0, max]` scale.
    ///
    /// Out-of-range values are clamped to the nearest bound; NaN counts as 0.
    ///
    /// # Errors
    /// [`GaugeError::InvalidConfiguration`] if `max` or `radius` is not a
    /// positive finite number.
    pub fn compute(
        value: f32,
        max: f32,
        radius: f32,
    ) -> Result<Self, GaugeError> {
        validate_positive("max", max)?;
        validate_positive("radius", radius)?;
        Ok(Self::compute_unchecked(value, max, radius))
    }

    /// Geometry for already-validated `max`/`radius`.
    fn compute_unchecked(
        value: f32,
        max: f32,
        radius: f32,
    ) -> Self {
        let circumference = 2.0 * PI * radius;
        let clamped = clamp_value(value, max);
        let progress = (clamped / max) * circumference;
        // Clamp again so float rounding can never leave [0, circumference]
        let dash_offset = (circumference - progress).clamp(0.0, circumference);
        Self {
            circumference,
            dash_offset,
        }
    }

    /// Visible fraction of the ring, in `[0, 1]`.
    #[inline]
    pub fn progress_fraction(&self) -> f32 { 1.0 - self.dash_offset / self.circumference }

    /// Visible arc in degrees, in `[0, 360]`.
    #[inline]
    pub fn sweep_degrees(&self) -> f32 { 360.0 * self.progress_fraction() }
}

/// Clamp `value` into `[0, max]`, mapping NaN to 0.
#[inline]
fn clamp_value(
    value: f32,
    max: f32,
) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, max) }
}

fn validate_positive(
    field: &'static str,
    value: f32,
) -> Result<(), GaugeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GaugeError::InvalidConfiguration { field, value })
    }
}

// =============================================================================
// Readings
// =============================================================================

/// One gauge sample as produced by a simulation tick.
///
/// Immutable; the next tick produces a new reading rather than mutating this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeReading {
    value: f32,
    max: f32,
    label: &'static str,
    color: Rgb565,
}

impl GaugeReading {
    /// Create a reading, clamping `value` into `[0, max]`.
    ///
    /// # Errors
    /// [`GaugeError::InvalidConfiguration`] if `max` is not positive and finite.
    pub fn new(
        value: f32,
        max: f32,
        label: &'static str,
        color: Rgb565,
    ) -> Result<Self, GaugeError> {
        validate_positive("max", max)?;
        Ok(Self {
            value: clamp_value(value, max),
            max,
            label,
            color,
        })
    }

    #[inline]
    pub const fn value(&self) -> f32 { self.value }

    #[inline]
    pub const fn max(&self) -> f32 { self.max }

    #[inline]
    pub const fn label(&self) -> &'static str { self.label }

    #[inline]
    pub const fn color(&self) -> Rgb565 { self.color }
}

// =============================================================================
// Renderer
// =============================================================================

/// Everything needed to draw one gauge frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeView {
    pub geometry: ArcGeometry,
    /// The value as given by the caller, before clamping.
    pub value: f32,
    /// `value` clamped into `[0, max]`; what the readout shows.
    pub shown: f32,
    pub label: &'static str,
    pub color: Rgb565,
}

/// Validated gauge configuration.
///
/// Construction rejects a bad `max`/`radius`, so rendering itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeRenderer {
    max: f32,
    radius: f32,
}

impl GaugeRenderer {
    /// # Errors
    /// [`GaugeError::InvalidConfiguration`] for a non-positive or non-finite
    /// `max` or `radius`.
    pub fn new(
        max: f32,
        radius: f32,
    ) -> Result<Self, GaugeError> {
        validate_positive("max", max)?;
        validate_positive("radius", radius)?;
        Ok(Self { max, radius })
    }

    /// Full scale value.
    #[inline]
    pub const fn max(&self) -> f32 { self.max }

    /// Ring radius in pixels.
    #[inline]
    pub const fn radius(&self) -> f32 { self.radius }

    /// Ring geometry for `value`.
    #[inline]
    pub fn geometry(
        &self,
        value: f32,
    ) -> ArcGeometry {
        ArcGeometry::compute_unchecked(value, self.max, self.radius)
    }

    /// Geometry plus pass-through display fields.
    pub fn render(
        &self,
        value: f32,
        label: &'static str,
        color: Rgb565,
    ) -> GaugeView {
        GaugeView {
            geometry: self.geometry(value),
            value,
            shown: clamp_value(value, self.max),
            label,
            color,
        }
    }
}

impl Default for GaugeRenderer {
    fn default() -> Self {
        Self {
            max: GAUGE_DEFAULT_MAX,
            radius: GAUGE_DEFAULT_RADIUS,
        }
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Linear dash-offset transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeTween {
    from: f32,
    to: f32,
    start_ms: u64,
    duration_ms: u64,
}

impl GaugeTween {
    /// A tween resting at `offset`.
    pub const fn at_rest(offset: f32) -> Self {
        Self {
            from: offset,
            to: offset,
            start_ms: 0,
            duration_ms: GAUGE_TRANSITION_MS,
        }
    }

    /// Override the transition duration (0 = jump immediately).
    #[must_use]
    pub const fn with_duration(
        mut self,
        duration_ms: u64,
    ) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Start moving toward `target` from the offset displayed at `now_ms`.
    pub fn retarget(
        &mut self,
        target: f32,
        now_ms: u64,
    ) {
        self.from = self.offset_at(now_ms);
        self.to = target;
        self.start_ms = now_ms;
    }

    /// Final offset of the current transition.
    #[inline]
    pub const fn target(&self) -> f32 { self.to }

    /// Displayed offset at `now_ms`.
    pub fn offset_at(
        &self,
        now_ms: u64,
    ) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if self.duration_ms == 0 || elapsed >= self.duration_ms {
            return self.to;
        }
        let t = elapsed as f32 / self.duration_ms as f32;
        (self.to - self.from).mul_add(t, self.from)
    }

    /// Whether the transition has reached its target at `now_ms`.
    #[inline]
    pub fn is_settled(
        &self,
        now_ms: u64,
    ) -> bool {
        self.duration_ms == 0 || now_ms.saturating_sub(self.start_ms) >= self.duration_ms || self.from == self.to
    }
}

// =============================================================================
// Animated Gauge
// =============================================================================

/// A gauge with a current value and an animated ring.
///
/// Starts empty (offset = circumference) and animates to its first reading.
#[derive(Debug, Clone)]
pub struct AnimatedGauge {
    renderer: GaugeRenderer,
    label: &'static str,
    color: Rgb565,
    value: f32,
    tween: GaugeTween,
}

impl AnimatedGauge {
    /// Create an empty gauge.
    pub fn new(
        renderer: GaugeRenderer,
        label: &'static str,
        color: Rgb565,
    ) -> Self {
        let empty = renderer.geometry(0.0);
        Self {
            renderer,
            label,
            color,
            value: 0.0,
            tween: GaugeTween::at_rest(empty.dash_offset),
        }
    }

    /// Show a new reading, animating from the currently displayed offset.
    pub fn set_reading(
        &mut self,
        reading: &GaugeReading,
        now_ms: u64,
    ) {
        self.value = reading.value();
        self.color = reading.color();
        if reading.max() != self.renderer.max() {
            // Validated by GaugeReading::new
            self.renderer = GaugeRenderer {
                max: reading.max(),
                radius: self.renderer.radius(),
            };
        }
        let target = self.renderer.geometry(self.value).dash_offset;
        self.tween.retarget(target, now_ms);
    }

    /// Show a raw value on the current scale.
    pub fn set_value(
        &mut self,
        value: f32,
        now_ms: u64,
    ) {
        self.value = value;
        let target = self.renderer.geometry(value).dash_offset;
        self.tween.retarget(target, now_ms);
    }

    /// Change the full-scale value, re-deriving the target offset.
    ///
    /// # Errors
    /// [`GaugeError::InvalidConfiguration`] if `max` is invalid; the gauge is
    /// left unchanged.
    pub fn set_max(
        &mut self,
        max: f32,
        now_ms: u64,
    ) -> Result<(), GaugeError> {
        self.renderer = GaugeRenderer::new(max, self.renderer.radius())?;
        let target = self.renderer.geometry(self.value).dash_offset;
        self.tween.retarget(target, now_ms);
        Ok(())
    }

    /// Target view (settled state) for the current value.
    pub fn view(&self) -> GaugeView { self.renderer.render(self.value, self.label, self.color) }

    /// View with the animated offset at `now_ms`.
    pub fn view_at(
        &self,
        now_ms: u64,
    ) -> GaugeView {
        let mut view = self.view();
        view.geometry.dash_offset = self.tween.offset_at(now_ms);
        view
    }

    #[inline]
    pub const fn renderer(&self) -> &GaugeRenderer { &self.renderer }

    #[inline]
    pub const fn value(&self) -> f32 { self.value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::INDIGO;

    const EPS: f32 = 1e-3;

    fn offset(
        value: f32,
        max: f32,
    ) -> ArcGeometry {
        ArcGeometry::compute(value, max, GAUGE_DEFAULT_RADIUS).unwrap()
    }

    // -------------------------------------------------------------------------
    // Geometry Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_circumference() {
        let g = offset(0.0, 100.0);
        assert!((g.circumference - 2.0 * PI * 36.0).abs() < EPS);
    }

    #[test]
    fn test_endpoints() {
        let empty = offset(0.0, 100.0);
        assert_eq!(empty.dash_offset, empty.circumference, "value 0 is an empty ring");

        let full = offset(100.0, 100.0);
        assert_eq!(full.dash_offset, 0.0, "value == max is a full ring");
    }

    #[test]
    fn test_offset_bounded_for_all_in_range_values() {
        for max in [0.5f32, 1.0, 7.0, 100.0, 1000.0] {
            for step in 0..=200 {
                let value = max * step as f32 / 200.0;
                let g = offset(value, max);
                assert!(
                    (0.0..=g.circumference).contains(&g.dash_offset),
                    "value {value} max {max}: offset {} outside [0, {}]",
                    g.dash_offset,
                    g.circumference
                );
            }
        }
    }

    #[test]
    fn test_half_value() {
        let g = offset(50.0, 100.0);
        assert!((g.dash_offset - g.circumference / 2.0).abs() < EPS);
        assert!((g.sweep_degrees() - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_clamps_below_zero() {
        let zero = offset(0.0, 100.0);
        for value in [-0.001f32, -1.0, -50.0, -1e9, f32::NEG_INFINITY] {
            assert_eq!(offset(value, 100.0), zero, "value {value}");
        }
    }

    #[test]
    fn test_clamps_above_max() {
        let full = offset(100.0, 100.0);
        for value in [100.001f32, 150.0, 1e9, f32::INFINITY] {
            assert_eq!(offset(value, 100.0), full, "value {value}");
        }
    }

    #[test]
    fn test_nan_value_reads_as_zero() {
        assert_eq!(offset(f32::NAN, 100.0), offset(0.0, 100.0));
    }

    #[test]
    fn test_invalid_max_rejected() {
        for max in [0.0f32, -1.0, -100.0, f32::NAN, f32::INFINITY] {
            let err = ArcGeometry::compute(10.0, max, 36.0).unwrap_err();
            assert!(
                matches!(err, GaugeError::InvalidConfiguration { field: "max", .. }),
                "max {max} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_invalid_radius_rejected() {
        assert!(matches!(
            GaugeRenderer::new(100.0, 0.0),
            Err(GaugeError::InvalidConfiguration { field: "radius", .. })
        ));
    }

    #[test]
    fn test_reading_clamps_and_rejects() {
        let reading = GaugeReading::new(130.0, 100.0, "CPU", INDIGO).unwrap();
        assert_eq!(reading.value(), 100.0);
        assert!(GaugeReading::new(10.0, 0.0, "CPU", INDIGO).is_err());
    }

    #[test]
    fn test_render_passes_display_fields_through() {
        let view = GaugeRenderer::default().render(-5.0, "CPU", INDIGO);
        assert_eq!(view.value, -5.0);
        assert_eq!(view.shown, 0.0);
        assert_eq!(view.label, "CPU");
        assert_eq!(view.color, INDIGO);
        assert_eq!(view.geometry.dash_offset, view.geometry.circumference);
    }

    #[test]
    fn test_render_clamps_shown_value() {
        let renderer = GaugeRenderer::default();
        assert_eq!(renderer.render(1e9, "CPU", INDIGO).shown, 100.0);
        assert_eq!(renderer.render(f32::NAN, "CPU", INDIGO).shown, 0.0);
        assert_eq!(renderer.render(42.0, "CPU", INDIGO).shown, 42.0);
    }

    // -------------------------------------------------------------------------
    // Tween Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tween_linear() {
        let mut tween = GaugeTween::at_rest(200.0);
        tween.retarget(100.0, 1000);

        assert_eq!(tween.offset_at(1000), 200.0);
        assert!((tween.offset_at(1750) - 150.0).abs() < EPS);
        assert_eq!(tween.offset_at(2500), 100.0);
        assert_eq!(tween.offset_at(99_999), 100.0);
        assert!(tween.is_settled(2500));
        assert!(!tween.is_settled(2000));
    }

    #[test]
    fn test_tween_retarget_mid_flight_starts_from_displayed() {
        let mut tween = GaugeTween::at_rest(0.0);
        tween.retarget(100.0, 0);
        tween.retarget(0.0, 750); // displayed 50 at this point

        assert!((tween.offset_at(750) - 50.0).abs() < EPS);
        assert_eq!(tween.offset_at(2250), 0.0);
    }

    #[test]
    fn test_tween_zero_duration_jumps() {
        let mut tween = GaugeTween::at_rest(10.0).with_duration(0);
        tween.retarget(20.0, 5);
        assert_eq!(tween.offset_at(5), 20.0);
    }

    // -------------------------------------------------------------------------
    // Animated Gauge Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_animated_gauge_starts_empty() {
        let gauge = AnimatedGauge::new(GaugeRenderer::default(), "CPU", INDIGO);
        let view = gauge.view_at(0);
        assert_eq!(view.geometry.dash_offset, view.geometry.circumference);
    }

    #[test]
    fn test_animated_gauge_settles_on_formula_target() {
        let mut gauge = AnimatedGauge::new(GaugeRenderer::default(), "CPU", INDIGO);
        let reading = GaugeReading::new(40.0, 100.0, "CPU", INDIGO).unwrap();
        gauge.set_reading(&reading, 0);

        let settled = gauge.view_at(GAUGE_TRANSITION_MS);
        let expected = ArcGeometry::compute(40.0, 100.0, GAUGE_DEFAULT_RADIUS).unwrap();
        assert!((settled.geometry.dash_offset - expected.dash_offset).abs() < EPS);
    }

    #[test]
    fn test_animated_gauge_max_change_recomputes_target() {
        let mut gauge = AnimatedGauge::new(GaugeRenderer::default(), "MEM", INDIGO);
        gauge.set_value(50.0, 0);
        gauge.set_max(200.0, 500).unwrap();

        let settled = gauge.view_at(500 + GAUGE_TRANSITION_MS);
        let expected = ArcGeometry::compute(50.0, 200.0, GAUGE_DEFAULT_RADIUS).unwrap();
        assert!((settled.geometry.dash_offset - expected.dash_offset).abs() < EPS);
    }

    #[test]
    fn test_animated_gauge_rejects_bad_max() {
        let mut gauge = AnimatedGauge::new(GaugeRenderer::default(), "MEM", INDIGO);
        assert!(gauge.set_max(-1.0, 0).is_err());
        assert_eq!(gauge.renderer().max(), GAUGE_DEFAULT_MAX);
    }
}
