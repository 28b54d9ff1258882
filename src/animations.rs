//! Animation helpers for the dashboard.
//!
//! Everything here is a pure function of elapsed time, so a frame can be
//! redrawn for any instant without stored animation state:
//! - **Easing**: ease-out cubic curve for entrance motion
//! - **Entrances**: delayed slide/scale-in of a panel
//! - **Breathing**: slow sine pulse for the orb rings and status dot
//! - **Float**: idle vertical bob of the side panels
//! - **Blink**: square-wave visibility for the terminal cursor
//! - **Color fades**: interpolation in RGB565 space, plus [`ColorTransition`]
//!   for hover highlights that ease toward a target over several frames
//!
//! Opacity cannot be expressed on an `Rgb565` target, so fade-ins are drawn by
//! interpolating from the panel background toward the final color.

use core::f32::consts::TAU;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

// =============================================================================
// Color Transition Constants
// =============================================================================

/// Per-frame interpolation speed for [`ColorTransition`] (0.0-1.0).
/// At 0.25 and 50 FPS a hover highlight settles in roughly 150 ms.
const COLOR_LERP_SPEED: f32 = 0.25;

/// Manhattan distance at which a transition snaps to its target.
const COLOR_SNAP_THRESHOLD: i32 = 2;

// =============================================================================
// Easing
// =============================================================================

/// Ease-out cubic: fast start, gentle landing. Input is clamped to `[0, 1]`.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    inv.mul_add(-inv * inv, 1.0)
}

/// Linear progress of a delayed animation at `elapsed_ms`, in `[0, 1]`.
///
/// A zero duration completes as soon as the delay has passed.
pub fn delayed_progress(
    elapsed_ms: u64,
    delay_ms: u64,
    duration_ms: u64,
) -> f32 {
    let Some(active) = elapsed_ms.checked_sub(delay_ms) else {
        return 0.0;
    };
    if duration_ms == 0 || active >= duration_ms {
        1.0
    } else {
        active as f32 / duration_ms as f32
    }
}

// =============================================================================
// Entrance Animation
// =============================================================================

/// Delayed entrance: the element starts displaced and scaled down, then eases
/// to its resting position and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    pub delay_ms: u64,
    pub duration_ms: u64,
    /// Displacement at the start of the animation.
    pub from_offset: Point,
    /// Scale at the start of the animation (1.0 for slide-only entrances).
    pub from_scale: f32,
}

impl Entrance {
    /// Slide in from `from_offset`.
    pub const fn slide(
        from_offset: Point,
        delay_ms: u64,
        duration_ms: u64,
    ) -> Self {
        Self {
            delay_ms,
            duration_ms,
            from_offset,
            from_scale: 1.0,
        }
    }

    /// Grow in place from `from_scale`.
    pub const fn grow(
        from_scale: f32,
        delay_ms: u64,
        duration_ms: u64,
    ) -> Self {
        Self {
            delay_ms,
            duration_ms,
            from_offset: Point::zero(),
            from_scale,
        }
    }

    /// Eased progress in `[0, 1]`.
    #[inline]
    pub fn progress(
        &self,
        elapsed_ms: u64,
    ) -> f32 {
        ease_out_cubic(delayed_progress(elapsed_ms, self.delay_ms, self.duration_ms))
    }

    /// Displacement to apply at `elapsed_ms`.
    pub fn offset_at(
        &self,
        elapsed_ms: u64,
    ) -> Point {
        let remaining = 1.0 - self.progress(elapsed_ms);
        Point::new(
            (self.from_offset.x as f32 * remaining).round() as i32,
            (self.from_offset.y as f32 * remaining).round() as i32,
        )
    }

    /// Scale to apply at `elapsed_ms`.
    pub fn scale_at(
        &self,
        elapsed_ms: u64,
    ) -> f32 {
        let p = self.progress(elapsed_ms);
        (1.0 - self.from_scale).mul_add(p, self.from_scale)
    }

    /// `color` faded in from `background` according to progress.
    pub fn fade(
        &self,
        elapsed_ms: u64,
        background: Rgb565,
        color: Rgb565,
    ) -> Rgb565 {
        mix_rgb565(background, color, self.progress(elapsed_ms))
    }

    /// Whether the animation has reached its resting state.
    #[inline]
    pub const fn is_done(
        &self,
        elapsed_ms: u64,
    ) -> bool {
        elapsed_ms >= self.delay_ms + self.duration_ms
    }
}

// =============================================================================
// Periodic Effects
// =============================================================================

/// Breathing scale: oscillates between `1.0` and `peak` with the given period,
/// starting (and ending each period) at `1.0`.
pub fn breathe(
    elapsed_ms: u64,
    period_ms: u64,
    peak: f32,
) -> f32 {
    let wave = raised_cosine(pulse_phase(elapsed_ms, period_ms));
    (peak - 1.0).mul_add(wave, 1.0)
}

/// Idle float: lifts by up to `amplitude_px`, highest mid-period.
pub fn float_offset(
    elapsed_ms: u64,
    period_ms: u64,
    amplitude_px: f32,
) -> Point {
    let wave = raised_cosine(pulse_phase(elapsed_ms, period_ms));
    Point::new(0, -(amplitude_px * wave).round() as i32)
}

/// Pulse between `low` and `1.0` intensity, peaking mid-period.
pub fn pulse_intensity(
    elapsed_ms: u64,
    period_ms: u64,
    low: f32,
) -> f32 {
    let phase = pulse_phase(elapsed_ms, period_ms);
    let wave = 0.5 - 0.5 * (phase * TAU).cos();
    (1.0 - low).mul_add(wave, low)
}

/// Square-wave blink: visible for the first half of every period.
#[inline]
pub const fn blink_visible(
    elapsed_ms: u64,
    period_ms: u64,
) -> bool {
    if period_ms == 0 {
        return true;
    }
    elapsed_ms % period_ms < period_ms / 2
}

/// 0 at phase 0, 1 at phase 0.5.
fn raised_cosine(phase: f32) -> f32 { 0.5 - 0.5 * (phase * TAU).cos() }

fn pulse_phase(
    elapsed_ms: u64,
    period_ms: u64,
) -> f32 {
    if period_ms == 0 {
        return 0.0;
    }
    (elapsed_ms % period_ms) as f32 / period_ms as f32
}

// =============================================================================
// Color Transition State
// =============================================================================

/// Tracks `N` colors that each ease toward a target over several frames.
///
/// Used for hover highlights, where the target changes in response to input
/// rather than on a timeline.
pub struct ColorTransition<const N: usize> {
    /// Interpolated colors (what is actually displayed).
    current_colors: [Rgb565; N],

    /// Colors each slot is moving toward.
    target_colors: [Rgb565; N],

    transitioning: [bool; N],
}

impl<const N: usize> ColorTransition<N> {
    /// All slots start settled on `initial`.
    pub const fn new(initial: Rgb565) -> Self {
        Self {
            current_colors: [initial; N],
            target_colors: [initial; N],
            transitioning: [false; N],
        }
    }

    /// Set target color for a slot and start a transition if it changed.
    ///
    /// Returns `true` if a new transition was started. Out-of-range slots are
    /// ignored.
    pub fn set_target(
        &mut self,
        idx: usize,
        target: Rgb565,
    ) -> bool {
        match self.target_colors.get_mut(idx) {
            Some(slot) if *slot != target => {
                *slot = target;
                self.transitioning[idx] = true;
                true
            }
            _ => false,
        }
    }

    /// Displayed color of a slot.
    #[inline]
    pub fn current(
        &self,
        idx: usize,
    ) -> Option<Rgb565> {
        self.current_colors.get(idx).copied()
    }

    /// Whether any slot is still moving.
    #[inline]
    pub fn is_animating(&self) -> bool { self.transitioning.iter().any(|&t| t) }

    /// Advance every active transition by one frame.
    ///
    /// Returns a bitmask of the slots that changed color (first 32 slots).
    pub fn update(&mut self) -> u32 {
        let mut changed: u32 = 0;

        for i in 0..N {
            if !self.transitioning[i] {
                continue;
            }
            let current = self.current_colors[i];
            let target = self.target_colors[i];

            if current == target {
                self.transitioning[i] = false;
                continue;
            }

            let next = lerp_rgb565(current, target, COLOR_LERP_SPEED);
            if colors_close_enough(next, target) {
                self.current_colors[i] = target;
                self.transitioning[i] = false;
            } else {
                self.current_colors[i] = next;
            }

            if i < 32 {
                changed |= 1 << i;
            }
        }

        changed
    }
}

// =============================================================================
// Color Interpolation Helpers
// =============================================================================

fn channels(color: Rgb565) -> (i32, i32, i32) {
    let raw = color.into_storage();
    (
        i32::from((raw >> 11) & 0x1F),
        i32::from((raw >> 5) & 0x3F),
        i32::from(raw & 0x1F),
    )
}

fn from_channels(
    r: i32,
    g: i32,
    b: i32,
) -> Rgb565 {
    Rgb565::new(r.clamp(0, 31) as u8, g.clamp(0, 63) as u8, b.clamp(0, 31) as u8)
}

/// Exact blend of two colors at `t` in `[0, 1]` (0 = `from`, 1 = `to`).
pub fn mix_rgb565(
    from: Rgb565,
    to: Rgb565,
    t: f32,
) -> Rgb565 {
    let t = t.clamp(0.0, 1.0);
    let (fr, fg, fb) = channels(from);
    let (tr, tg, tb) = channels(to);
    let mix = |a: i32, b: i32| ((b - a) as f32).mul_add(t, a as f32).round() as i32;
    from_channels(mix(fr, tr), mix(fg, tg), mix(fb, tb))
}

/// One incremental step from `from` toward `to`.
///
/// Uses fixed-point integer math. When the computed step truncates to zero,
/// a step of ±1 is forced so repeated calls always converge.
fn lerp_rgb565(
    from: Rgb565,
    to: Rgb565,
    t: f32,
) -> Rgb565 {
    let (from_r, from_g, from_b) = channels(from);
    let (to_r, to_g, to_b) = channels(to);

    let t_fixed = (t * 256.0) as i32; // 8 bits fractional

    let compute_step = |delta: i32| -> i32 {
        if delta == 0 || t_fixed == 0 {
            0
        } else {
            let step = (delta * t_fixed) >> 8;
            if step == 0 { delta.signum() } else { step }
        }
    };

    from_channels(
        from_r + compute_step(to_r - from_r),
        from_g + compute_step(to_g - from_g),
        from_b + compute_step(to_b - from_b),
    )
}

/// Manhattan distance in RGB565 channel space within the snap threshold.
fn colors_close_enough(
    a: Rgb565,
    b: Rgb565,
) -> bool {
    let (ar, ag, ab) = channels(a);
    let (br, bg, bb) = channels(b);
    (ar - br).abs() + (ag - bg).abs() + (ab - bb).abs() <= COLOR_SNAP_THRESHOLD
}

// =============================================================================
// Unit Tests
// =============================================================================
