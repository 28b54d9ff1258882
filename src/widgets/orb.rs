//! Central breathing orb.
//!
//! Two glow rings and a solid core, each breathing on its own period, with a
//! pulsing `JARVIS ONLINE` caption underneath. The whole orb takes an extra
//! entrance scale.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder},
    text::Text,
};

use crate::{
    animations::{breathe, mix_rgb565, pulse_intensity},
    colors::{BACKGROUND, GLASS_MUTED, INDIGO, INDIGO_DARK, ORB_GLOW, WHITE},
    styles::{CENTERED, LABEL_FONT},
};

pub const ORB_CAPTION: &str = "JARVIS ONLINE";

pub const OUTER_RING_RADIUS: f32 = 115.0;
pub const INNER_RING_RADIUS: f32 = 90.0;
pub const CORE_RADIUS: f32 = 51.0;

const OUTER_RING_PERIOD_MS: u64 = 5000;
const INNER_RING_PERIOD_MS: u64 = 4000;
/// Inner ring lags the outer one.
const INNER_RING_DELAY_MS: u64 = 500;
const CORE_PERIOD_MS: u64 = 5000;
const CAPTION_PERIOD_MS: u64 = 4000;

const RING_PEAK_SCALE: f32 = 1.15;
const CORE_PEAK_SCALE: f32 = 1.06;

/// Ring color strength at full intensity.
const RING_STRENGTH: f32 = 0.4;

/// Distance from the orb center to the caption baseline.
const CAPTION_OFFSET: i32 = 100;

/// Radii of the orb parts at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbFrame {
    pub outer_ring: f32,
    pub inner_ring: f32,
    pub core: f32,
    /// Ring intensities, outer in `[0.4, 0.7]`, inner in `[0.3, 0.6]`.
    pub outer_glow: f32,
    pub inner_glow: f32,
    /// Caption intensity in `[0.4, 0.8]`.
    pub caption: f32,
}

impl OrbFrame {
    /// Orb geometry at `elapsed_ms`, scaled by `scale`.
    pub fn at(
        elapsed_ms: u64,
        scale: f32,
    ) -> Self {
        // Inner ring breathes inversely: largest at the start of its period
        let inner_phase = elapsed_ms.saturating_sub(INNER_RING_DELAY_MS);
        let inner = RING_PEAK_SCALE + 1.0 - breathe(inner_phase, INNER_RING_PERIOD_MS, RING_PEAK_SCALE);
        Self {
            outer_ring: OUTER_RING_RADIUS * breathe(elapsed_ms, OUTER_RING_PERIOD_MS, RING_PEAK_SCALE) * scale,
            inner_ring: INNER_RING_RADIUS * inner * scale,
            core: CORE_RADIUS * breathe(elapsed_ms, CORE_PERIOD_MS, CORE_PEAK_SCALE) * scale,
            outer_glow: 0.7 * pulse_intensity(elapsed_ms, OUTER_RING_PERIOD_MS, 0.4 / 0.7),
            // Inner ring is brightest while smallest
            inner_glow: 0.6 * pulse_intensity(inner_phase, INNER_RING_PERIOD_MS, 0.5),
            caption: 0.8 * pulse_intensity(elapsed_ms, CAPTION_PERIOD_MS, 0.5),
        }
    }
}

/// Draw the orb centered on `center`.
pub fn draw_orb<D>(
    display: &mut D,
    center: Point,
    elapsed_ms: u64,
    scale: f32,
    visibility: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let frame = OrbFrame::at(elapsed_ms, scale);
    let fade = |color, strength: f32| mix_rgb565(BACKGROUND, color, strength * visibility);

    // Rings are a faint glow at their full intensity
    Circle::with_center(center, diameter(frame.outer_ring))
        .into_styled(PrimitiveStyle::with_stroke(fade(INDIGO, RING_STRENGTH * frame.outer_glow), 2))
        .draw(display)
        .ok();
    Circle::with_center(center, diameter(frame.inner_ring))
        .into_styled(PrimitiveStyle::with_stroke(fade(INDIGO, RING_STRENGTH * frame.inner_glow), 2))
        .draw(display)
        .ok();

    // Soft halo, then the core with a darker rim
    Circle::with_center(center, diameter(frame.core * 1.25))
        .into_styled(PrimitiveStyle::with_fill(fade(INDIGO, 0.25)))
        .draw(display)
        .ok();
    let core_style = PrimitiveStyleBuilder::new()
        .fill_color(fade(INDIGO, 1.0))
        .stroke_color(fade(INDIGO_DARK, 1.0))
        .stroke_width(3)
        .build();
    Circle::with_center(center, diameter(frame.core))
        .into_styled(core_style)
        .draw(display)
        .ok();

    // Upper-left light falloff and specular highlight
    let light_center = center + Point::new(-(frame.core * 0.2) as i32, -(frame.core * 0.2) as i32);
    Circle::with_center(light_center, diameter(frame.core * 0.55))
        .into_styled(PrimitiveStyle::with_fill(fade(mix_rgb565(INDIGO, ORB_GLOW, 0.5), 1.0)))
        .draw(display)
        .ok();
    let spec_center = center + Point::new(-(frame.core * 0.35) as i32, -(frame.core * 0.45) as i32);
    Circle::with_center(spec_center, diameter(frame.core * 0.25))
        .into_styled(PrimitiveStyle::with_fill(fade(mix_rgb565(ORB_GLOW, WHITE, 0.3), 1.0)))
        .draw(display)
        .ok();

    let caption_pos = Point::new(center.x, center.y + (CAPTION_OFFSET as f32 * scale) as i32);
    Text::with_text_style(
        ORB_CAPTION,
        caption_pos,
        MonoTextStyle::new(LABEL_FONT, fade(GLASS_MUTED, frame.caption / 0.8)),
        CENTERED,
    )
    .draw(display)
    .ok();
}

fn diameter(radius: f32) -> u32 { (radius.max(0.0) * 2.0).round() as u32 }

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_frame_at_start() {
        let frame = OrbFrame::at(0, 1.0);
        assert!((frame.outer_ring - OUTER_RING_RADIUS).abs() < EPS);
        assert!((frame.inner_ring - INNER_RING_RADIUS * RING_PEAK_SCALE).abs() < EPS);
        assert!((frame.core - CORE_RADIUS).abs() < EPS);
        assert!((frame.caption - 0.4).abs() < EPS);
        assert!((frame.outer_glow - 0.4).abs() < EPS);
        assert!((frame.inner_glow - 0.3).abs() < EPS);
    }

    #[test]
    fn test_frame_at_outer_peak() {
        let frame = OrbFrame::at(OUTER_RING_PERIOD_MS / 2, 1.0);
        assert!((frame.outer_ring - OUTER_RING_RADIUS * RING_PEAK_SCALE).abs() < 0.01);
        assert!((frame.core - CORE_RADIUS * CORE_PEAK_SCALE).abs() < 0.01);
    }

    #[test]
    fn test_frame_bounds() {
        for t in (0..30_000).step_by(53) {
            let frame = OrbFrame::at(t, 1.0);
            assert!(frame.outer_ring >= OUTER_RING_RADIUS - EPS);
            assert!(frame.outer_ring <= OUTER_RING_RADIUS * RING_PEAK_SCALE + EPS);
            assert!(frame.inner_ring >= INNER_RING_RADIUS - EPS);
            assert!(frame.inner_ring <= INNER_RING_RADIUS * RING_PEAK_SCALE + EPS);
            assert!(frame.core <= CORE_RADIUS * CORE_PEAK_SCALE + EPS);
            assert!((0.4 - EPS..=0.8 + EPS).contains(&frame.caption));
        }
    }

    #[test]
    fn test_entrance_scale_shrinks_orb() {
        let full = OrbFrame::at(0, 1.0);
        let small = OrbFrame::at(0, 0.6);
        assert!((small.core - full.core * 0.6).abs() < EPS);
    }

    #[test]
    fn test_draw_core_at_center() {
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(260, 260));
        display.clear(BACKGROUND).ok();
        draw_orb(&mut display, Point::new(130, 130), 0, 1.0, 1.0);

        // Lower right quadrant of the core is plain indigo
        assert_eq!(display.get_pixel(Point::new(150, 150)), INDIGO);
        assert_eq!(display.get_pixel(Point::new(2, 2)), BACKGROUND);
    }
}
