//! Circular gauge drawing.
//!
//! Renders a [`GaugeView`] as a track ring, a progress arc starting at 12
//! o'clock and sweeping clockwise, the integer percentage in the middle and the
//! label below the ring.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Arc, Circle, PrimitiveStyle},
    text::Text,
};
use heapless::String;

use crate::{
    animations::mix_rgb565,
    colors::{BACKGROUND, GAUGE_TRACK, GLASS_MUTED, GLASS_TEXT},
    config::GAUGE_STROKE_WIDTH,
    gauge::GaugeView,
    styles::{CENTERED, CENTERED_MIDDLE, LABEL_FONT, VALUE_FONT},
};

/// Sweeps below this are not drawn (a zero-length arc still plots a dot).
const MIN_VISIBLE_SWEEP_DEG: f32 = 0.5;

/// Gap between the ring and the label baseline.
const LABEL_GAP: i32 = 14;

/// Draw a gauge centered on `center`.
pub fn draw_gauge<D>(
    display: &mut D,
    center: Point,
    view: &GaugeView,
    visibility: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let fade = |color| mix_rgb565(BACKGROUND, color, visibility);
    let radius = view.geometry.circumference / core::f32::consts::TAU;
    let diameter = (radius * 2.0).round() as u32;

    Circle::with_center(center, diameter)
        .into_styled(PrimitiveStyle::with_stroke(fade(GAUGE_TRACK), GAUGE_STROKE_WIDTH))
        .draw(display)
        .ok();

    let sweep = view.geometry.sweep_degrees();
    if sweep >= MIN_VISIBLE_SWEEP_DEG {
        Arc::with_center(center, diameter, Angle::from_degrees(-90.0), Angle::from_degrees(sweep))
            .into_styled(PrimitiveStyle::with_stroke(fade(view.color), GAUGE_STROKE_WIDTH))
            .draw(display)
            .ok();
    }

    // u32::MAX is ten digits
    let mut value_str: String<12> = String::new();
    write!(value_str, "{}%", view.shown.round() as u32).ok();
    Text::with_text_style(
        &value_str,
        center,
        MonoTextStyle::new(VALUE_FONT, fade(GLASS_TEXT)),
        CENTERED_MIDDLE,
    )
    .draw(display)
    .ok();

    let label_pos = Point::new(center.x, center.y + radius.round() as i32 + LABEL_GAP);
    Text::with_text_style(
        view.label,
        label_pos,
        MonoTextStyle::new(LABEL_FONT, fade(GLASS_MUTED)),
        CENTERED,
    )
    .draw(display)
    .ok();
}
