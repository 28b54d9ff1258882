//! Top status bar.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::{
    animations::{mix_rgb565, pulse_intensity},
    colors::{BACKGROUND, EMERALD, GLASS_MUTED},
    config::{SCREEN_WIDTH, STATUS_BAR_HEIGHT},
    styles::LABEL_FONT,
};

pub const STATUS_TITLE: &str = "JARVIS DASHBOARD";
pub const STATUS_TEXT: &str = "ALL SYSTEMS NOMINAL";

const MARGIN_X: i32 = 32;
const ROW_Y: i32 = (STATUS_BAR_HEIGHT / 2) as i32;

const DOT_DIAMETER: u32 = 6;
const DOT_GAP: i32 = 12;
const DOT_PULSE_MS: u64 = 2000;

/// Position of the pulsing status dot.
pub const STATUS_DOT_CENTER: Point = Point::new(
    SCREEN_WIDTH as i32 - MARGIN_X - (STATUS_TEXT.len() as u32 * 6) as i32 - DOT_GAP,
    ROW_Y,
);

/// Draw the status bar. `elapsed_ms` drives the dot pulse.
pub fn draw_status_bar<D>(
    display: &mut D,
    elapsed_ms: u64,
    offset: Point,
    visibility: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let fade = |color| mix_rgb565(BACKGROUND, color, visibility);
    let text_style = MonoTextStyle::new(LABEL_FONT, fade(GLASS_MUTED));

    let left = TextStyleBuilder::new().baseline(Baseline::Middle).build();
    Text::with_text_style(STATUS_TITLE, Point::new(MARGIN_X, ROW_Y) + offset, text_style, left)
        .draw(display)
        .ok();

    let right = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(
        STATUS_TEXT,
        Point::new(SCREEN_WIDTH as i32 - MARGIN_X, ROW_Y) + offset,
        text_style,
        right,
    )
    .draw(display)
    .ok();

    let dot = mix_rgb565(BACKGROUND, EMERALD, pulse_intensity(elapsed_ms, DOT_PULSE_MS, 0.5) * visibility);
    Circle::with_center(STATUS_DOT_CENTER + offset, DOT_DIAMETER)
        .into_styled(PrimitiveStyle::with_fill(dot))
        .draw(display)
        .ok();
}
