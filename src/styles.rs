//! Pre-computed static text styles to avoid per-frame object construction.
//!
//! `MonoTextStyle` and `TextStyle` are const-constructible in embedded-graphics 0.8,
//! so every fixed style lives here as a `const`. Styles whose color changes per
//! frame (fades, pulses) are built from [`LABEL_FONT`] / [`TERMINAL_FONT`] at the
//! call site: `MonoTextStyle::new(LABEL_FONT, color)`.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_7X13, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_14_POINT;

use crate::colors::GLASS_TEXT;

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text alignment. Gauge and dock labels, orb caption.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Centered on both axes. Gauge readouts inside the ring.
pub const CENTERED_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Small label font (6x10 pixels).
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Monospace terminal font (7x13 pixels).
pub const TERMINAL_FONT: &MonoFont = &FONT_7X13;

/// Gauge readout font (`ProFont` 14pt), faded in with its panel.
pub const VALUE_FONT: &MonoFont = &PROFONT_14_POINT;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Large title text (debug page header).
pub const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, GLASS_TEXT);
