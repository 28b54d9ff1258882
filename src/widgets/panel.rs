//! Glass panel container.
//!
//! A rounded rectangle with a dark fill and a thin light border, optionally
//! topped by a title bar with three window dots:
//!
//! ```text
//! ╭──────────────────────────────╮
//! │ ● ● ●  TERMINAL              │  <- title bar (TITLE_BAR_HEIGHT)
//! ├──────────────────────────────┤
//! │                              │
//! │        content_area()        │
//! │                              │
//! ╰──────────────────────────────╯
//! ```
//!
//! Panels are drawn with an entrance `offset` and a `visibility` in `[0, 1]`;
//! visibility fades every color in from [`BACKGROUND`].

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment,
    },
    text::{Baseline, Text},
};
use heapless::String;

use crate::{
    animations::mix_rgb565,
    colors::{AMBER, BACKGROUND, EMERALD, GLASS_BORDER, GLASS_FILL, GLASS_MUTED, ROSE},
    styles::LABEL_FONT,
};

/// Corner radius of panels.
pub const PANEL_CORNER_RADIUS: u32 = 12;

/// Height of the optional title bar.
pub const TITLE_BAR_HEIGHT: u32 = 28;

/// Inner padding between the border and the content.
pub const PANEL_PADDING: u32 = 12;

/// Window dots: close, minimize, maximize.
const DOT_COLORS: [Rgb565; 3] = [ROSE, AMBER, EMERALD];

const DOT_DIAMETER: u32 = 9;
const DOT_SPACING: i32 = 14;

/// Longest title that is rendered; longer titles are cut.
const TITLE_MAX_LEN: usize = 24;

/// Bordered glass container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelShell {
    bounds: Rectangle,
    title: Option<&'static str>,
}

impl PanelShell {
    /// Untitled panel covering `bounds`.
    pub const fn new(bounds: Rectangle) -> Self { Self { bounds, title: None } }

    /// Panel with a title bar.
    pub const fn titled(
        bounds: Rectangle,
        title: &'static str,
    ) -> Self {
        Self {
            bounds,
            title: Some(title),
        }
    }

    #[inline]
    pub const fn bounds(&self) -> Rectangle { self.bounds }

    #[inline]
    pub const fn title(&self) -> Option<&'static str> { self.title }

    /// Area available to the panel content, at rest (no entrance offset).
    pub fn content_area(&self) -> Rectangle {
        let header = if self.title.is_some() { TITLE_BAR_HEIGHT } else { 0 };
        let inset = PANEL_PADDING * 2;
        Rectangle::new(
            self.bounds.top_left + Point::new(PANEL_PADDING as i32, (header + PANEL_PADDING) as i32),
            Size::new(
                self.bounds.size.width.saturating_sub(inset),
                self.bounds.size.height.saturating_sub(inset + header),
            ),
        )
    }

    /// Draw the shell (not the content).
    pub fn draw<D>(
        &self,
        display: &mut D,
        offset: Point,
        visibility: f32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let bounds = self.bounds.translate(offset);
        let fade = |color| mix_rgb565(BACKGROUND, color, visibility);

        let shell_style = PrimitiveStyleBuilder::new()
            .fill_color(fade(GLASS_FILL))
            .stroke_color(fade(GLASS_BORDER))
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        RoundedRectangle::with_equal_corners(bounds, Size::new(PANEL_CORNER_RADIUS, PANEL_CORNER_RADIUS))
            .into_styled(shell_style)
            .draw(display)
            .ok();

        let Some(title) = self.title else {
            return;
        };

        // Title bar separator
        let sep_y = bounds.top_left.y + TITLE_BAR_HEIGHT as i32;
        let left = bounds.top_left.x + 1;
        let right = bounds.top_left.x + bounds.size.width as i32 - 2;
        Line::new(Point::new(left, sep_y), Point::new(right, sep_y))
            .into_styled(PrimitiveStyle::with_stroke(fade(GLASS_BORDER), 1))
            .draw(display)
            .ok();

        let dot_y = bounds.top_left.y + TITLE_BAR_HEIGHT as i32 / 2;
        let mut dot_x = bounds.top_left.x + PANEL_PADDING as i32 + DOT_DIAMETER as i32 / 2;
        for color in DOT_COLORS {
            // Dots are drawn at 60% strength
            Circle::with_center(Point::new(dot_x, dot_y), DOT_DIAMETER)
                .into_styled(PrimitiveStyle::with_fill(fade(mix_rgb565(GLASS_FILL, color, 0.6))))
                .draw(display)
                .ok();
            dot_x += DOT_SPACING;
        }

        let upper = uppercase(title);
        let title_pos = Point::new(dot_x + 4, dot_y);
        Text::with_baseline(
            &upper,
            title_pos,
            MonoTextStyle::new(LABEL_FONT, fade(GLASS_MUTED)),
            Baseline::Middle,
        )
        .draw(display)
        .ok();
    }
}

/// ASCII-uppercase copy of `text`, truncated to [`TITLE_MAX_LEN`].
pub fn uppercase(text: &str) -> String<TITLE_MAX_LEN> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c.to_ascii_uppercase()).is_err() {
            break;
        }
    }
    out
}
