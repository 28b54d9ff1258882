//! Bottom navigation dock.
//!
//! Four static items with no routing. Left/Right move a hover highlight: the
//! hovered item grows, lifts and shows its label, and its tile colors ease
//! toward the highlight through a [`ColorTransition`].

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment, Triangle,
    },
    text::Text,
};

use super::panel::{PanelShell, uppercase};
use crate::{
    animations::{ColorTransition, mix_rgb565},
    colors::{BACKGROUND, GLASS_BORDER, GLASS_HIGHLIGHT, GLASS_MUTED, WHITE},
    styles::{CENTERED, LABEL_FONT},
};

/// Icon drawn inside a dock tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockIcon {
    Home,
    Terminal,
    Cpu,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockItem {
    pub label: &'static str,
    pub icon: DockIcon,
}

pub const DOCK_ITEMS: [DockItem; 4] = [
    DockItem {
        label: "Home",
        icon: DockIcon::Home,
    },
    DockItem {
        label: "Terminal",
        icon: DockIcon::Terminal,
    },
    DockItem {
        label: "Vitals",
        icon: DockIcon::Cpu,
    },
    DockItem {
        label: "Settings",
        icon: DockIcon::Settings,
    },
];

const ITEM_COUNT: usize = DOCK_ITEMS.len();

// =============================================================================
// Layout Constants
// =============================================================================

pub const TILE_SIZE: u32 = 48;
const TILE_GAP: u32 = 12;
const PADDING_X: u32 = 20;
const PADDING_Y: u32 = 12;
/// Space under the tiles reserved for the hover label.
const LABEL_SPACE: u32 = 14;

/// Dock size derived from the tile layout.
pub const DOCK_SIZE: Size = Size::new(
    PADDING_X * 2 + TILE_SIZE * ITEM_COUNT as u32 + TILE_GAP * (ITEM_COUNT as u32 - 1),
    PADDING_Y * 2 + TILE_SIZE + LABEL_SPACE,
);

/// Hovered tiles grow by this factor and lift by [`HOVER_LIFT`].
const HOVER_SCALE: f32 = 1.2;
const HOVER_LIFT: i32 = 6;

const TILE_CORNER_RADIUS: u32 = 10;

/// Tile fill at rest and hovered (white at ~6% / ~12%).
const TILE_FILL: Rgb565 = Rgb565::new(3, 7, 6);
const TILE_FILL_HOVER: Rgb565 = Rgb565::new(5, 11, 9);

// =============================================================================
// Dock
// =============================================================================

pub struct Dock {
    shell: PanelShell,
    hover: Option<usize>,
    /// Per-tile border color, eased toward the highlight when hovered.
    borders: ColorTransition<ITEM_COUNT>,
}

impl Dock {
    /// Dock with its top-left corner at `top_left`.
    pub const fn new(top_left: Point) -> Self {
        Self {
            shell: PanelShell::new(Rectangle::new(top_left, DOCK_SIZE)),
            hover: None,
            borders: ColorTransition::new(GLASS_BORDER),
        }
    }

    /// Dock horizontally centered on `center_x` with its bottom edge at `bottom`.
    pub const fn centered(
        center_x: i32,
        bottom: i32,
    ) -> Self {
        Self::new(Point::new(
            center_x - DOCK_SIZE.width as i32 / 2,
            bottom - DOCK_SIZE.height as i32,
        ))
    }

    #[inline]
    pub const fn bounds(&self) -> Rectangle { self.shell.bounds() }

    #[inline]
    pub const fn hover(&self) -> Option<usize> { self.hover }

    /// The hovered item, if any.
    pub fn hovered(&self) -> Option<&DockItem> { self.hover.map(|idx| &DOCK_ITEMS[idx]) }

    /// Move the hover one item right. Starts at the first item.
    pub fn hover_next(&mut self) {
        let next = match self.hover {
            None => 0,
            Some(idx) => (idx + 1).min(ITEM_COUNT - 1),
        };
        self.set_hover(Some(next));
    }

    /// Move the hover one item left. Starts at the last item.
    pub fn hover_prev(&mut self) {
        let prev = match self.hover {
            None => ITEM_COUNT - 1,
            Some(idx) => idx.saturating_sub(1),
        };
        self.set_hover(Some(prev));
    }

    pub fn clear_hover(&mut self) { self.set_hover(None); }

    fn set_hover(
        &mut self,
        hover: Option<usize>,
    ) {
        self.hover = hover;
        for idx in 0..ITEM_COUNT {
            let target = if hover == Some(idx) { GLASS_HIGHLIGHT } else { GLASS_BORDER };
            self.borders.set_target(idx, target);
        }
    }

    /// Advance the hover color fades by one frame.
    pub fn update(&mut self) { self.borders.update(); }

    /// Tile rectangle at rest (no hover, no entrance offset).
    pub fn tile_rect(
        &self,
        idx: usize,
    ) -> Rectangle {
        let origin = self.bounds().top_left;
        let x = origin.x + (PADDING_X + idx as u32 * (TILE_SIZE + TILE_GAP)) as i32;
        Rectangle::new(Point::new(x, origin.y + PADDING_Y as i32), Size::new_equal(TILE_SIZE))
    }

    /// Tile rectangle as drawn, including the hover growth and lift.
    pub fn displayed_tile_rect(
        &self,
        idx: usize,
    ) -> Rectangle {
        let rest = self.tile_rect(idx);
        if self.hover != Some(idx) {
            return rest;
        }
        let side = (TILE_SIZE as f32 * HOVER_SCALE).round() as u32;
        let center = rest.center() - Point::new(0, HOVER_LIFT);
        Rectangle::with_center(center, Size::new_equal(side))
    }

    pub fn draw<D>(
        &self,
        display: &mut D,
        offset: Point,
        visibility: f32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.shell.draw(display, offset, visibility);
        let fade = |color| mix_rgb565(BACKGROUND, color, visibility);

        // Hovered tile last so it overlaps its neighbours
        let order = (0..ITEM_COUNT).filter(|&i| self.hover != Some(i)).chain(self.hover);
        for idx in order {
            let hovered = self.hover == Some(idx);
            let rect = self.displayed_tile_rect(idx).translate(offset);
            let border = self.borders.current(idx).unwrap_or(GLASS_BORDER);
            let style = PrimitiveStyleBuilder::new()
                .fill_color(fade(if hovered { TILE_FILL_HOVER } else { TILE_FILL }))
                .stroke_color(fade(border))
                .stroke_width(1)
                .stroke_alignment(StrokeAlignment::Inside)
                .build();
            RoundedRectangle::with_equal_corners(rect, Size::new_equal(TILE_CORNER_RADIUS))
                .into_styled(style)
                .draw(display)
                .ok();

            let icon_color = fade(if hovered { WHITE } else { GLASS_MUTED });
            draw_icon(display, DOCK_ITEMS[idx].icon, rect.center(), icon_color);

            if hovered {
                let label = uppercase(DOCK_ITEMS[idx].label);
                let pos = Point::new(rect.center().x, rect.bottom_right().map_or(rect.top_left.y, |p| p.y) + 11);
                Text::with_text_style(&label, pos, MonoTextStyle::new(LABEL_FONT, fade(GLASS_MUTED)), CENTERED)
                    .draw(display)
                    .ok();
            }
        }
    }
}

/// Simple line-art icons, roughly 20 px across.
fn draw_icon<D>(
    display: &mut D,
    icon: DockIcon,
    c: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let stroke = PrimitiveStyle::with_stroke(color, 2);
    match icon {
        DockIcon::Home => {
            Triangle::new(c + Point::new(-10, -1), c + Point::new(0, -10), c + Point::new(10, -1))
                .into_styled(stroke)
                .draw(display)
                .ok();
            Rectangle::new(c + Point::new(-6, -1), Size::new(13, 10))
                .into_styled(stroke)
                .draw(display)
                .ok();
        }
        DockIcon::Terminal => {
            Line::new(c + Point::new(-8, -6), c + Point::new(-2, 0))
                .into_styled(stroke)
                .draw(display)
                .ok();
            Line::new(c + Point::new(-2, 0), c + Point::new(-8, 6))
                .into_styled(stroke)
                .draw(display)
                .ok();
            Line::new(c + Point::new(1, 7), c + Point::new(9, 7))
                .into_styled(stroke)
                .draw(display)
                .ok();
        }
        DockIcon::Cpu => {
            Rectangle::with_center(c, Size::new_equal(14))
                .into_styled(stroke)
                .draw(display)
                .ok();
            for d in [-4, 4] {
                for (from, to) in [
                    (Point::new(d, -7), Point::new(d, -11)),
                    (Point::new(d, 7), Point::new(d, 11)),
                    (Point::new(-7, d), Point::new(-11, d)),
                    (Point::new(7, d), Point::new(11, d)),
                ] {
                    Line::new(c + from, c + to)
                        .into_styled(PrimitiveStyle::with_stroke(color, 1))
                        .draw(display)
                        .ok();
                }
            }
        }
        DockIcon::Settings => {
            Circle::with_center(c, 18).into_styled(stroke).draw(display).ok();
            Circle::with_center(c, 6).into_styled(stroke).draw(display).ok();
        }
    }
}
