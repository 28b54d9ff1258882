//! Terminal panel replaying the boot sequence.
//!
//! Each revealed line fades in from the panel fill and slides 8 px in from the
//! left over [`LINE_FADE_MS`]. A block cursor blinks below the last line. When
//! the log outgrows the panel, the oldest lines scroll out of view.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use super::panel::PanelShell;
use crate::{
    animations::{blink_visible, delayed_progress, mix_rgb565},
    boot::{BootSequencePlayer, LineClass, RevealedLine},
    colors::{BACKGROUND, EMERALD, GLASS_FILL, GLASS_MUTED, ORB_GLOW},
    config::{CURSOR_BLINK_MS, LINE_FADE_MS},
    styles::TERMINAL_FONT,
};

/// Panel title.
const TITLE: &str = "Terminal";

/// Vertical distance between line tops.
pub const LINE_HEIGHT: u32 = 18;

/// Horizontal slide distance of a new line.
const LINE_SLIDE_PX: f32 = 8.0;

/// Text color for a line class.
pub const fn class_color(class: LineClass) -> Rgb565 {
    match class {
        LineClass::Success => EMERALD,
        LineClass::Highlight => ORB_GLOW,
        LineClass::Neutral => GLASS_MUTED,
    }
}

/// Panel owning a boot sequence player.
pub struct TerminalWindow {
    panel: PanelShell,
    player: BootSequencePlayer,
}

impl TerminalWindow {
    pub fn new(
        bounds: Rectangle,
        player: BootSequencePlayer,
    ) -> Self {
        Self {
            panel: PanelShell::titled(bounds, TITLE),
            player,
        }
    }

    /// Start (or restart) the boot sequence.
    pub fn start(
        &mut self,
        now_ms: u64,
    ) {
        self.player.start(now_ms);
    }

    /// Reveal due lines. Returns how many appeared.
    pub fn update(
        &mut self,
        now_ms: u64,
    ) -> usize {
        self.player.poll(now_ms)
    }

    /// Reveal lines due at `now_ms`, then cancel the rest. Revealed lines stay
    /// on screen.
    pub fn stop(
        &mut self,
        now_ms: u64,
    ) -> bool {
        self.player.stop(now_ms)
    }

    #[inline]
    pub const fn player(&self) -> &BootSequencePlayer { &self.player }

    #[inline]
    pub const fn panel(&self) -> &PanelShell { &self.panel }

    /// Number of text rows that fit, one of which is kept for the cursor.
    pub fn visible_rows(&self) -> usize { (self.panel.content_area().size.height / LINE_HEIGHT) as usize }

    /// Lines currently on screen, oldest first.
    pub fn visible_lines(&self) -> &[RevealedLine] {
        let lines = self.player.log().lines();
        let rows = self.visible_rows().saturating_sub(1);
        &lines[lines.len().saturating_sub(rows)..]
    }

    pub fn draw<D>(
        &self,
        display: &mut D,
        now_ms: u64,
        offset: Point,
        visibility: f32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.panel.draw(display, offset, visibility);

        let area = self.panel.content_area().translate(offset);
        let lines = self.visible_lines();

        for (row, line) in lines.iter().enumerate() {
            let age = now_ms.saturating_sub(line.revealed_at_ms);
            let t = delayed_progress(age, 0, LINE_FADE_MS);

            // Lines fade from the panel fill, then the whole panel fades with its entrance
            let color = mix_rgb565(BACKGROUND, mix_rgb565(GLASS_FILL, class_color(line.class), t), visibility);
            let slide = (LINE_SLIDE_PX * (1.0 - t)).round() as i32;
            let pos = Point::new(area.top_left.x - slide, row_top(area, row));

            Text::with_baseline(&line.text, pos, MonoTextStyle::new(TERMINAL_FONT, color), Baseline::Top)
                .draw(display)
                .ok();
        }

        let blink_elapsed = now_ms.saturating_sub(self.player.started_at_ms());
        if blink_visible(blink_elapsed, CURSOR_BLINK_MS) {
            let cursor = Rectangle::new(
                Point::new(area.top_left.x, row_top(area, lines.len())),
                TERMINAL_FONT.character_size,
            );
            cursor
                .into_styled(PrimitiveStyle::with_fill(mix_rgb565(BACKGROUND, ORB_GLOW, visibility)))
                .draw(display)
                .ok();
        }
    }
}

fn row_top(
    area: Rectangle,
    row: usize,
) -> i32 {
    area.top_left.y + (row as u32 * LINE_HEIGHT) as i32
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::boot::BootLine;

    fn bounds() -> Rectangle { Rectangle::new(Point::zero(), Size::new(300, 260)) }

    fn reference() -> TerminalWindow { TerminalWindow::new(bounds(), BootSequencePlayer::reference()) }

    #[test]
    fn test_class_colors() {
        assert_eq!(class_color(LineClass::Success), EMERALD);
        assert_eq!(class_color(LineClass::Highlight), ORB_GLOW);
        assert_eq!(class_color(LineClass::Neutral), GLASS_MUTED);
    }

    #[test]
    fn test_reference_fits_without_scrolling() {
        let mut terminal = reference();
        terminal.start(0);
        terminal.update(5000);
        assert_eq!(terminal.visible_lines().len(), 9);
    }

    #[test]
    fn test_long_log_scrolls_oldest_out() {
        let lines = (0..30).map(|i| BootLine::new(format!("> line {i}"), i * 10)).collect();
        let mut terminal = TerminalWindow::new(bounds(), BootSequencePlayer::new(lines));
        terminal.start(0);
        terminal.update(1000);

        let visible = terminal.visible_lines();
        assert_eq!(visible.len(), terminal.visible_rows() - 1);
        assert_eq!(visible.last().map(|l| l.text.as_str()), Some("> line 29"));
    }

    #[test]
    fn test_stop_keeps_revealed_lines() {
        let mut terminal = reference();
        terminal.start(0);
        terminal.update(1000);
        assert!(terminal.stop(1000));
        assert_eq!(terminal.update(10_000), 0);
        assert_eq!(terminal.visible_lines().len(), 2);
    }

    #[test]
    fn test_stop_without_update_shows_due_lines() {
        let mut terminal = reference();
        terminal.start(0);
        assert!(terminal.stop(1000));
        assert_eq!(terminal.visible_lines().len(), 2);
    }

    #[test]
    fn test_cursor_blinks() {
        let mut terminal = reference();
        terminal.start(0);

        let area = terminal.panel().content_area();
        // Cursor sits on the first row while the log is empty
        let cursor_px = area.top_left + Point::new(2, 2);

        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(300, 260));
        display.clear(BACKGROUND).ok();
        terminal.draw(&mut display, 0, Point::zero(), 1.0);
        assert_eq!(display.get_pixel(cursor_px), ORB_GLOW);

        display.clear(BACKGROUND).ok();
        terminal.draw(&mut display, CURSOR_BLINK_MS / 2, Point::zero(), 1.0);
        assert_eq!(display.get_pixel(cursor_px), GLASS_FILL);
    }
}
