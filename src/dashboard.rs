//! Dashboard composition.
//!
//! Fixed arrangement on the 800x480 surface:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ JARVIS DASHBOARD                     ● ALL SYSTEMS NOMINAL │  status bar
//! │                                                            │
//! │ ┌─ TERMINAL ──────┐        .-~~~-.         ┌─ VITALS ────┐ │
//! │ │ > Initializing  │      (   ORB   )       │ (CPU) (MEM) │ │
//! │ │ > Loading ...   │       '-.___.-'        └─────────────┘ │
//! │ └─────────────────┘     JARVIS ONLINE                      │
//! │                   ┌──────────────────────┐                 │
//! │                   │ [⌂]  [>_]  [▣]  [⚙]  │                 │  dock
//! └───────────────────┴──────────────────────┴─────────────────┘
//! ```
//!
//! Each element enters with its own delayed, ease-out [`Entrance`]. The
//! composer owns every widget instance; there is no shared state between
//! dashboards.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use tracing::info;

use crate::{
    animations::{Entrance, float_offset},
    boot::{BootSequencePlayer, PlayerState},
    colors::BACKGROUND,
    config::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH},
    random::RandomSource,
    simulator::{MetricSimulator, VitalsSnapshot},
    widgets::{Dock, SystemVitals, TerminalWindow, draw_orb, draw_status_bar},
};

// =============================================================================
// Layout Constants
// =============================================================================

const SIDE_MARGIN: i32 = 24;

/// Terminal panel on the left, vertically centered on the orb row.
pub const TERMINAL_BOUNDS: Rectangle = Rectangle::new(Point::new(SIDE_MARGIN, CENTER_Y - 130), Size::new(290, 260));

/// Vitals panel on the right.
pub const VITALS_BOUNDS: Rectangle = Rectangle::new(
    Point::new(SCREEN_WIDTH as i32 - SIDE_MARGIN - 220, CENTER_Y - 110),
    Size::new(220, 220),
);

/// Orb center.
pub const ORB_CENTER: Point = Point::new(CENTER_X, CENTER_Y);

/// Distance between the dock and the bottom edge.
const DOCK_BOTTOM_MARGIN: i32 = 24;

/// Idle bob of the terminal and vitals panels.
const FLOAT_PERIOD_MS: u64 = 6000;
const FLOAT_AMPLITUDE_PX: f32 = 4.0;

// =============================================================================
// Entrance Animations
// =============================================================================

pub const STATUS_ENTRANCE: Entrance = Entrance::slide(Point::new(0, -20), 800, 800);
pub const TERMINAL_ENTRANCE: Entrance = Entrance::slide(Point::new(-60, 0), 200, 900);
pub const ORB_ENTRANCE: Entrance = Entrance::grow(0.6, 0, 1000);
pub const VITALS_ENTRANCE: Entrance = Entrance::slide(Point::new(60, 0), 400, 900);
pub const DOCK_ENTRANCE: Entrance = Entrance::slide(Point::new(0, 40), 600, 800);

const ENTRANCES: [Entrance; 5] = [
    STATUS_ENTRANCE,
    TERMINAL_ENTRANCE,
    ORB_ENTRANCE,
    VITALS_ENTRANCE,
    DOCK_ENTRANCE,
];

/// What changed during one [`DashboardComposer::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameUpdate {
    /// Boot lines revealed this frame.
    pub lines_revealed: usize,
    /// Whether the vitals received a new snapshot.
    pub vitals_updated: bool,
}

/// Widget state summary for the debug page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStatus {
    pub boot_state: PlayerState,
    pub lines_revealed: usize,
    pub lines_pending: usize,
    pub lines_total: usize,
    pub vitals_running: bool,
    pub ticks: u64,
    pub failed_ticks: u64,
    pub latest: Option<VitalsSnapshot>,
    pub hovered: Option<&'static str>,
}

// =============================================================================
// Composer
// =============================================================================

/// Owns and arranges every widget of the dashboard.
pub struct DashboardComposer<R: RandomSource> {
    terminal: TerminalWindow,
    vitals: SystemVitals<R>,
    dock: Dock,
    started_at_ms: u64,
}

impl<R: RandomSource> DashboardComposer<R> {
    /// Dashboard with the reference boot sequence and vitals fed by `source`.
    pub fn new(source: R) -> Self {
        Self::with_parts(BootSequencePlayer::reference(), MetricSimulator::new(source))
    }

    /// Dashboard with a custom player and simulator.
    pub fn with_parts(
        player: BootSequencePlayer,
        simulator: MetricSimulator<R>,
    ) -> Self {
        Self {
            terminal: TerminalWindow::new(TERMINAL_BOUNDS, player),
            vitals: SystemVitals::new(VITALS_BOUNDS, simulator),
            dock: Dock::centered(CENTER_X, SCREEN_HEIGHT as i32 - DOCK_BOTTOM_MARGIN),
            started_at_ms: 0,
        }
    }

    /// Start the entrance animations, the boot sequence and the simulator.
    pub fn start(
        &mut self,
        now_ms: u64,
    ) {
        self.started_at_ms = now_ms;
        self.terminal.start(now_ms);
        self.vitals.start(now_ms);
        info!("dashboard started");
    }

    /// Replay the boot sequence from the first line.
    pub fn restart_boot(
        &mut self,
        now_ms: u64,
    ) {
        self.terminal.start(now_ms);
    }

    /// Advance every widget to `now_ms`.
    pub fn update(
        &mut self,
        now_ms: u64,
    ) -> FrameUpdate {
        self.dock.update();
        FrameUpdate {
            lines_revealed: self.terminal.update(now_ms),
            vitals_updated: self.vitals.update(now_ms),
        }
    }

    /// Settle everything due at `now_ms`, then stop every timer. Returns
    /// `true` if anything was still running.
    pub fn stop(
        &mut self,
        now_ms: u64,
    ) -> bool {
        // Both must run; no short-circuit
        let terminal = self.terminal.stop(now_ms);
        let vitals = self.vitals.stop(now_ms);
        terminal | vitals
    }

    /// Milliseconds since [`start`](Self::start).
    #[inline]
    pub const fn elapsed_ms(
        &self,
        now_ms: u64,
    ) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }

    /// Whether every entrance animation has finished.
    pub fn intro_done(
        &self,
        now_ms: u64,
    ) -> bool {
        let elapsed = self.elapsed_ms(now_ms);
        ENTRANCES.iter().all(|e| e.is_done(elapsed))
    }

    /// Summary of the widget state.
    pub fn status(&self) -> DashboardStatus {
        let player = self.terminal.player();
        let simulator = self.vitals.simulator();
        DashboardStatus {
            boot_state: player.state(),
            lines_revealed: player.log().len(),
            lines_pending: player.pending(),
            lines_total: player.script_len(),
            vitals_running: simulator.is_running(),
            ticks: simulator.ticks(),
            failed_ticks: simulator.failed_ticks(),
            latest: simulator.latest(),
            hovered: self.dock.hovered().map(|item| item.label),
        }
    }

    #[inline]
    pub const fn terminal(&self) -> &TerminalWindow { &self.terminal }

    #[inline]
    pub const fn vitals(&self) -> &SystemVitals<R> { &self.vitals }

    #[inline]
    pub const fn dock(&self) -> &Dock { &self.dock }

    #[inline]
    pub const fn dock_mut(&mut self) -> &mut Dock { &mut self.dock }

    /// Draw the full frame for `now_ms`.
    pub fn draw<D>(
        &self,
        display: &mut D,
        now_ms: u64,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let elapsed = self.elapsed_ms(now_ms);
        display.clear(BACKGROUND).ok();

        // Orb first: panels overlap its outer glow
        draw_orb(
            display,
            ORB_CENTER,
            elapsed,
            ORB_ENTRANCE.scale_at(elapsed),
            ORB_ENTRANCE.progress(elapsed),
        );

        let float = float_offset(elapsed, FLOAT_PERIOD_MS, FLOAT_AMPLITUDE_PX);
        self.terminal.draw(
            display,
            now_ms,
            TERMINAL_ENTRANCE.offset_at(elapsed) + float,
            TERMINAL_ENTRANCE.progress(elapsed),
        );
        self.vitals.draw(
            display,
            now_ms,
            VITALS_ENTRANCE.offset_at(elapsed) + float,
            VITALS_ENTRANCE.progress(elapsed),
        );
        self.dock.draw(display, DOCK_ENTRANCE.offset_at(elapsed), DOCK_ENTRANCE.progress(elapsed));
        draw_status_bar(
            display,
            elapsed,
            STATUS_ENTRANCE.offset_at(elapsed),
            STATUS_ENTRANCE.progress(elapsed),
        );
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::{
        clock::{Clock, ManualClock},
        colors::GLASS_FILL,
        config::BOOT_SEQUENCE,
        random::{RngSource, ScriptedSource},
    };

    fn display() -> SimulatorDisplay<Rgb565> { SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

    fn screen() -> Rectangle { Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)) }

    #[test]
    fn test_layout_fits_screen() {
        let dashboard = DashboardComposer::new(ScriptedSource::default());
        for rect in [TERMINAL_BOUNDS, VITALS_BOUNDS, dashboard.dock().bounds()] {
            assert!(screen().contains(rect.top_left));
            assert!(rect.bottom_right().is_some_and(|p| screen().contains(p)));
        }
        assert!(TERMINAL_BOUNDS.intersection(&VITALS_BOUNDS).is_zero_sized());
        assert!(TERMINAL_BOUNDS.intersection(&dashboard.dock().bounds()).is_zero_sized());
    }

    #[test]
    fn test_full_run_at_5000ms() {
        let clock = ManualClock::new(0);
        let mut dashboard = DashboardComposer::new(RngSource::seeded(11));
        dashboard.start(clock.now_ms());

        while clock.now_ms() < 5000 {
            clock.advance(20);
            dashboard.update(clock.now_ms());
        }

        let texts: Vec<&str> = dashboard.terminal().player().log().texts().collect();
        let expected: Vec<&str> = BOOT_SEQUENCE.iter().map(|(t, _)| *t).collect();
        assert_eq!(texts, expected);
        // Ticks at 0 and 3000
        assert_eq!(dashboard.vitals().simulator().ticks(), 2);
        assert!(dashboard.intro_done(clock.now_ms()));
    }

    #[test]
    fn test_update_reports_changes() {
        let mut dashboard = DashboardComposer::new(ScriptedSource::new([0.5, 0.5, 0.1, 0.1]));
        dashboard.start(0);

        let first = dashboard.update(0);
        assert_eq!(first.lines_revealed, 1);
        assert!(!first.vitals_updated, "tick 0 is applied by start");

        let later = dashboard.update(3000);
        assert_eq!(later.lines_revealed, 5);
        assert!(later.vitals_updated);
    }

    #[test]
    fn test_stop_idempotent_and_final() {
        let mut dashboard = DashboardComposer::new(RngSource::seeded(1));
        dashboard.start(0);
        dashboard.update(1000);

        assert!(dashboard.stop(1000));
        assert!(!dashboard.stop(2000));
        assert_eq!(dashboard.update(60_000), FrameUpdate::default());
        assert_eq!(dashboard.terminal().player().log().len(), 2);
    }

    #[test]
    fn test_stop_settles_due_lines_without_update() {
        let mut dashboard = DashboardComposer::new(RngSource::seeded(1));
        dashboard.start(0);

        assert!(dashboard.stop(1000));
        assert_eq!(dashboard.terminal().player().log().len(), 2);
        assert_eq!(dashboard.status().boot_state, PlayerState::Cancelled);
        assert!(!dashboard.status().vitals_running);
    }

    #[test]
    fn test_restart_boot_replays_log() {
        let mut dashboard = DashboardComposer::new(RngSource::seeded(1));
        dashboard.start(0);
        dashboard.update(5000);
        dashboard.restart_boot(6000);

        assert!(dashboard.terminal().player().log().is_empty());
        assert_eq!(dashboard.update(6000).lines_revealed, 1);
    }

    #[test]
    fn test_panels_hidden_before_entrance() {
        let mut dashboard = DashboardComposer::new(RngSource::seeded(1));
        dashboard.start(0);

        let mut display = display();
        dashboard.draw(&mut display, 0);
        let inside = Point::new(100, 340);
        assert_eq!(display.get_pixel(inside), BACKGROUND);

        dashboard.update(3000);
        dashboard.draw(&mut display, 3000);
        assert_eq!(display.get_pixel(inside), GLASS_FILL);
    }

    #[test]
    fn test_side_panels_float_when_idle() {
        let mut dashboard = DashboardComposer::new(RngSource::seeded(1));
        dashboard.start(0);
        // Just above the terminal's resting top edge
        let above = TERMINAL_BOUNDS.top_left + Point::new(80, -2);

        let mut display = display();
        dashboard.draw(&mut display, FLOAT_PERIOD_MS);
        assert_eq!(display.get_pixel(above), BACKGROUND, "resting at period start");

        dashboard.draw(&mut display, FLOAT_PERIOD_MS + FLOAT_PERIOD_MS / 2);
        assert_ne!(display.get_pixel(above), BACKGROUND, "lifted mid-period");
    }

    #[test]
    fn test_status_summary() {
        let mut dashboard = DashboardComposer::new(ScriptedSource::new([0.5, 0.5]));
        dashboard.start(0);
        dashboard.update(1000);
        dashboard.dock_mut().hover_next();

        let status = dashboard.status();
        assert_eq!(status.boot_state, PlayerState::Playing);
        assert_eq!(status.lines_revealed, 2);
        assert_eq!(status.lines_pending, 7);
        assert_eq!(status.lines_total, 9);
        assert!(status.vitals_running);
        assert_eq!(status.ticks, 1);
        assert_eq!(status.latest.map(|s| (s.cpu, s.memory)), Some((30, 52)));
        assert_eq!(status.hovered, Some("Home"));
    }

    #[test]
    fn test_entrance_timing() {
        let dashboard = DashboardComposer::new(ScriptedSource::default());
        assert!(!dashboard.intro_done(1500));
        // Status bar is last: 800ms delay + 800ms
        assert!(dashboard.intro_done(1600));
    }
}
