//! Desktop window for the Jarvis dashboard.
//!
//! Opens an SDL window through `embedded-graphics-simulator` and runs the
//! cooperative frame loop: poll events, advance the dashboard with the clock
//! reading, draw the active page, sleep to the frame budget.
//!
//! Logging goes through `tracing`; set `RUST_LOG=debug` to see every reveal
//! and tick. Set `JARVIS_SEED` to replay the same vitals.

use core::fmt::Write;
use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use jarvis_dashboard::clock::{Clock, SystemClock};
use jarvis_dashboard::colors::BACKGROUND;
use jarvis_dashboard::config::{FRAME_TIME, SCREEN_HEIGHT, SCREEN_WIDTH, seed_from_env};
use jarvis_dashboard::dashboard::DashboardComposer;
use jarvis_dashboard::pages::Page;
use jarvis_dashboard::profiling::{DebugLog, LOG_LINE_LENGTH, ProfilingMetrics};
use jarvis_dashboard::random::{RandomSource, RngSource};
use jarvis_dashboard::screens::draw_debug_page;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let source = match seed_from_env() {
        Some(seed) => {
            info!(seed, "seeded random source");
            RngSource::seeded(seed)
        }
        None => RngSource::from_os(),
    };

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("Jarvis", &output_settings);

    // The window only exists after the first update
    display.clear(BACKGROUND).ok();
    window.update(&display);

    // ==========================================================================
    // Main Loop State
    // ==========================================================================

    let clock = SystemClock::new();
    let mut dashboard = DashboardComposer::new(source);
    dashboard.start(clock.now_ms());

    let mut current_page = Page::default();
    let mut boot_reported = false;

    let mut metrics = ProfilingMetrics::new();
    let mut debug_log = DebugLog::new();
    debug_log.push("Dashboard started");

    // ==========================================================================
    // Main Render Loop
    // ==========================================================================

    'frames: loop {
        let frame_start = Instant::now();
        let now = clock.now_ms();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'frames,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat; Left/Right would otherwise race along the dock
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Q => break 'frames,
                        Keycode::Y => {
                            current_page = current_page.toggle();
                            push_event(&mut debug_log, format_args!("Page: {}", current_page.name()));
                        }
                        Keycode::Left if current_page == Page::Dashboard => {
                            dashboard.dock_mut().hover_prev();
                            log_hover(&dashboard, &mut debug_log);
                        }
                        Keycode::Right if current_page == Page::Dashboard => {
                            dashboard.dock_mut().hover_next();
                            log_hover(&dashboard, &mut debug_log);
                        }
                        Keycode::R => {
                            dashboard.restart_boot(now);
                            boot_reported = false;
                            debug_log.push("Boot sequence restarted");
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // ======================================================================
        // Advance Widgets
        // ======================================================================

        let update = dashboard.update(now);
        metrics.record_update(&update);

        let status = dashboard.status();
        if update.vitals_updated
            && let Some(snapshot) = status.latest
        {
            push_event(
                &mut debug_log,
                format_args!("Vitals: CPU {}% MEM {}%", snapshot.cpu, snapshot.memory),
            );
        }
        if !boot_reported && status.lines_pending == 0 && status.lines_revealed > 0 {
            boot_reported = true;
            push_event(
                &mut debug_log,
                format_args!("Boot complete: {}/{} lines", status.lines_revealed, status.lines_total),
            );
        }

        // ======================================================================
        // Page-Based Rendering
        // ======================================================================

        match current_page {
            Page::Dashboard => dashboard.draw(&mut display, now),
            Page::Debug => draw_debug_page(&mut display, &metrics, &status, &debug_log),
        }

        let render_time = frame_start.elapsed();
        window.update(&display);

        // ======================================================================
        // Frame Timing and Profiling
        // ======================================================================

        let pre_sleep = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(pre_sleep) {
            thread::sleep(remaining);
        }
        let sleep_time = frame_start.elapsed().saturating_sub(pre_sleep);

        metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
    }

    dashboard.stop(clock.now_ms());
    info!(frames = metrics.total_frames, "window closed");
}

/// Format an event line into the debug log.
fn push_event(
    log: &mut DebugLog,
    args: core::fmt::Arguments<'_>,
) {
    let mut line: heapless::String<LOG_LINE_LENGTH> = heapless::String::new();
    // Overlong lines are cut short
    line.write_fmt(args).ok();
    log.push(&line);
}

fn log_hover<R: RandomSource>(
    dashboard: &DashboardComposer<R>,
    log: &mut DebugLog,
) {
    if let Some(item) = dashboard.dock().hovered() {
        push_event(log, format_args!("Dock: {}", item.label));
    }
}
