//! Debug/profiling page.
//!
//! Toggled with `Y` from the dashboard.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ DEBUG VIEW                              UP 00:12:34       50 FPS │
//! ├──────────────────────────────────────────────────────────────────┤
//! │ TIMING              │ EVENTS            │ WIDGETS                │
//! │ Frame:  20.0ms      │ Frames: 12847     │ Boot:   Finished 9/9   │
//! │ Render: 1.2ms       │ Lines:  9         │ Vitals: running        │
//! │ Sleep:  18.8ms      │ Vitals: 42        │ Ticks:  43 (0 failed)  │
//! │ Min:    19.8ms      │                   │ CPU:    27%            │
//! │ Max:    25.1ms      │                   │ Memory: 55%            │
//! │ Avg:    20.1ms      │                   │ Hover:  Vitals         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │ > Dashboard started                                              │
//! │ > Page: Debug                                                    │
//! │ > _                                                              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::{
    boot::PlayerState,
    colors::{BLACK, GRAY, GREEN, ORB_GLOW, WHITE, YELLOW},
    config::{SCREEN_HEIGHT, SCREEN_WIDTH},
    dashboard::DashboardStatus,
    profiling::{DebugLog, ProfilingMetrics},
    styles::{LABEL_FONT, TITLE_STYLE},
};

// =============================================================================
// Layout Constants
// =============================================================================

/// Header text baseline.
const HEADER_Y: i32 = 24;

const HEADER_DIVIDER_Y: i32 = 34;

const SECTION_HEADER_Y: i32 = 54;

/// First stats baseline.
const STATS_Y: i32 = 74;

const STAT_LINE_HEIGHT: i32 = 16;

const LOG_DIVIDER_Y: i32 = 190;

const LOG_Y: i32 = 210;

const LOG_LINE_HEIGHT: i32 = 14;

const COL1_X: i32 = 12;
const COL2_X: i32 = 270;
const COL3_X: i32 = 530;

// =============================================================================
// Colors
// =============================================================================

const DEBUG_BG: Rgb565 = BLACK;
const HEADER_COLOR: Rgb565 = GREEN;
const SECTION_COLOR: Rgb565 = GRAY;
const VALUE_COLOR: Rgb565 = WHITE;
/// Min/max/avg and failure counts.
const HIGHLIGHT_COLOR: Rgb565 = YELLOW;
const LOG_PROMPT_COLOR: Rgb565 = GREEN;
const LOG_TEXT_COLOR: Rgb565 = ORB_GLOW;
const DIVIDER_COLOR: Rgb565 = GRAY;

/// Terminal area fill (very dark green tint).
const LOG_BG: Rgb565 = Rgb565::new(1, 2, 1);

// =============================================================================
// Debug Page Drawing
// =============================================================================

/// Draw the debug page.
pub fn draw_debug_page<D>(
    display: &mut D,
    metrics: &ProfilingMetrics,
    status: &DashboardStatus,
    log: &DebugLog,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(DEBUG_BG).ok();

    draw_header(display, metrics);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);

    let section_style = MonoTextStyle::new(LABEL_FONT, SECTION_COLOR);
    for (title, x) in [("TIMING", COL1_X), ("EVENTS", COL2_X), ("WIDGETS", COL3_X)] {
        Text::new(title, Point::new(x, SECTION_HEADER_Y), section_style)
            .draw(display)
            .ok();
    }

    draw_timing_column(display, metrics);
    draw_events_column(display, metrics);
    draw_widgets_column(display, status);

    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, log);
}

fn draw_header<D>(
    display: &mut D,
    metrics: &ProfilingMetrics,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let title_style = MonoTextStyle::new(TITLE_STYLE.font, HEADER_COLOR);
    let info_style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);

    Text::new("DEBUG VIEW", Point::new(COL1_X, HEADER_Y), title_style)
        .draw(display)
        .ok();

    let mut uptime_str: String<24> = String::new();
    write!(uptime_str, "UP {}", metrics.uptime_string()).ok();
    Text::new(&uptime_str, Point::new(COL3_X, HEADER_Y), info_style)
        .draw(display)
        .ok();

    let mut fps_str: String<12> = String::new();
    write!(fps_str, "{:.0} FPS", metrics.fps()).ok();
    Text::new(&fps_str, Point::new(SCREEN_WIDTH as i32 - 80, HEADER_Y), info_style)
        .draw(display)
        .ok();
}

/// Draw one stat line per entry, top to bottom from [`STATS_Y`].
fn draw_lines<D>(
    display: &mut D,
    x: i32,
    lines: &[(String<32>, Rgb565)],
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut y = STATS_Y;
    for (text, color) in lines {
        Text::new(text, Point::new(x, y), MonoTextStyle::new(LABEL_FONT, *color))
            .draw(display)
            .ok();
        y += STAT_LINE_HEIGHT;
    }
}

fn line(args: core::fmt::Arguments<'_>) -> String<32> {
    let mut s = String::new();
    s.write_fmt(args).ok();
    s
}

fn draw_timing_column<D>(
    display: &mut D,
    metrics: &ProfilingMetrics,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let ms = |us: u32| us as f32 / 1000.0;
    let min_us = if metrics.frame_time_min_us == u32::MAX { 0 } else { metrics.frame_time_min_us };

    let lines = [
        (line(format_args!("Frame:  {:.1}ms", ms(metrics.frame_time_us))), VALUE_COLOR),
        (line(format_args!("Render: {:.1}ms", ms(metrics.render_time_us))), VALUE_COLOR),
        (line(format_args!("Sleep:  {:.1}ms", ms(metrics.sleep_time_us))), VALUE_COLOR),
        (line(format_args!("Min:    {:.1}ms", ms(min_us))), HIGHLIGHT_COLOR),
        (line(format_args!("Max:    {:.1}ms", ms(metrics.frame_time_max_us))), HIGHLIGHT_COLOR),
        (line(format_args!("Avg:    {:.1}ms", ms(metrics.frame_time_avg_us()))), HIGHLIGHT_COLOR),
    ];
    draw_lines(display, COL1_X, &lines);
}

fn draw_events_column<D>(
    display: &mut D,
    metrics: &ProfilingMetrics,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let lines = [
        (line(format_args!("Frames: {}", metrics.total_frames)), VALUE_COLOR),
        (line(format_args!("Lines:  {}", metrics.lines_revealed)), VALUE_COLOR),
        (line(format_args!("Vitals: {}", metrics.vitals_updates)), VALUE_COLOR),
    ];
    draw_lines(display, COL2_X, &lines);
}

fn draw_widgets_column<D>(
    display: &mut D,
    status: &DashboardStatus,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let failed_color = if status.failed_ticks > 0 { HIGHLIGHT_COLOR } else { VALUE_COLOR };
    let (cpu, memory) = status.latest.map_or((0, 0), |s| (s.cpu, s.memory));

    let lines = [
        (
            line(format_args!(
                "Boot:   {} {}/{}",
                player_state_name(status.boot_state),
                status.lines_revealed,
                status.lines_total
            )),
            VALUE_COLOR,
        ),
        (
            line(format_args!(
                "Vitals: {}",
                if status.vitals_running { "running" } else { "stopped" }
            )),
            VALUE_COLOR,
        ),
        (
            line(format_args!("Ticks:  {} ({} failed)", status.ticks, status.failed_ticks)),
            failed_color,
        ),
        (line(format_args!("CPU:    {cpu}%")), VALUE_COLOR),
        (line(format_args!("Memory: {memory}%")), VALUE_COLOR),
        (line(format_args!("Hover:  {}", status.hovered.unwrap_or("-"))), VALUE_COLOR),
    ];
    draw_lines(display, COL3_X, &lines);
}

const fn player_state_name(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Idle => "Idle",
        PlayerState::Playing => "Playing",
        PlayerState::Finished => "Finished",
        PlayerState::Cancelled => "Cancelled",
    }
}

fn draw_log_terminal<D>(
    display: &mut D,
    log: &DebugLog,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let prompt_style = MonoTextStyle::new(LABEL_FONT, LOG_PROMPT_COLOR);
    let text_style = MonoTextStyle::new(LABEL_FONT, LOG_TEXT_COLOR);

    Rectangle::new(
        Point::new(0, LOG_DIVIDER_Y + 2),
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - LOG_DIVIDER_Y as u32 - 2),
    )
    .into_styled(PrimitiveStyle::with_fill(LOG_BG))
    .draw(display)
    .ok();

    let mut y = LOG_Y;
    for entry in log.iter() {
        Text::new(">", Point::new(COL1_X, y), prompt_style).draw(display).ok();
        Text::new(entry, Point::new(COL1_X + 12, y), text_style)
            .draw(display)
            .ok();
        y += LOG_LINE_HEIGHT;
    }

    Text::new("> _", Point::new(COL1_X, y), prompt_style).draw(display).ok();
}

fn draw_horizontal_line<D>(
    display: &mut D,
    y: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(Point::new(2, y), Point::new(SCREEN_WIDTH as i32 - 3, y))
        .into_styled(PrimitiveStyle::with_stroke(DIVIDER_COLOR, 1))
        .draw(display)
        .ok();
}
