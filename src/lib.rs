// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::similar_names)] // cx/cy, bg_0/bg_60 in tests are clear
#![allow(clippy::module_name_repetitions)] // GaugeRenderer in gauge, DashboardComposer in dashboard

//! Jarvis: a decorative assistant dashboard.
//!
//! A single 800x480 scene rendered with `embedded-graphics`:
//! - A breathing orb with a pulsing `JARVIS ONLINE` caption
//! - A terminal panel that replays a scripted boot sequence
//! - Two circular gauges showing simulated CPU and memory load
//! - A status bar and an app dock with keyboard hover
//!
//! Nothing here reads real system state. Vitals come from an injected
//! [`random::RandomSource`]; every timer is polled with a millisecond reading
//! from a [`clock::Clock`], so the whole scene runs deterministically under
//! test.
//!
//! # Layers
//!
//! | Layer | Modules | Draws? |
//! |-------|---------|--------|
//! | Scheduling | [`clock`], [`timer`] | no |
//! | Models | [`gauge`], [`simulator`], [`boot`], [`random`] | no |
//! | Widgets | [`widgets`], [`animations`], [`styles`], [`colors`] | yes |
//! | Composition | [`dashboard`], [`screens`], [`pages`], [`profiling`] | yes |
//!
//! # Controls (window binary)
//!
//! | Key | Action |
//! |-----|--------|
//! | `Y` | Switch between Dashboard and Debug page |
//! | `Left` / `Right` | Move the dock hover |
//! | `R` | Replay the boot sequence |
//! | `Q` | Quit |
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ JARVIS DASHBOARD                ● ALL SYSTEMS NOMINAL│  32px
//! ├──────────────────────────────────────────────────────┤
//! │ ┌──────────┐                          ┌──────────┐   │
//! │ │ TERMINAL │         ( ORB )          │  VITALS  │   │
//! │ │ boot log │      JARVIS ONLINE       │ CPU  MEM │   │
//! │ └──────────┘                          └──────────┘   │
//! │                 ┌──────────────────┐                 │
//! │                 │  [] [] [] []     │ dock            │
//! └─────────────────┴──────────────────┴─────────────────┘
//! ```

pub mod animations;
pub mod boot;
pub mod clock;
pub mod colors;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod gauge;
pub mod pages;
pub mod profiling;
pub mod random;
pub mod screens;
pub mod simulator;
pub mod styles;
pub mod timer;
pub mod widgets;
