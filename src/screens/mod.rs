//! Full-screen pages other than the dashboard itself.
//!
//! - **Debug Page** ([`debug`]): frame timing, widget state and the event log,
//!   toggled with `Y` at runtime

mod debug;

pub use debug::draw_debug_page;
