//! Widget components of the dashboard.
//!
//! - [`panel`]: Glass container shared by the terminal, vitals and dock
//! - [`gauge`]: Circular gauge ring drawing
//! - [`vitals`]: CPU/memory panel owning a metric simulator
//! - [`terminal`]: Boot log panel owning a boot sequence player
//! - [`orb`]: Central breathing orb
//! - [`dock`]: Bottom navigation dock with hover highlight
//! - [`status`]: Top status bar
//!
//! Every draw function is generic over `DrawTarget<Color = Rgb565>` and takes
//! an entrance `offset` plus a `visibility` in `[0, 1]` computed by the
//! [`dashboard`](crate::dashboard) composer. Stateful widgets own their timers;
//! nothing is shared between instances.

pub mod dock;
pub mod gauge;
pub mod orb;
pub mod panel;
pub mod status;
pub mod terminal;
pub mod vitals;

pub use dock::{DOCK_ITEMS, Dock, DockIcon, DockItem};
pub use gauge::draw_gauge;
pub use orb::{OrbFrame, draw_orb};
pub use panel::PanelShell;
pub use status::draw_status_bar;
pub use terminal::TerminalWindow;
pub use vitals::SystemVitals;
