//! Color palette for the dashboard.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! The glass look of the dashboard relies on translucency, which Rgb565 cannot
//! express. Translucent surfaces are therefore pre-blended against [`BACKGROUND`]
//! and stored as opaque colors; fades are done with
//! [`mix_rgb565`](crate::animations::mix_rgb565) toward the background.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black (0, 0, 0).
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31).
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Surfaces
// =============================================================================

/// Deep navy page background.
pub const BACKGROUND: Rgb565 = Rgb565::new(0, 2, 3);

/// Glass panel fill (white at ~4% over the background).
pub const GLASS_FILL: Rgb565 = Rgb565::new(2, 5, 5);

/// Glass panel border (white at ~8% over the background).
pub const GLASS_BORDER: Rgb565 = Rgb565::new(4, 9, 7);

/// Brighter border for hovered dock items.
pub const GLASS_HIGHLIGHT: Rgb565 = Rgb565::new(8, 18, 12);

/// Unfilled part of a gauge ring (white at ~6%).
pub const GAUGE_TRACK: Rgb565 = Rgb565::new(3, 7, 6);

// =============================================================================
// Text
// =============================================================================

/// Primary text.
pub const GLASS_TEXT: Rgb565 = Rgb565::new(28, 57, 29);

/// Secondary/muted text (labels, neutral terminal lines).
pub const GLASS_MUTED: Rgb565 = Rgb565::new(18, 38, 21);

// =============================================================================
// Accents
// =============================================================================

/// Indigo accent (#6366f1). CPU gauge and orb body.
pub const INDIGO: Rgb565 = Rgb565::new(12, 25, 30);

/// Light indigo (#818cf8). Orb glow, highlighted terminal lines, cursor.
pub const ORB_GLOW: Rgb565 = Rgb565::new(16, 35, 31);

/// Dark indigo (#4338ca). Orb rim.
pub const INDIGO_DARK: Rgb565 = Rgb565::new(8, 14, 25);

/// Blue accent (#3b82f6). Memory gauge.
pub const BLUE: Rgb565 = Rgb565::new(7, 32, 30);

/// Emerald accent (#10b981). Success line, status dots.
pub const EMERALD: Rgb565 = Rgb565::new(2, 46, 16);

/// Rose accent (#f43f5e). Terminal close dot.
pub const ROSE: Rgb565 = Rgb565::new(30, 15, 11);

/// Amber (#eab308). Terminal minimize dot.
pub const AMBER: Rgb565 = Rgb565::new(29, 44, 1);

/// Debug page green.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Debug page yellow.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Debug page divider gray.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
