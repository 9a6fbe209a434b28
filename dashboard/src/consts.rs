//! Shared constants for the dashboard card.

// ── Layout ──────────────────────────────────────────────────────

/// Fixed width of the dashboard card.
pub const CARD_WIDTH_PX: u32 = 900;

/// Width of each metric tile.
pub const TILE_WIDTH_PX: u32 = 260;

/// Width of each analysis panel.
pub const PANEL_WIDTH_PX: u32 = 420;

// ── Bars ────────────────────────────────────────────────────────

/// Linear scale from a wasted-food value to a bar width percentage.
/// A value of 600 fills the bar.
pub const BAR_SCALE_DIVISOR: f64 = 6.0;

// ── Images ──────────────────────────────────────────────────────

/// Placeholder for the "Top Loss Reasons" chart.
pub const CHART_PLACEHOLDER_URL: &str = "https://tools-api.webcrumbs.org/image-placeholder/400/280/chart/1";

/// Chart image box, in pixels.
pub const CHART_WIDTH_PX: u32 = 400;
pub const CHART_HEIGHT_PX: u32 = 280;

/// Photo thumbnail box, in pixels.
pub const PHOTO_WIDTH_PX: u32 = 180;
pub const PHOTO_HEIGHT_PX: u32 = 120;

// ── Text ────────────────────────────────────────────────────────

pub const TITLE: &str = "Food Waste Dashboard";

/// Hardcoded trend banner. There is no trend computation behind it.
pub const TREND_BANNER: &str = "Chicken Waste From overproduction has been increasing for 7 Days.";

/// Material Symbols ligature shown in the banner.
pub const TREND_ICON: &str = "trending_up";
