// constants.rs - Application-wide Constants
//
// Centralized timings, dimensions and defaults so the UI and the
// scheduling code agree on the same numbers.

/// Timer values for the capture run
pub mod timing {
    /// Pause after hiding the main window before the first capture
    pub const SETTLE_DELAY_MS: u64 = 1000;
    /// Extra margin added to the blind window-restore deadline
    pub const RESTORE_MARGIN_MS: u64 = 500;
    /// How long the preview popup stays visible after an update
    pub const PREVIEW_VISIBLE_MS: u64 = 3000;
}

/// Preview popup dimensions
pub mod preview {
    /// Maximum thumbnail width in pixels
    pub const MAX_WIDTH: u32 = 150;
    /// Maximum thumbnail height in pixels
    pub const MAX_HEIGHT: u32 = 100;
    /// Distance from the right edge of the display to the popup's left edge
    pub const RIGHT_OFFSET: i32 = 170;
    /// Distance from the bottom edge of the display to the popup's top edge
    pub const BOTTOM_OFFSET: i32 = 120;
}

/// Region selector overlay
pub mod overlay {
    /// Opacity of the dimmed overlay while drawing
    pub const DIM_OPACITY: f32 = 0.3;
    /// Outline width of the selection rectangle
    pub const OUTLINE_WIDTH: f32 = 2.0;
}

/// Main window dimensions
pub mod window {
    /// Default window width
    pub const DEFAULT_WIDTH: f32 = 440.0;
    /// Default window height
    pub const DEFAULT_HEIGHT: f32 = 460.0;
    /// Initial window position
    pub const DEFAULT_X: f32 = 100.0;
    pub const DEFAULT_Y: f32 = 100.0;
}

/// File naming
pub mod files {
    /// chrono format for the timestamp part of a screenshot file name
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
    /// Prefix of every screenshot file name
    pub const PREFIX: &str = "screenshot_";
    /// Extension of every screenshot file name
    pub const EXTENSION: &str = "png";
}

/// Defaults for a fresh settings file
pub mod defaults {
    pub const INTERVAL_SECS: &str = "5";
    pub const SHOT_COUNT: &str = "10";
}
