// app/state.rs - Capture Configuration
//
// Turns the raw text of the main window's fields into a validated
// capture request. Validation is deliberately thin: interval and count
// must be integers and the region must parse; nothing else is checked.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::selection::Region;

/// Reasons the Start button can refuse to launch a run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("Interval must be a whole number of seconds, got {0:?}")]
    InvalidInterval(String),

    #[error("Shot count must be a whole number, got {0:?}")]
    InvalidCount(String),

    #[error("Region must look like x1,y1,x2,y2, got {0:?}")]
    InvalidRegion(String),
}

/// Everything a capture run needs, parsed and frozen at Start time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Directory screenshots are written to (not checked for existence)
    pub save_dir: PathBuf,
    /// Normalized region, or `None` for the whole primary display
    pub region: Option<Region>,
    /// Seconds between two captures
    pub interval_secs: u64,
    /// Number of captures in the run
    pub count: u64,
    /// Hide the main window while the run is going
    pub hide_window: bool,
}

impl CaptureRequest {
    /// Parse the main window's fields.
    ///
    /// Interval is checked first, then count, then region, so the first
    /// bad field is the one reported.
    pub fn from_inputs(
        save_path: &str,
        region: &str,
        interval: &str,
        count: &str,
        hide_window: bool,
    ) -> Result<Self, StartError> {
        let interval_secs = interval
            .trim()
            .parse::<u64>()
            .map_err(|_| StartError::InvalidInterval(interval.to_string()))?;
        let count = count
            .trim()
            .parse::<u64>()
            .map_err(|_| StartError::InvalidCount(count.to_string()))?;
        let region = Region::parse_optional(region)?.map(Region::normalized);

        Ok(Self {
            save_dir: PathBuf::from(save_path),
            region,
            interval_secs,
            count,
            hide_window,
        })
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
