//! ShotTimer - Interval Screenshot Library
//!
//! Everything that does not need a window lives here: region math, the
//! capture pipeline, run scheduling and settings persistence. The iced
//! front end in `main.rs` drives it.

pub mod app;
pub mod capture;
pub mod constants;
pub mod settings;

// Re-export commonly used types
pub use app::{
    CaptureRequest, CaptureRun, Region, RegionSelector, ScreenPoint, StartError, StartTimers,
};
pub use capture::{CaptureEngine, CaptureError, CaptureRect, DisplayGeometry, Screenshot};
pub use settings::Settings;
