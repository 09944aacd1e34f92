// app/mod.rs - Application State Module
//
// UI-independent state: the region selector, the parsed capture request
// and the timed run that drives captures.

mod run;
mod selection;
mod state;

pub use run::{settle_delay, CaptureRun, StartTimers};
pub use selection::{Region, RegionSelector, ScreenPoint};
pub use state::{CaptureRequest, StartError};
