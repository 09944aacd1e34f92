// capture/monitor.rs - Primary Monitor Capture via xcap
//
// xcap covers Windows, macOS and X11/Wayland behind one API, so there is
// a single engine instead of one file per platform. Region grabs take the
// whole primary monitor and crop, which keeps HiDPI scaling in one place.

use log::debug;
use xcap::Monitor;

use crate::app::Region;

use super::{crop_to_region, CaptureEngine, CaptureError, DisplayGeometry, Screenshot};

/// Capture engine backed by the primary monitor
#[derive(Debug, Default)]
pub struct MonitorCaptureEngine;

impl MonitorCaptureEngine {
    pub fn new() -> Self {
        Self
    }

    fn primary_monitor() -> Result<Monitor, CaptureError> {
        let monitors =
            Monitor::all().map_err(|e| CaptureError::MonitorEnumeration(e.to_string()))?;

        let mut fallback = None;
        for monitor in monitors {
            if monitor.is_primary().unwrap_or(false) {
                return Ok(monitor);
            }
            // If no monitor reports as primary, use the first one
            if fallback.is_none() {
                fallback = Some(monitor);
            }
        }
        fallback.ok_or(CaptureError::NoPrimaryMonitor)
    }

    fn geometry_of(monitor: &Monitor) -> Result<DisplayGeometry, CaptureError> {
        let failed = |e: xcap::XCapError| CaptureError::MonitorEnumeration(e.to_string());
        Ok(DisplayGeometry::new(
            monitor.x().map_err(failed)?,
            monitor.y().map_err(failed)?,
            monitor.width().map_err(failed)?,
            monitor.height().map_err(failed)?,
        ))
    }
}

impl CaptureEngine for MonitorCaptureEngine {
    fn display(&self) -> Result<DisplayGeometry, CaptureError> {
        Self::geometry_of(&Self::primary_monitor()?)
    }

    fn grab(&mut self, region: Option<Region>) -> Result<Screenshot, CaptureError> {
        let monitor = Self::primary_monitor()?;
        let image = monitor
            .capture_image()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        debug!("Grabbed primary monitor: {}x{}", image.width(), image.height());

        match region {
            Some(region) => {
                let display = Self::geometry_of(&monitor)?;
                crop_to_region(&image, region, &display)
            }
            None => Ok(image),
        }
    }
}
