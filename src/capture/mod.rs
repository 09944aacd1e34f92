// capture/mod.rs - Screen Capture Module
//
// One capture is: grab the screen, save a PNG, publish it to the
// clipboard, shrink it into a preview thumbnail. Each step lives in its
// own submodule; the engine and clipboard sit behind traits so the
// pipeline can run against fakes in tests.

pub mod clipboard;
pub mod file;
pub mod monitor;
pub mod pipeline;
pub mod thumbnail;

use std::path::PathBuf;

use thiserror::Error;

use crate::app::{Region, ScreenPoint};

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use monitor::MonitorCaptureEngine;
pub use pipeline::{perform_capture_at, CaptureOutcome};

/// An RGBA bitmap produced by one grab
pub type Screenshot = image::RgbaImage;

/// Pixel rectangle inside a grabbed image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Position and size of the primary display, in the capture backend's units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DisplayGeometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Region covering the whole display
    pub fn full_region(&self) -> Region {
        Region::new(
            self.x,
            self.y,
            self.x + self.width as i32,
            self.y + self.height as i32,
        )
    }

    /// Map a point on a surface covering the display (e.g. the selector
    /// overlay, sized in logical pixels) into display units
    pub fn map_from_surface(&self, x: f32, y: f32, surface_width: f32, surface_height: f32) -> ScreenPoint {
        let sx = scale(self.width, surface_width);
        let sy = scale(self.height, surface_height);
        (
            self.x + (x * sx).round() as i32,
            self.y + (y * sy).round() as i32,
        )
    }

    /// Inverse of [`DisplayGeometry::map_from_surface`]
    pub fn map_to_surface(&self, point: ScreenPoint, surface_width: f32, surface_height: f32) -> (f32, f32) {
        let sx = scale(self.width, surface_width);
        let sy = scale(self.height, surface_height);
        (
            (point.0 - self.x) as f32 / sx,
            (point.1 - self.y) as f32 / sy,
        )
    }
}

fn scale(display: u32, surface: f32) -> f32 {
    if surface > 0.0 && display > 0 {
        display as f32 / surface
    } else {
        1.0
    }
}

/// Errors that end a capture (and with it the current run)
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("No primary monitor found")]
    NoPrimaryMonitor,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error("Region {0} does not cover any pixels of the display")]
    EmptyRegion(Region),

    #[error("Failed to save {}: {source}", .path.display())]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),
}

/// Trait for screen grabbing backends
pub trait CaptureEngine {
    /// Geometry of the primary display
    fn display(&self) -> Result<DisplayGeometry, CaptureError>;

    /// Grab the given region of the primary display, or all of it
    fn grab(&mut self, region: Option<Region>) -> Result<Screenshot, CaptureError>;
}

/// Create the capture engine for this platform
pub fn create_capture_engine() -> Box<dyn CaptureEngine> {
    Box::new(MonitorCaptureEngine::new())
}

/// Translate a region in display units into pixels of a full-display image.
///
/// The image may be larger than the display geometry (HiDPI backends grab
/// physical pixels), so coordinates are scaled by the image/display ratio
/// and clamped to the image.
pub fn region_to_pixels(
    region: Region,
    display: &DisplayGeometry,
    image_size: (u32, u32),
) -> Result<CaptureRect, CaptureError> {
    let region = region.normalized();
    let sx = image_size.0 as f64 / display.width.max(1) as f64;
    let sy = image_size.1 as f64 / display.height.max(1) as f64;

    let to_px = |value: i32, origin: i32, factor: f64, limit: u32| -> u32 {
        let px = ((value as i64 - origin as i64) as f64 * factor).round();
        px.clamp(0.0, limit as f64) as u32
    };

    let left = to_px(region.x1, display.x, sx, image_size.0);
    let right = to_px(region.x2, display.x, sx, image_size.0);
    let top = to_px(region.y1, display.y, sy, image_size.1);
    let bottom = to_px(region.y2, display.y, sy, image_size.1);

    if right <= left || bottom <= top {
        return Err(CaptureError::EmptyRegion(region));
    }

    Ok(CaptureRect::new(left, top, right - left, bottom - top))
}

/// Cut a region out of a full-display grab
pub fn crop_to_region(
    image: &Screenshot,
    region: Region,
    display: &DisplayGeometry,
) -> Result<Screenshot, CaptureError> {
    let rect = region_to_pixels(region, display, image.dimensions())?;
    Ok(image::imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image())
}
