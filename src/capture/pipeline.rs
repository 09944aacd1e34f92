//! One capture, start to finish.
//!
//! Grab, save, copy, thumbnail. Every step needs the previous one to have
//! succeeded; the first failure is returned and nothing after it runs.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;

use crate::app::Region;

use super::{
    clipboard::ClipboardSink, file, thumbnail, CaptureEngine, CaptureError, Screenshot,
};

/// What a successful capture leaves behind
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    /// Where the PNG was written
    pub path: PathBuf,
    /// Scaled copy for the preview popup
    pub thumbnail: Screenshot,
}

/// Capture once, naming the file after `at`
pub fn perform_capture_at(
    engine: &mut dyn CaptureEngine,
    clipboard: &mut dyn ClipboardSink,
    region: Option<Region>,
    save_dir: &Path,
    at: &DateTime<Local>,
) -> Result<CaptureOutcome, CaptureError> {
    let screenshot = engine.grab(region)?;

    let path = file::save_screenshot_at(&screenshot, save_dir, at)?;
    info!("Saved: {}", path.display());

    clipboard.publish(&screenshot)?;

    let thumbnail = thumbnail::make_thumbnail(&screenshot);
    Ok(CaptureOutcome { path, thumbnail })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{crop_to_region, DisplayGeometry};
    use chrono::TimeZone;
    use image::Rgba;

    struct FakeEngine {
        display: DisplayGeometry,
        grabs: usize,
    }

    impl CaptureEngine for FakeEngine {
        fn display(&self) -> Result<DisplayGeometry, CaptureError> {
            Ok(self.display)
        }

        fn grab(&mut self, region: Option<Region>) -> Result<Screenshot, CaptureError> {
            self.grabs += 1;
            let full = Screenshot::from_pixel(
                self.display.width,
                self.display.height,
                Rgba([0, 0, 255, 255]),
            );
            match region {
                Some(region) => crop_to_region(&full, region, &self.display),
                None => Ok(full),
            }
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        published: Vec<(u32, u32)>,
        fail: bool,
    }

    impl ClipboardSink for FakeClipboard {
        fn publish(&mut self, image: &Screenshot) -> Result<(), CaptureError> {
            if self.fail {
                return Err(CaptureError::Clipboard("no clipboard".to_string()));
            }
            self.published.push(image.dimensions());
            Ok(())
        }
    }

    fn engine() -> FakeEngine {
        FakeEngine {
            display: DisplayGeometry::new(0, 0, 300, 200),
            grabs: 0,
        }
    }

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn region_capture_saves_copies_and_thumbnails() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine();
        let mut clipboard = FakeClipboard::default();

        let outcome = perform_capture_at(
            &mut engine,
            &mut clipboard,
            Some(Region::new(0, 0, 99, 99)),
            dir.path(),
            &noon(),
        )
        .unwrap();

        assert_eq!(outcome.path, dir.path().join("screenshot_20240601_120000.png"));
        assert!(outcome.path.exists());
        assert_eq!(clipboard.published, vec![(99, 99)]);
        assert_eq!(outcome.thumbnail.dimensions(), (100, 100));
    }

    #[test]
    fn no_region_captures_whole_display() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine();
        let mut clipboard = FakeClipboard::default();

        let outcome =
            perform_capture_at(&mut engine, &mut clipboard, None, dir.path(), &noon()).unwrap();

        let saved = image::open(&outcome.path).unwrap();
        assert_eq!((saved.width(), saved.height()), (300, 200));
        assert_eq!(clipboard.published, vec![(300, 200)]);
        assert_eq!(outcome.thumbnail.dimensions(), (150, 100));
    }

    #[test]
    fn save_failure_stops_before_clipboard() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine();
        let mut clipboard = FakeClipboard::default();

        let result = perform_capture_at(
            &mut engine,
            &mut clipboard,
            None,
            &dir.path().join("missing"),
            &noon(),
        );

        assert!(matches!(result, Err(CaptureError::SaveFailed { .. })));
        assert_eq!(engine.grabs, 1);
        assert!(clipboard.published.is_empty());
    }

    #[test]
    fn clipboard_failure_is_reported_after_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine();
        let mut clipboard = FakeClipboard {
            fail: true,
            ..Default::default()
        };

        let result = perform_capture_at(&mut engine, &mut clipboard, None, dir.path(), &noon());

        assert!(matches!(result, Err(CaptureError::Clipboard(_))));
        assert!(dir.path().join("screenshot_20240601_120000.png").exists());
    }

    #[test]
    fn empty_region_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine();
        let mut clipboard = FakeClipboard::default();

        let result = perform_capture_at(
            &mut engine,
            &mut clipboard,
            Some(Region::new(10, 10, 10, 50)),
            dir.path(),
            &noon(),
        );

        assert!(matches!(result, Err(CaptureError::EmptyRegion(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
