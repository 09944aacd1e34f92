//! File saving for screenshots.
//!
//! Names have one-second resolution: two captures inside the same second
//! map to the same path and the second one overwrites the first.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::ImageFormat;

use crate::constants::files;

use super::{CaptureError, Screenshot};

/// `screenshot_YYYYMMDD_HHMMSS.png` for the given moment
pub fn screenshot_file_name(at: &DateTime<Local>) -> String {
    format!(
        "{}{}.{}",
        files::PREFIX,
        at.format(files::TIMESTAMP_FORMAT),
        files::EXTENSION
    )
}

/// Full path of the screenshot taken at `at` inside `directory`
pub fn screenshot_path(directory: &Path, at: &DateTime<Local>) -> PathBuf {
    directory.join(screenshot_file_name(at))
}

/// Write `image` as PNG into `directory`, named after `at`.
///
/// The directory is not created or checked beforehand; a missing
/// directory surfaces as [`CaptureError::SaveFailed`].
pub fn save_screenshot_at(
    image: &Screenshot,
    directory: &Path,
    at: &DateTime<Local>,
) -> Result<PathBuf, CaptureError> {
    let path = screenshot_path(directory, at);
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| CaptureError::SaveFailed {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// The user's desktop directory, or `<home>/Desktop` when the platform
/// does not report one
pub fn desktop_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Desktop")))
        .unwrap_or_else(|| PathBuf::from("Desktop"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use image::Rgba;

    fn moment(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, h, m, s).unwrap()
    }

    #[test]
    fn file_name_has_second_resolution_timestamp() {
        assert_eq!(
            screenshot_file_name(&moment(7, 5, 3)),
            "screenshot_20240309_070503.png"
        );
    }

    #[test]
    fn same_second_names_collide() {
        let dir = Path::new("/shots");
        assert_eq!(
            screenshot_path(dir, &moment(12, 0, 0)),
            screenshot_path(dir, &moment(12, 0, 0))
        );
        assert_ne!(
            screenshot_path(dir, &moment(12, 0, 0)),
            screenshot_path(dir, &moment(12, 0, 1))
        );
    }

    #[test]
    fn saves_png_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let image = Screenshot::from_pixel(8, 6, Rgba([10, 20, 30, 255]));

        let path = save_screenshot_at(&image, dir.path(), &moment(9, 30, 0)).unwrap();
        assert_eq!(path, dir.path().join("screenshot_20240309_093000.png"));

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (8, 6));
        assert_eq!(loaded.get_pixel(3, 3), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn same_second_capture_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = Screenshot::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let second = Screenshot::from_pixel(2, 2, Rgba([0, 255, 0, 255]));

        save_screenshot_at(&first, dir.path(), &moment(1, 2, 3)).unwrap();
        let path = save_screenshot_at(&second, dir.path(), &moment(1, 2, 3)).unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(image::open(path).unwrap().to_rgba8().dimensions(), (2, 2));
    }

    #[test]
    fn missing_directory_fails_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let image = Screenshot::from_pixel(1, 1, Rgba([0, 0, 0, 255]));

        let result = save_screenshot_at(&image, &missing, &moment(0, 0, 0));
        assert!(matches!(result, Err(CaptureError::SaveFailed { .. })));
        assert!(!missing.exists());
    }

    #[test]
    fn desktop_dir_is_never_empty() {
        assert!(!desktop_dir().as_os_str().is_empty());
    }
}
