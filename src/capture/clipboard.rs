//! Clipboard publishing for screenshots.
//!
//! Uses the `arboard` crate for cross-platform clipboard access.

use std::borrow::Cow;

use arboard::{Clipboard, ImageData};
use log::info;

use super::{CaptureError, Screenshot};

/// Somewhere a finished screenshot can be published as "the current image"
pub trait ClipboardSink {
    /// Replace the clipboard's content with `image`
    fn publish(&mut self, image: &Screenshot) -> Result<(), CaptureError>;
}

/// The system clipboard
///
/// The handle is opened on first use and then kept: on X11 the clipboard
/// content is served by the process owning the handle, so dropping it after
/// each copy would drop the image with it.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard, CaptureError> {
        if self.clipboard.is_none() {
            let clipboard = Clipboard::new().map_err(|e| CaptureError::Clipboard(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| CaptureError::Clipboard("clipboard unavailable".to_string()))
    }
}

/// View an RGBA screenshot as clipboard image data without copying pixels
pub fn to_image_data(image: &Screenshot) -> ImageData<'_> {
    ImageData {
        width: image.width() as usize,
        height: image.height() as usize,
        bytes: Cow::Borrowed(image.as_raw()),
    }
}

impl ClipboardSink for SystemClipboard {
    fn publish(&mut self, image: &Screenshot) -> Result<(), CaptureError> {
        self.handle()?
            .set_image(to_image_data(image))
            .map_err(|e| CaptureError::Clipboard(e.to_string()))?;
        info!("Image copied to clipboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    // Publishing to the real clipboard needs a desktop session, so only the
    // pixel conversion is covered here.

    #[test]
    fn image_data_borrows_rgba_pixels() {
        let image = Screenshot::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        let data = to_image_data(&image);
        assert_eq!(data.width, 3);
        assert_eq!(data.height, 2);
        assert_eq!(data.bytes.len(), 3 * 2 * 4);
        assert_eq!(&data.bytes[..4], &[1, 2, 3, 4]);
        assert!(matches!(data.bytes, Cow::Borrowed(_)));
    }
}
