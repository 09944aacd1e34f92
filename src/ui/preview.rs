// ui/preview.rs - Thumbnail Preview Popup
//
// Borderless, always-on-top window in the bottom-right corner of the
// primary display. It shows the latest thumbnail and is hidden again by a
// timer after every update.

use iced::widget::{container, image, text};
use iced::{window, Element, Length, Point, Size};

use shottimer::constants::preview;
use shottimer::Screenshot;

use super::theme;

/// Thumbnail ready for display
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub handle: image::Handle,
    pub size: Size,
}

impl PreviewImage {
    pub fn from_thumbnail(thumbnail: Screenshot) -> Self {
        let (width, height) = thumbnail.dimensions();
        Self {
            handle: image::Handle::from_rgba(width, height, thumbnail.into_raw()),
            size: Size::new(width as f32, height as f32),
        }
    }
}

/// Top-left corner of the popup, anchored to the monitor's bottom-right
fn corner_position(_window: Size, monitor: Size) -> Point {
    Point::new(
        (monitor.width - preview::RIGHT_OFFSET as f32).max(0.0),
        (monitor.height - preview::BOTTOM_OFFSET as f32).max(0.0),
    )
}

/// Settings for opening the popup around its first thumbnail
pub fn window_settings(size: Size) -> window::Settings {
    window::Settings {
        size,
        position: window::Position::SpecificWith(corner_position),
        decorations: false,
        transparent: true,
        resizable: false,
        level: window::Level::AlwaysOnTop,
        visible: true,
        ..Default::default()
    }
}

pub fn view<'a, Message: 'a>(current: Option<&PreviewImage>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match current {
        Some(preview) => image(preview.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(text("")).into(),
    };

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(theme::preview_frame)
        .into()
}
