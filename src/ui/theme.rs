// ui/theme.rs - ShotTimer Visual Theme
//
// Dark palette and the few widget styles shared by the windows.

use iced::theme::Palette;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

/// Color palette (modern dark theme)
pub mod colors {
    use iced::Color;

    pub const BG_PRIMARY: Color = Color::from_rgb(0.09, 0.09, 0.12);
    pub const BG_SECONDARY: Color = Color::from_rgb(0.12, 0.12, 0.16);
    pub const BG_HOVER: Color = Color::from_rgb(0.18, 0.18, 0.24);

    pub const ACCENT: Color = Color::from_rgb(0.35, 0.55, 0.95);
    pub const ACCENT_HOVER: Color = Color::from_rgb(0.45, 0.65, 1.0);
    pub const SUCCESS: Color = Color::from_rgb(0.2, 0.75, 0.45);
    pub const SUCCESS_HOVER: Color = Color::from_rgb(0.25, 0.85, 0.55);
    pub const DANGER: Color = Color::from_rgb(0.9, 0.3, 0.35);

    pub const TEXT_PRIMARY: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.95);
    pub const TEXT_SECONDARY: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.6);
    pub const TEXT_MUTED: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.4);

    pub const BORDER: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.1);

    /// Selection outline drawn on the overlay
    pub const OUTLINE: Color = Color::from_rgb(1.0, 0.0, 0.0);
}

/// Dark theme with a see-through window background, for the overlay and popup
pub fn transparent() -> Theme {
    Theme::custom(
        "ShotTimer Transparent".to_string(),
        Palette {
            background: Color::TRANSPARENT,
            ..Palette::DARK
        },
    )
}

/// Opaque background of the main window
pub fn window_panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_PRIMARY)),
        ..Default::default()
    }
}

/// Rounded box around a group of fields
pub fn section(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(colors::BG_SECONDARY)),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Secondary action (Browse, Desktop, region buttons)
pub fn secondary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered | button::Status::Pressed => colors::BG_HOVER,
        _ => colors::BG_SECONDARY,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: colors::TEXT_PRIMARY,
        border: Border {
            color: colors::ACCENT,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

/// The big Start button
pub fn start_button(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered | button::Status::Pressed => colors::SUCCESS_HOVER,
        _ => colors::SUCCESS,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: Color::WHITE,
        border: Border {
            radius: 10.0.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color: Color::from_rgba(0.2, 0.75, 0.45, 0.4),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 16.0,
        },
    }
}

/// Transparent frame around the preview thumbnail
pub fn preview_frame(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        border: Border {
            color: colors::ACCENT_HOVER,
            width: 1.0,
            radius: 4.0.into(),
        },
        ..Default::default()
    }
}
