// ui/mod.rs - iced User Interface Components
//
// Widgets and window settings shared by the application's three windows:
// the main form, the region selector overlay and the preview popup.

pub mod preview;
pub mod selector;
pub mod theme;

pub use preview::PreviewImage;
pub use selector::{SelectorEvent, SelectorOverlay};
