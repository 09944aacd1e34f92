// ui/selector.rs - Region Selection Overlay
//
// Full-screen canvas laid over the primary display. It dims the desktop,
// turns mouse events into selector messages (in display units) and
// outlines the rectangle being dragged.

use iced::mouse;
use iced::widget::canvas::{self, event, Event, Frame, Geometry, Path, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use shottimer::constants::overlay;
use shottimer::{DisplayGeometry, RegionSelector, ScreenPoint};

use super::theme::colors;

/// Messages the overlay emits, already mapped into display units
#[derive(Debug, Clone, Copy)]
pub enum SelectorEvent {
    Pressed(ScreenPoint),
    Moved(ScreenPoint),
    Released(ScreenPoint),
}

/// Canvas program over the current selector state
pub struct SelectorOverlay<'a> {
    pub selector: &'a RegionSelector,
    /// Display the overlay covers; `None` maps overlay pixels 1:1
    pub display: Option<DisplayGeometry>,
}

impl SelectorOverlay<'_> {
    fn to_display(&self, position: Point, bounds: Size) -> ScreenPoint {
        match self.display {
            Some(display) => {
                display.map_from_surface(position.x, position.y, bounds.width, bounds.height)
            }
            None => (position.x.round() as i32, position.y.round() as i32),
        }
    }

    fn to_surface(&self, point: ScreenPoint, bounds: Size) -> Point {
        match self.display {
            Some(display) => {
                let (x, y) = display.map_to_surface(point, bounds.width, bounds.height);
                Point::new(x, y)
            }
            None => Point::new(point.0 as f32, point.1 as f32),
        }
    }
}

impl<Message> canvas::Program<Message> for SelectorOverlay<'_>
where
    Message: From<SelectorEvent>,
{
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        let Some(position) = cursor.position_in(bounds) else {
            return (event::Status::Ignored, None);
        };
        let point = self.to_display(position, bounds.size());

        let selector_event = match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                SelectorEvent::Pressed(point)
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => SelectorEvent::Moved(point),
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                SelectorEvent::Released(point)
            }
            _ => return (event::Status::Ignored, None),
        };

        (event::Status::Captured, Some(selector_event.into()))
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgba(0.2, 0.2, 0.2, overlay::DIM_OPACITY),
        );

        if let Some(region) = self.selector.outline() {
            let region = region.normalized();
            let top_left = self.to_surface((region.x1, region.y1), bounds.size());
            let bottom_right = self.to_surface((region.x2, region.y2), bounds.size());
            let outline = Path::rectangle(
                top_left,
                Size::new(bottom_right.x - top_left.x, bottom_right.y - top_left.y),
            );
            frame.stroke(
                &outline,
                Stroke::default()
                    .with_color(colors::OUTLINE)
                    .with_width(overlay::OUTLINE_WIDTH),
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        mouse::Interaction::Crosshair
    }
}
