// app/selection.rs - Capture Region and Drag Selection
//
// A region is the rectangle handed to the capture engine. The selector is
// the two-state drag interaction that produces one from mouse events.

use std::fmt;
use std::str::FromStr;

use super::state::StartError;

/// A point in display units
pub type ScreenPoint = (i32, i32);

/// Rectangle on the primary display, stored as two corners
///
/// Corners come straight from the drag and may be in any order;
/// call [`Region::normalized`] before using it for a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Region {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a region from two arbitrary corners
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self::new(a.0, a.1, b.0, b.1)
    }

    /// Sort the corners so that `x1 <= x2` and `y1 <= y2`
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.abs_diff(self.x2)
    }

    pub fn height(&self) -> u32 {
        self.y1.abs_diff(self.y2)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Parse the region field: blank means "no region" (whole display)
    pub fn parse_optional(text: &str) -> Result<Option<Self>, StartError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        text.parse().map(Some)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}

impl FromStr for Region {
    type Err = StartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| StartError::InvalidRegion(s.to_string()))?;

        match parts.as_slice() {
            [x1, y1, x2, y2] => Ok(Self::new(*x1, *y1, *x2, *y2)),
            _ => Err(StartError::InvalidRegion(s.to_string())),
        }
    }
}

/// Drag-to-select state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionSelector {
    #[default]
    Idle,
    /// Overlay is up; corners fill in as mouse events arrive
    Drawing {
        anchor: Option<ScreenPoint>,
        current: Option<ScreenPoint>,
    },
}

impl RegionSelector {
    /// Enter drawing mode with no corners recorded
    pub fn begin(&mut self) {
        *self = Self::Drawing {
            anchor: None,
            current: None,
        };
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Mouse button went down: new anchor, previous endpoint forgotten
    pub fn press(&mut self, point: ScreenPoint) {
        if let Self::Drawing { anchor, current } = self {
            *anchor = Some(point);
            *current = None;
        }
    }

    /// Cursor moved. Returns true when the outline needs a redraw.
    pub fn move_to(&mut self, point: ScreenPoint) -> bool {
        match self {
            Self::Drawing {
                anchor: Some(_),
                current,
            } => {
                *current = Some(point);
                true
            }
            _ => false,
        }
    }

    /// Mouse button released: leave drawing mode.
    ///
    /// Returns the raw (unnormalized) region when the cursor moved after
    /// the press, `None` when the drag never started or never moved.
    pub fn release(&mut self, point: ScreenPoint) -> Option<Region> {
        let region = match *self {
            Self::Drawing {
                anchor: Some(anchor),
                current: Some(_),
            } => Some(Region::from_corners(anchor, point)),
            _ => None,
        };
        *self = Self::Idle;
        region
    }

    /// Abandon the drag without producing a region
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Rectangle to outline while drawing, once both corners exist
    pub fn outline(&self) -> Option<Region> {
        match *self {
            Self::Drawing {
                anchor: Some(anchor),
                current: Some(current),
            } => Some(Region::from_corners(anchor, current)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_orders_corners_for_any_drag_direction() {
        let drags = [
            (10, 20, 110, 220),
            (110, 220, 10, 20),
            (110, 20, 10, 220),
            (10, 220, 110, 20),
            (-50, 5, -60, -5),
        ];
        for (x1, y1, x2, y2) in drags {
            let r = Region::new(x1, y1, x2, y2).normalized();
            assert!(r.x1 <= r.x2, "{r:?}");
            assert!(r.y1 <= r.y2, "{r:?}");
            assert_eq!(r.width(), x1.abs_diff(x2));
            assert_eq!(r.height(), y1.abs_diff(y2));
        }
    }

    #[test]
    fn display_uses_comma_format() {
        assert_eq!(Region::new(0, 0, 99, 99).to_string(), "0,0,99,99");
        assert_eq!(Region::new(300, 40, -2, 7).to_string(), "300,40,-2,7");
    }

    #[test]
    fn parse_accepts_region_text() {
        assert_eq!("0,0,99,99".parse::<Region>(), Ok(Region::new(0, 0, 99, 99)));
        assert_eq!(" 5, 6 ,7,8 ".parse::<Region>(), Ok(Region::new(5, 6, 7, 8)));
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for bad in ["1,2,3", "1,2,3,4,5", "a,b,c,d", "1;2;3;4"] {
            assert!(
                matches!(bad.parse::<Region>(), Err(StartError::InvalidRegion(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn blank_region_text_means_no_region() {
        assert_eq!(Region::parse_optional(""), Ok(None));
        assert_eq!(Region::parse_optional("   "), Ok(None));
        assert_eq!(
            Region::parse_optional("1,2,3,4"),
            Ok(Some(Region::new(1, 2, 3, 4)))
        );
    }

    #[test]
    fn full_drag_produces_raw_region() {
        let mut selector = RegionSelector::default();
        selector.begin();
        selector.press((200, 150));
        assert!(selector.move_to((120, 90)));
        assert_eq!(selector.outline(), Some(Region::new(200, 150, 120, 90)));

        let region = selector.release((100, 80));
        assert_eq!(region, Some(Region::new(200, 150, 100, 80)));
        assert_eq!(selector, RegionSelector::Idle);
        assert_eq!(selector.outline(), None);
    }

    #[test]
    fn no_outline_until_both_corners_exist() {
        let mut selector = RegionSelector::default();
        selector.begin();
        assert_eq!(selector.outline(), None);

        // moves before a press are ignored
        assert!(!selector.move_to((5, 5)));
        assert_eq!(selector.outline(), None);

        selector.press((10, 10));
        assert_eq!(selector.outline(), None);
    }

    #[test]
    fn press_clears_previous_endpoint() {
        let mut selector = RegionSelector::default();
        selector.begin();
        selector.press((0, 0));
        selector.move_to((50, 50));
        selector.press((20, 20));
        assert_eq!(
            selector,
            RegionSelector::Drawing {
                anchor: Some((20, 20)),
                current: None,
            }
        );
    }

    #[test]
    fn release_without_anchor_yields_nothing() {
        let mut selector = RegionSelector::default();
        selector.begin();
        assert_eq!(selector.release((40, 40)), None);
        assert!(!selector.is_drawing());
    }

    #[test]
    fn click_without_motion_yields_nothing() {
        let mut selector = RegionSelector::default();
        selector.begin();
        selector.press((10, 10));
        assert_eq!(selector.release((10, 10)), None);
        assert_eq!(selector, RegionSelector::Idle);
    }

    #[test]
    fn events_while_idle_are_ignored() {
        let mut selector = RegionSelector::default();
        selector.press((1, 1));
        assert!(!selector.move_to((2, 2)));
        assert_eq!(selector.release((3, 3)), None);
        assert_eq!(selector, RegionSelector::Idle);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut selector = RegionSelector::default();
        selector.begin();
        selector.press((1, 1));
        selector.move_to((9, 9));
        selector.cancel();
        assert_eq!(selector, RegionSelector::Idle);
    }
}
