//! Placement of the floating readout panel next to its parent view

use pv_core::{ScreenPoint, ViewBounds};

/// Default gap kept between the panel and the bottom of the screen
pub const SCREEN_MARGIN: f32 = 10.0;

/// Width and height of a screen-space box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Top-left corner for the readout panel.
///
/// The panel starts at the view's left edge, just below the view. It is
/// pulled left when it would run off the right of the screen and pulled up
/// (plus `margin`) when it would run off the bottom. The horizontal clamp to
/// zero happens before the overflow correction, and the overflow is measured
/// from the view's unclamped left edge.
pub fn place_panel(view: &ViewBounds, panel: Size, screen: Size, margin: f32) -> ScreenPoint {
    let loc = view.origin;

    let mut left = loc.x.max(0.0);
    if loc.x + panel.width > screen.width {
        left -= loc.x + panel.width - screen.width;
    }

    let mut top = loc.y + view.height;
    if top + panel.height > screen.height {
        top -= (top + panel.height - screen.height) + margin;
    }

    ScreenPoint::new(left, top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_at(x: f32, y: f32, height: f32) -> ViewBounds {
        ViewBounds {
            origin: ScreenPoint::new(x, y),
            width: 200.0,
            height,
        }
    }

    #[test]
    fn test_fits_below_view() {
        let pos = place_panel(&view_at(100.0, 50.0, 300.0), Size::new(150.0, 80.0), Size::new(1000.0, 800.0), SCREEN_MARGIN);
        assert_eq!(pos, ScreenPoint::new(100.0, 350.0));
    }

    #[test]
    fn test_right_overflow_shifts_left() {
        let pos = place_panel(&view_at(950.0, 0.0, 100.0), Size::new(100.0, 50.0), Size::new(1000.0, 800.0), SCREEN_MARGIN);
        assert_eq!(pos.x, 900.0);
        assert!(pos.x >= 0.0 && pos.x + 100.0 <= 1000.0);
    }

    #[test]
    fn test_bottom_overflow_adds_margin() {
        // Naive top is 700; bottom would be 815, 15 past the screen
        let naive = 700.0;
        let pos = place_panel(&view_at(0.0, 200.0, 500.0), Size::new(100.0, 115.0), Size::new(1000.0, 800.0), SCREEN_MARGIN);
        assert_eq!(naive - pos.y, 25.0);
    }

    #[test]
    fn test_clamp_then_overflow_combine() {
        // View partly off the left edge and a panel wider than the screen
        let pos = place_panel(&view_at(-50.0, 0.0, 10.0), Size::new(1100.0, 10.0), Size::new(1000.0, 800.0), SCREEN_MARGIN);
        // Clamped to 0, then overflow of (-50 + 1100 - 1000) = 50 subtracted
        assert_eq!(pos.x, -50.0);
    }

    #[test]
    fn test_negative_origin_clamped() {
        let pos = place_panel(&view_at(-30.0, 0.0, 10.0), Size::new(100.0, 10.0), Size::new(1000.0, 800.0), SCREEN_MARGIN);
        assert_eq!(pos.x, 0.0);
    }
}
