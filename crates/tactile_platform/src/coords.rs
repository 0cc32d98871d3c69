//! Page coordinate resolution
//!
//! Hosts report pointer positions in different shapes: touch events nest
//! them in touch lists, most events carry page coordinates, and some only
//! carry viewport coordinates. [`CoordinateResolver`] folds all of these into
//! a single page-relative [`PagePoint`].

use serde::{Deserialize, Serialize};

use crate::document::DocumentView;
use crate::input::{PointerCoords, RawInputEvent};

/// A position in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PagePoint {
    pub x: f32,
    pub y: f32,
}

impl PagePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Resolves page coordinates against a document snapshot
#[derive(Clone, Copy, Debug)]
pub struct CoordinateResolver<'a> {
    document: &'a DocumentView,
}

impl<'a> CoordinateResolver<'a> {
    pub fn new(document: &'a DocumentView) -> Self {
        Self { document }
    }

    /// Resolve the page position of an event
    ///
    /// When the event carries a target-touch list its first entry stands in
    /// for the event.
    pub fn resolve(&self, event: &RawInputEvent) -> PagePoint {
        let coords = match event.target_touches.as_deref() {
            Some([first, ..]) => first,
            Some([]) => {
                tracing::warn!(
                    "{} carried an empty target touch list, using event coordinates",
                    event.kind
                );
                &event.coords
            }
            None => &event.coords,
        };
        self.resolve_point(coords)
    }

    /// Resolve the page position of a single pointer or touch point
    ///
    /// Reported page coordinates win; otherwise the viewport position is
    /// shifted by the scroll offset of the document's scrolling element.
    pub fn resolve_point(&self, coords: &PointerCoords) -> PagePoint {
        if let Some((x, y)) = coords.page_position() {
            return PagePoint::new(x, y);
        }
        let scroll = self.document.scroll_reference();
        PagePoint::new(coords.client_x + scroll.left, coords.client_y + scroll.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CompatMode;
    use crate::input::InputEventKind;

    #[test]
    fn test_page_coordinates_pass_through() {
        let doc = DocumentView::default().with_root_scroll(100.0, 100.0);
        let event = RawInputEvent::mouse(InputEventKind::MouseMove, PointerCoords::page(12.0, 34.0));
        assert_eq!(
            CoordinateResolver::new(&doc).resolve(&event),
            PagePoint::new(12.0, 34.0)
        );
    }

    #[test]
    fn test_client_plus_root_scroll() {
        let doc = DocumentView::default().with_root_scroll(30.0, 250.0);
        let event = RawInputEvent::mouse(InputEventKind::MouseDown, PointerCoords::client(10.0, 20.0));
        assert_eq!(
            CoordinateResolver::new(&doc).resolve(&event),
            PagePoint::new(40.0, 270.0)
        );
    }

    #[test]
    fn test_quirks_mode_uses_body_scroll() {
        let doc = DocumentView::default()
            .with_compat_mode(CompatMode::Quirks)
            .with_root_scroll(30.0, 250.0)
            .with_body_scroll(7.0, 9.0);
        let event = RawInputEvent::mouse(InputEventKind::MouseDown, PointerCoords::client(10.0, 20.0));
        assert_eq!(
            CoordinateResolver::new(&doc).resolve(&event),
            PagePoint::new(17.0, 29.0)
        );
    }

    #[test]
    fn test_first_target_touch_wins() {
        let doc = DocumentView::default().with_root_scroll(0.0, 50.0);
        let event = RawInputEvent::mouse(InputEventKind::TouchStart, PointerCoords::page(999.0, 999.0))
            .with_target_touches([PointerCoords::client(1.0, 2.0), PointerCoords::page(8.0, 8.0)]);
        assert_eq!(
            CoordinateResolver::new(&doc).resolve(&event),
            PagePoint::new(1.0, 52.0)
        );
    }

    #[test]
    fn test_empty_target_touches_falls_back_to_event() {
        let doc = DocumentView::default();
        let event = RawInputEvent::mouse(InputEventKind::TouchEnd, PointerCoords::page(4.0, 5.0))
            .with_target_touches([]);
        assert_eq!(
            CoordinateResolver::new(&doc).resolve(&event),
            PagePoint::new(4.0, 5.0)
        );
    }
}
