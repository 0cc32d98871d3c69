//! Tactile Platform Layer
//!
//! This crate provides the platform-agnostic input model consumed by the
//! gesture engine: raw pointer events as a host delivers them, the document
//! view needed to turn viewport coordinates into page coordinates, and the
//! coordinate resolver itself.
//!
//! # Architecture
//!
//! ```text
//! Host input (mousedown, touchmove, ...)
//!     ↓
//! RawInputEvent (touch lists, page/client coordinates)
//!     ↓
//! CoordinateResolver (+ DocumentView scroll state)
//!     ↓
//! PagePoint
//! ```
//!
//! # Example
//!
//! ```rust
//! use tactile_platform::*;
//!
//! let document = DocumentView::default().with_root_scroll(0.0, 120.0);
//! let event = RawInputEvent::mouse(InputEventKind::MouseDown, PointerCoords::client(10.0, 20.0));
//!
//! let page = CoordinateResolver::new(&document).resolve(&event);
//! assert_eq!(page, PagePoint::new(10.0, 140.0));
//! ```

mod coords;
mod document;
mod error;
mod input;

// Re-export all public types
pub use coords::{CoordinateResolver, PagePoint};
pub use document::{CompatMode, DocumentView, ScrollOffset};
pub use error::{PlatformError, Result};
pub use input::{
    DeviceClass, InputEventKind, InputModality, ListenTarget, PointerCoords, RawInputEvent,
    TouchList,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::{CoordinateResolver, PagePoint};
    pub use crate::document::{CompatMode, DocumentView, ScrollOffset};
    pub use crate::error::{PlatformError, Result};
    pub use crate::input::{
        DeviceClass, InputEventKind, InputModality, ListenTarget, PointerCoords, RawInputEvent,
        TouchList,
    };
}
