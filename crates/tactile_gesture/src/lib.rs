//! Tactile Gesture Engine
//!
//! This crate turns raw pointer input into drag notifications and named
//! gestures:
//!
//! - **Pointer sessions**: one start/move/end/cancel lifecycle for mouse and
//!   touch input, with offsets from the start position
//! - **Gesture sessions**: per-finger tracking for multi-touch interactions
//! - **Gesture rules**: an ordered table of directional, multi-finger and
//!   pinch rules evaluated when a gesture session ends
//!
//! # Architecture
//!
//! ```text
//! Host input (RawInputEvent)
//!     ↓ HeadlessHost::dispatch / Host listeners
//! Session (PointerSession / GestureSession)
//!     ↓ on end
//! GestureRuleSet::classify
//!     ↓
//! EventEmitter ("end", "up", "two down", "pinch", "gesture", ...)
//! ```
//!
//! # Example
//!
//! ```rust
//! use tactile_gesture::prelude::*;
//!
//! let mut host = HeadlessHost::new();
//! let mut session = PointerSession::new(DeviceClass::Desktop);
//! let log = EventLog::recording(session.emitter_mut());
//! session.attach(&mut host);
//!
//! let at = |kind, x, y| RawInputEvent::mouse(kind, PointerCoords::page(x, y));
//! host.dispatch(&mut session, ListenTarget::Element, &mut at(InputEventKind::MouseDown, 0.0, 0.0));
//! host.dispatch(&mut session, ListenTarget::Capture, &mut at(InputEventKind::MouseMove, 12.0, 4.0));
//! host.dispatch(&mut session, ListenTarget::Capture, &mut at(InputEventKind::MouseUp, 12.0, 4.0));
//!
//! assert_eq!(log.names(), vec!["start", "move", "end"]);
//! ```

pub mod contact;
pub mod emitter;
pub mod gesture;
pub mod host;
pub mod pointer;
pub mod rules;
pub mod session;


pub use contact::{Contact, TAP};
pub use emitter::{EventCallback, EventEmitter, EventLog, SessionEvent};
pub use gesture::GestureSession;
pub use host::{
    Clock, HandlerRole, HeadlessHost, Host, Listener, ListenerSet, ManualClock, SystemClock,
    Timestamp,
};
pub use pointer::PointerSession;
pub use rules::{Direction, Fingers, GestureRule, GestureRuleSet, RuleKind, THRESHOLD};
pub use session::Session;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::contact::Contact;
    pub use crate::emitter::{EventEmitter, EventLog, SessionEvent};
    pub use crate::gesture::GestureSession;
    pub use crate::host::{HandlerRole, HeadlessHost, Host, Listener, ManualClock};
    pub use crate::pointer::PointerSession;
    pub use crate::rules::{GestureRule, GestureRuleSet};
    pub use crate::session::Session;
    pub use tactile_platform::prelude::*;
}
