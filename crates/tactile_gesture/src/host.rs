//! Host capabilities consumed by sessions
//!
//! Sessions never talk to a windowing system directly. Everything they need
//! from the outside world goes through the [`Host`] trait:
//!
//! - listener registration on the element or the capture context
//! - text-selection suppression while a drag is in progress
//! - the document view used to resolve page coordinates
//! - the current time
//!
//! [`HeadlessHost`] is an in-process implementation that also routes raw
//! events to whichever session handler is subscribed for them.
//!
//! # Example
//!
//! ```rust
//! use tactile_gesture::prelude::*;
//!
//! let mut host = HeadlessHost::new();
//! let mut session = PointerSession::new(DeviceClass::Desktop);
//! session.attach(&mut host);
//!
//! let mut down = RawInputEvent::mouse(InputEventKind::MouseDown, PointerCoords::page(0.0, 0.0));
//! host.dispatch(&mut session, ListenTarget::Element, &mut down);
//! assert!(session.is_active());
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tactile_platform::{DocumentView, InputEventKind, ListenTarget, RawInputEvent};

use crate::session::Session;

/// Point in time, measured from the host clock's origin
pub type Timestamp = Duration;

// =========================================================================
// Clocks
// =========================================================================

/// Source of session timestamps
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Monotonic wall clock starting at construction
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep a handle after giving
/// one to a host.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward, saturating at `Duration::MAX`
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Jump to an absolute time
    pub fn set(&self, to: Timestamp) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

// =========================================================================
// Listeners
// =========================================================================

/// Which session handler a listener invokes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerRole {
    Start,
    Move,
    End,
}

/// A registered (target, event, handler) triple
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Listener {
    pub target: ListenTarget,
    pub kind: InputEventKind,
    pub role: HandlerRole,
}

impl Listener {
    pub fn new(target: ListenTarget, kind: InputEventKind, role: HandlerRole) -> Self {
        Self { target, kind, role }
    }
}

/// Registered listeners in subscription order
///
/// Subscribing the same listener twice keeps a single entry, matching how
/// hosts deduplicate identical handler registrations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener. Returns false if it was already present.
    pub fn insert(&mut self, listener: Listener) -> bool {
        if self.listeners.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Remove a listener. Returns false if it was not present.
    pub fn remove(&mut self, listener: &Listener) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l != listener);
        self.listeners.len() != before
    }

    pub fn contains(&self, listener: &Listener) -> bool {
        self.listeners.contains(listener)
    }

    /// Handler subscribed for an event kind on a target
    pub fn role_for(&self, target: ListenTarget, kind: InputEventKind) -> Option<HandlerRole> {
        self.listeners
            .iter()
            .find(|l| l.target == target && l.kind == kind)
            .map(|l| l.role)
    }

    /// Listeners registered on one target
    pub fn on_target(&self, target: ListenTarget) -> impl Iterator<Item = &Listener> + '_ {
        self.listeners.iter().filter(move |l| l.target == target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener> + '_ {
        self.listeners.iter()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

// =========================================================================
// Host
// =========================================================================

/// Capabilities a session needs from its host
pub trait Host {
    /// Register a listener
    fn subscribe(&mut self, listener: Listener);

    /// Remove a previously registered listener
    fn unsubscribe(&mut self, listener: Listener);

    /// Disable text and content selection for the duration of a drag
    fn suppress_selection(&mut self);

    /// Re-enable text and content selection
    fn restore_selection(&mut self);

    /// Current document snapshot for coordinate resolution
    fn document(&self) -> &DocumentView;

    /// Current time
    fn now(&self) -> Timestamp;
}

/// In-process host for a single session
///
/// Keeps listener registrations, tracks selection suppression, and routes
/// raw events to the subscribed session handler.
pub struct HeadlessHost {
    listeners: ListenerSet,
    selection_suppressed: bool,
    document: DocumentView,
    clock: Box<dyn Clock>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("listeners", &self.listeners)
            .field("selection_suppressed", &self.selection_suppressed)
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl HeadlessHost {
    /// Create a host with a default document and a system clock
    pub fn new() -> Self {
        Self {
            listeners: ListenerSet::new(),
            selection_suppressed: false,
            document: DocumentView::default(),
            clock: Box::new(SystemClock::default()),
        }
    }

    /// Use a specific document snapshot
    pub fn with_document(mut self, document: DocumentView) -> Self {
        self.document = document;
        self
    }

    /// Use a specific clock
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Currently registered listeners
    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    /// Whether a drag currently has selection disabled
    pub fn is_selection_suppressed(&self) -> bool {
        self.selection_suppressed
    }

    /// Mutable access to the document, e.g. to scroll between events
    pub fn document_mut(&mut self) -> &mut DocumentView {
        &mut self.document
    }

    /// Deliver a raw event dispatched at `target`
    ///
    /// Events dispatched at the element bubble to the capture context, so
    /// both may invoke a handler. Returns the number of handlers invoked.
    pub fn dispatch(
        &mut self,
        session: &mut dyn Session,
        target: ListenTarget,
        event: &mut RawInputEvent,
    ) -> usize {
        let path: &[ListenTarget] = match target {
            ListenTarget::Element => &[ListenTarget::Element, ListenTarget::Capture],
            ListenTarget::Capture => &[ListenTarget::Capture],
        };

        let mut invoked = 0;
        for &hop in path {
            if let Some(role) = self.listeners.role_for(hop, event.kind) {
                tracing::trace!("{} on {:?} -> {:?} handler", event.kind, hop, role);
                session.handle(role, self, event);
                invoked += 1;
            }
        }
        invoked
    }
}

impl Host for HeadlessHost {
    fn subscribe(&mut self, listener: Listener) {
        self.listeners.insert(listener);
    }

    fn unsubscribe(&mut self, listener: Listener) {
        self.listeners.remove(&listener);
    }

    fn suppress_selection(&mut self) {
        self.selection_suppressed = true;
    }

    fn restore_selection(&mut self) {
        self.selection_suppressed = false;
    }

    fn document(&self) -> &DocumentView {
        &self.document
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_listener() -> Listener {
        Listener::new(
            ListenTarget::Element,
            InputEventKind::TouchStart,
            HandlerRole::Start,
        )
    }

    #[test]
    fn test_listener_set_dedupes() {
        let mut set = ListenerSet::new();
        assert!(set.insert(start_listener()));
        assert!(!set.insert(start_listener()));
        assert_eq!(set.len(), 1);

        assert!(set.remove(&start_listener()));
        assert!(!set.remove(&start_listener()));
        assert!(set.is_empty());
    }

    #[test]
    fn test_role_lookup_is_target_scoped() {
        let mut set = ListenerSet::new();
        set.insert(start_listener());
        assert_eq!(
            set.role_for(ListenTarget::Element, InputEventKind::TouchStart),
            Some(HandlerRole::Start)
        );
        assert_eq!(
            set.role_for(ListenTarget::Capture, InputEventKind::TouchStart),
            None
        );
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let host = HeadlessHost::new().with_clock(clock.clone());
        assert_eq!(host.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(40));
        assert_eq!(host.now(), Duration::from_millis(40));

        clock.set(Duration::from_secs(2));
        assert_eq!(host.now(), Duration::from_secs(2));
    }

    #[test]
    fn test_manual_clock_saturates() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_millis(u64::MAX));
        clock.advance(Duration::MAX);
        assert_eq!(clock.now(), Duration::MAX);
    }

    #[test]
    fn test_selection_toggle() {
        let mut host = HeadlessHost::new();
        assert!(!host.is_selection_suppressed());
        host.suppress_selection();
        assert!(host.is_selection_suppressed());
        host.restore_selection();
        assert!(!host.is_selection_suppressed());
    }
}
