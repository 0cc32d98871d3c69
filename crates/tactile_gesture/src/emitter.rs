//! Session event emission
//!
//! Sessions publish [`SessionEvent`]s through an [`EventEmitter`] they own.
//! Consumers subscribe by event name (`"start"`, `"up"`, `"two down"`,
//! `"gesture"`, ...) or to every event at once.
//!
//! # Example
//!
//! ```rust
//! use tactile_gesture::prelude::*;
//!
//! let mut session = GestureSession::new(DeviceClass::TouchMobile);
//! session.emitter_mut().on("pinch", |event| {
//!     if let SessionEvent::Matched { contact, .. } = event {
//!         println!("pinch ended at {:?}", contact.end());
//!     }
//! });
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::contact::Contact;

/// Events published by pointer and gesture sessions
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum SessionEvent {
    /// A session started. Pointer sessions report no contacts.
    Start { contacts: Vec<Contact> },
    /// The pointer (or one contact) moved by this offset from its start
    Move { delta_x: f32, delta_y: f32 },
    /// A session that moved has finished
    End,
    /// A session finished without moving
    Cancel,
    /// A gesture rule matched a contact; published under the rule's name
    Matched { name: String, contact: Contact },
    /// Classification finished; carries every contact of the session
    Gesture { contacts: Vec<Contact> },
}

impl SessionEvent {
    /// The name subscribers use for this event
    pub fn name(&self) -> &str {
        match self {
            SessionEvent::Start { .. } => "start",
            SessionEvent::Move { .. } => "move",
            SessionEvent::End => "end",
            SessionEvent::Cancel => "cancel",
            SessionEvent::Matched { name, .. } => name.as_str(),
            SessionEvent::Gesture { .. } => "gesture",
        }
    }
}

/// Callback for session events
///
/// Uses Rc since UI is single-threaded.
pub type EventCallback = Rc<dyn Fn(&SessionEvent)>;

/// Named event handlers owned by a session
#[derive(Default, Clone)]
pub struct EventEmitter {
    handlers: FxHashMap<String, Vec<EventCallback>>,
    any: Vec<EventCallback>,
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("EventEmitter")
            .field("named", &names)
            .field("any", &self.any.len())
            .finish()
    }
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty() && self.any.is_empty()
    }

    /// Check if a handler is registered for an event name
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Register a handler for one event name
    pub fn on<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&SessionEvent) + 'static,
    {
        self.handlers
            .entry(name.into())
            .or_default()
            .push(Rc::new(handler));
    }

    /// Register a handler for every event
    pub fn on_any<F>(&mut self, handler: F)
    where
        F: Fn(&SessionEvent) + 'static,
    {
        self.any.push(Rc::new(handler));
    }

    /// Publish an event to its named handlers, then to catch-all handlers
    pub fn emit(&self, event: &SessionEvent) {
        if let Some(handlers) = self.handlers.get(event.name()) {
            for handler in handlers {
                handler(event);
            }
        }
        for handler in &self.any {
            handler(event);
        }
    }
}

/// Shared record of every event a session emitted
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SessionEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that records everything `emitter` publishes
    pub fn recording(emitter: &mut EventEmitter) -> Self {
        let log = Self::new();
        let sink = log.clone();
        emitter.on_any(move |event| sink.push(event.clone()));
        log
    }

    pub fn push(&self, event: SessionEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.borrow().clone()
    }

    /// Names of the recorded events, in emission order
    pub fn names(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    /// How many recorded events carry this name
    pub fn count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.name() == name)
            .count()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_named_handlers_only_see_their_event() {
        let mut emitter = EventEmitter::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        emitter.on("cancel", move |_| counter.set(counter.get() + 1));

        emitter.emit(&SessionEvent::End);
        emitter.emit(&SessionEvent::Cancel);
        emitter.emit(&SessionEvent::Cancel);

        assert_eq!(hits.get(), 2);
        assert!(emitter.has_handler("cancel"));
        assert!(!emitter.has_handler("end"));
    }

    #[test]
    fn test_matched_event_uses_rule_name() {
        let event = SessionEvent::Matched {
            name: "two up".to_string(),
            contact: Contact::new(Default::default(), Default::default()),
        };
        assert_eq!(event.name(), "two up");

        let mut emitter = EventEmitter::new();
        let log = EventLog::recording(&mut emitter);
        emitter.emit(&event);
        assert_eq!(log.count("two up"), 1);
    }

    #[test]
    fn test_log_drain() {
        let mut emitter = EventEmitter::new();
        assert!(emitter.is_empty());
        let log = EventLog::recording(&mut emitter);

        emitter.emit(&SessionEvent::Move {
            delta_x: 1.0,
            delta_y: 2.0,
        });
        emitter.emit(&SessionEvent::End);
        assert_eq!(log.names(), vec!["move", "end"]);

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(SessionEvent::Move {
            delta_x: 3.0,
            delta_y: -4.0,
        })
        .unwrap();
        assert_eq!(json["event"], "move");
        assert_eq!(json["delta_x"], 3.0);
        assert_eq!(json["delta_y"], -4.0);

        let json = serde_json::to_value(SessionEvent::Cancel).unwrap();
        assert_eq!(json["event"], "cancel");
    }
}
