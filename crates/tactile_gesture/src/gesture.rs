//! Multi-contact gesture tracking
//!
//! [`GestureSession`] wraps a [`PointerSession`] for the listener lifecycle
//! and adds one [`Contact`] per finger. When the session ends, every contact
//! runs through the [`GestureRuleSet`] and each matching rule is published
//! under its own name, followed by a single `gesture` event carrying all
//! contacts.
//!
//! # Example
//!
//! ```rust
//! use tactile_gesture::prelude::*;
//!
//! let mut host = HeadlessHost::new();
//! let mut session = GestureSession::new(DeviceClass::TouchMobile);
//! let log = EventLog::recording(session.emitter_mut());
//! session.attach(&mut host);
//!
//! let finger = |x, y| PointerCoords::page(x, y);
//! host.dispatch(&mut session, ListenTarget::Element,
//!     &mut RawInputEvent::touch(InputEventKind::TouchStart, [finger(100.0, 300.0)]));
//! host.dispatch(&mut session, ListenTarget::Capture,
//!     &mut RawInputEvent::touch(InputEventKind::TouchMove, [finger(100.0, 200.0)]));
//! host.dispatch(&mut session, ListenTarget::Capture,
//!     &mut RawInputEvent::touch_end());
//!
//! assert_eq!(log.count("up"), 1);
//! assert_eq!(session.contacts()[0].direction(), "up");
//! ```

use smallvec::smallvec;
use tactile_platform::{CoordinateResolver, DeviceClass, InputModality, RawInputEvent, TouchList};

use crate::contact::Contact;
use crate::emitter::{EventEmitter, SessionEvent};
use crate::host::Host;
use crate::pointer::PointerSession;
use crate::rules::GestureRuleSet;
use crate::session::Session;

/// Tracks every contact of a touch interaction and classifies it on end
#[derive(Debug)]
pub struct GestureSession {
    pointer: PointerSession,
    contacts: Vec<Contact>,
    rules: &'static GestureRuleSet,
}

impl GestureSession {
    /// Create a session; the modality is fixed from the device class
    pub fn new(device: DeviceClass) -> Self {
        Self::with_modality(InputModality::for_device(device))
    }

    pub fn with_modality(modality: InputModality) -> Self {
        Self {
            pointer: PointerSession::with_modality(modality),
            contacts: Vec::new(),
            rules: GestureRuleSet::standard(),
        }
    }

    /// Contacts of the current (or last) session, in device order
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// The underlying single-pointer tracker
    pub fn pointer(&self) -> &PointerSession {
        &self.pointer
    }

    pub fn rules(&self) -> &'static GestureRuleSet {
        self.rules
    }

    pub fn is_attached(&self) -> bool {
        self.pointer.is_attached()
    }

    pub fn is_active(&self) -> bool {
        self.pointer.is_active()
    }

    pub fn has_dragged(&self) -> bool {
        self.pointer.has_dragged()
    }

    fn emit(&self, event: SessionEvent) {
        self.pointer.emitter().emit(&event);
    }
}

/// Contacts an event reports
///
/// Touch events report their touch list. Events without one (mouse input)
/// report a single virtual contact at the event's own coordinates.
fn reported_contacts(event: &RawInputEvent) -> TouchList {
    match &event.touches {
        Some(touches) => touches.clone(),
        None => smallvec![event.coords],
    }
}

impl Session for GestureSession {
    fn modality(&self) -> InputModality {
        self.pointer.modality()
    }

    fn attach(&mut self, host: &mut dyn Host) {
        self.pointer.attach(host);
    }

    fn detach(&mut self, host: &mut dyn Host) {
        self.pointer.detach(host);
    }

    fn on_start(&mut self, host: &mut dyn Host, event: &mut RawInputEvent) {
        self.pointer.on_start(host, event);

        let now = host.now();
        let resolver = CoordinateResolver::new(host.document());
        self.contacts = reported_contacts(event)
            .iter()
            .map(|point| Contact::new(resolver.resolve_point(point), now))
            .collect();
        tracing::debug!("gesture session started with {} contacts", self.contacts.len());

        self.emit(SessionEvent::Start {
            contacts: self.contacts.clone(),
        });
    }

    fn on_move(&mut self, host: &mut dyn Host, event: &mut RawInputEvent) {
        event.prevent_default();
        self.pointer.mark_dragged();

        let now = host.now();
        let resolver = CoordinateResolver::new(host.document());
        let events = self.pointer.emitter();
        for (index, point) in reported_contacts(event).iter().enumerate() {
            let Some(contact) = self.contacts.get_mut(index) else {
                tracing::trace!("ignoring contact {} that joined after start", index);
                continue;
            };
            contact.track(resolver.resolve_point(point), now);
            events.emit(&SessionEvent::Move {
                delta_x: contact.delta_x(),
                delta_y: contact.delta_y(),
            });
        }
    }

    fn on_end(&mut self, host: &mut dyn Host, event: &mut RawInputEvent) {
        self.pointer.on_end(host, event);

        let events = self.pointer.emitter();
        self.rules.classify(&mut self.contacts, |rule, contact| {
            tracing::debug!(
                "gesture {:?} matched ({}, {})",
                rule.name(),
                contact.delta_x(),
                contact.delta_y()
            );
            events.emit(&SessionEvent::Matched {
                name: rule.name().to_string(),
                contact: contact.clone(),
            });
        });

        self.emit(SessionEvent::Gesture {
            contacts: self.contacts.clone(),
        });
    }

    fn emitter(&self) -> &EventEmitter {
        self.pointer.emitter()
    }

    fn emitter_mut(&mut self) -> &mut EventEmitter {
        self.pointer.emitter_mut()
    }
}
