//! Single-pointer drag tracking
//!
//! [`PointerSession`] turns start/move/end input into `start`, `move`,
//! `end` and `cancel` notifications. Once a session starts, move and end
//! listeners live on the capture context so the drag keeps tracking after
//! the pointer leaves the element.

use tactile_platform::{
    CoordinateResolver, DeviceClass, InputModality, ListenTarget, PagePoint, RawInputEvent,
};

use crate::emitter::{EventEmitter, SessionEvent};
use crate::host::{HandlerRole, Host, Listener};
use crate::session::Session;

/// Tracks one pointer from start to end
#[derive(Debug)]
pub struct PointerSession {
    modality: InputModality,
    attached: bool,
    active: bool,
    has_dragged: bool,
    start: PagePoint,
    delta: (f32, f32),
    events: EventEmitter,
}

impl PointerSession {
    /// Create a session; the modality is fixed from the device class
    pub fn new(device: DeviceClass) -> Self {
        Self::with_modality(InputModality::for_device(device))
    }

    pub fn with_modality(modality: InputModality) -> Self {
        Self {
            modality,
            attached: false,
            active: false,
            has_dragged: false,
            start: PagePoint::default(),
            delta: (0.0, 0.0),
            events: EventEmitter::new(),
        }
    }

    /// The listener bound to a handler role
    pub fn listener(&self, role: HandlerRole) -> Listener {
        match role {
            HandlerRole::Start => {
                Listener::new(ListenTarget::Element, self.modality.start_kind(), role)
            }
            HandlerRole::Move => {
                Listener::new(ListenTarget::Capture, self.modality.move_kind(), role)
            }
            HandlerRole::End => Listener::new(ListenTarget::Capture, self.modality.end_kind(), role),
        }
    }

    /// Whether the start listener is subscribed
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a session is between start and end
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the current (or last) session moved
    pub fn has_dragged(&self) -> bool {
        self.has_dragged
    }

    /// Position recorded at the last start
    pub fn start_point(&self) -> PagePoint {
        self.start
    }

    /// Offset of the last move from the start position
    pub fn delta(&self) -> (f32, f32) {
        self.delta
    }

    pub(crate) fn mark_dragged(&mut self) {
        self.has_dragged = true;
    }

    fn emit(&self, event: SessionEvent) {
        self.events.emit(&event);
    }
}

impl Session for PointerSession {
    fn modality(&self) -> InputModality {
        self.modality
    }

    fn attach(&mut self, host: &mut dyn Host) {
        host.subscribe(self.listener(HandlerRole::Start));
        self.attached = true;
    }

    fn detach(&mut self, host: &mut dyn Host) {
        host.unsubscribe(self.listener(HandlerRole::Start));
        self.attached = false;
    }

    fn on_start(&mut self, host: &mut dyn Host, event: &mut RawInputEvent) {
        event.prevent_default();
        host.suppress_selection();

        self.has_dragged = false;
        self.active = true;

        host.subscribe(self.listener(HandlerRole::Move));
        host.subscribe(self.listener(HandlerRole::End));

        self.start = CoordinateResolver::new(host.document()).resolve(event);
        self.delta = (0.0, 0.0);
        tracing::debug!(
            "pointer session started at ({}, {}) via {}",
            self.start.x,
            self.start.y,
            event.kind
        );

        self.emit(SessionEvent::Start {
            contacts: Vec::new(),
        });
    }

    fn on_move(&mut self, host: &mut dyn Host, event: &mut RawInputEvent) {
        event.prevent_default();
        self.has_dragged = true;

        let page = CoordinateResolver::new(host.document()).resolve(event);
        let delta_x = page.x - self.start.x;
        let delta_y = page.y - self.start.y;
        self.delta = (delta_x, delta_y);
        tracing::trace!("pointer moved by ({}, {})", delta_x, delta_y);

        self.emit(SessionEvent::Move { delta_x, delta_y });
    }

    fn on_end(&mut self, host: &mut dyn Host, event: &mut RawInputEvent) {
        event.prevent_default();
        host.restore_selection();

        host.unsubscribe(self.listener(HandlerRole::Move));
        host.unsubscribe(self.listener(HandlerRole::End));
        self.active = false;

        if self.has_dragged {
            tracing::debug!("pointer session ended after drag {:?}", self.delta);
            self.emit(SessionEvent::End);
        } else {
            tracing::debug!("pointer session cancelled without movement");
            self.emit(SessionEvent::Cancel);
        }
    }

    fn emitter(&self) -> &EventEmitter {
        &self.events
    }

    fn emitter_mut(&mut self) -> &mut EventEmitter {
        &mut self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EventLog;
    use crate::host::HeadlessHost;
    use tactile_platform::{DocumentView, InputEventKind, PointerCoords};

    fn mouse(kind: InputEventKind, x: f32, y: f32) -> RawInputEvent {
        RawInputEvent::mouse(kind, PointerCoords::page(x, y))
    }

    fn attached_session() -> (HeadlessHost, PointerSession, EventLog) {
        let mut host = HeadlessHost::new();
        let mut session = PointerSession::new(DeviceClass::Desktop);
        let log = EventLog::recording(session.emitter_mut());
        session.attach(&mut host);
        (host, session, log)
    }

    #[test]
    fn test_attach_subscribes_start_on_element() {
        let (host, session, _) = attached_session();
        assert!(session.is_attached());
        assert_eq!(host.listeners().len(), 1);
        assert!(host.listeners().contains(&Listener::new(
            ListenTarget::Element,
            InputEventKind::MouseDown,
            HandlerRole::Start
        )));
    }

    #[test]
    fn test_touch_device_uses_touch_events() {
        let mut host = HeadlessHost::new();
        let mut session = PointerSession::new(DeviceClass::TouchMobile);
        session.attach(&mut host);
        assert_eq!(
            host.listeners()
                .role_for(ListenTarget::Element, InputEventKind::TouchStart),
            Some(HandlerRole::Start)
        );
        assert_eq!(
            host.listeners()
                .role_for(ListenTarget::Element, InputEventKind::MouseDown),
            None
        );
    }

    #[test]
    fn test_drag_emits_start_move_end() {
        let (mut host, mut session, log) = attached_session();

        let mut down = mouse(InputEventKind::MouseDown, 10.0, 10.0);
        host.dispatch(&mut session, ListenTarget::Element, &mut down);
        assert!(down.is_default_prevented());
        assert!(host.is_selection_suppressed());
        assert_eq!(host.listeners().on_target(ListenTarget::Capture).count(), 2);

        let mut drag = mouse(InputEventKind::MouseMove, 35.0, -20.0);
        host.dispatch(&mut session, ListenTarget::Capture, &mut drag);
        assert_eq!(session.delta(), (25.0, -30.0));

        let mut up = mouse(InputEventKind::MouseUp, 35.0, -20.0);
        host.dispatch(&mut session, ListenTarget::Capture, &mut up);

        assert_eq!(log.names(), vec!["start", "move", "end"]);
        assert_eq!(
            log.events()[1],
            SessionEvent::Move {
                delta_x: 25.0,
                delta_y: -30.0
            }
        );
        assert!(!host.is_selection_suppressed());
        assert_eq!(host.listeners().on_target(ListenTarget::Capture).count(), 0);
        assert!(!session.is_active());
    }

    #[test]
    fn test_press_release_cancels() {
        let (mut host, mut session, log) = attached_session();

        host.dispatch(
            &mut session,
            ListenTarget::Element,
            &mut mouse(InputEventKind::MouseDown, 0.0, 0.0),
        );
        host.dispatch(
            &mut session,
            ListenTarget::Element,
            &mut mouse(InputEventKind::MouseUp, 0.0, 0.0),
        );

        assert_eq!(log.names(), vec!["start", "cancel"]);
        assert!(!session.has_dragged());
    }

    #[test]
    fn test_moves_before_start_are_ignored() {
        let (mut host, mut session, log) = attached_session();
        let invoked = host.dispatch(
            &mut session,
            ListenTarget::Capture,
            &mut mouse(InputEventKind::MouseMove, 5.0, 5.0),
        );
        assert_eq!(invoked, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_drag_continues_outside_element_after_detach() {
        let (mut host, mut session, log) = attached_session();
        host.dispatch(
            &mut session,
            ListenTarget::Element,
            &mut mouse(InputEventKind::MouseDown, 0.0, 0.0),
        );

        session.detach(&mut host);
        assert!(!session.is_attached());

        host.dispatch(
            &mut session,
            ListenTarget::Capture,
            &mut mouse(InputEventKind::MouseMove, 400.0, 0.0),
        );
        host.dispatch(
            &mut session,
            ListenTarget::Capture,
            &mut mouse(InputEventKind::MouseUp, 400.0, 0.0),
        );
        assert_eq!(log.names(), vec!["start", "move", "end"]);
        assert!(host.listeners().is_empty());
    }

    #[test]
    fn test_reattach_matches_fresh_session() {
        let (mut host, mut session, _) = attached_session();
        session.detach(&mut host);
        assert!(host.listeners().is_empty());
        session.attach(&mut host);

        let mut fresh_host = HeadlessHost::new();
        let mut fresh = PointerSession::new(DeviceClass::Desktop);
        fresh.attach(&mut fresh_host);

        assert_eq!(host.listeners(), fresh_host.listeners());
    }

    #[test]
    fn test_touch_drag_follows_target_touch() {
        let mut host = HeadlessHost::new();
        let mut session = PointerSession::new(DeviceClass::TouchMobile);
        let log = EventLog::recording(session.emitter_mut());
        session.attach(&mut host);

        let finger = |x, y| PointerCoords::page(x, y);
        let mut start = RawInputEvent::touch(InputEventKind::TouchStart, [finger(100.0, 100.0)]);
        host.dispatch(&mut session, ListenTarget::Element, &mut start);
        assert_eq!(session.start_point(), PagePoint::new(100.0, 100.0));

        // Only the first target touch drives the pointer.
        let mut drag = RawInputEvent::touch(
            InputEventKind::TouchMove,
            [finger(500.0, 500.0), finger(130.0, 220.0)],
        )
        .with_target_touches([finger(130.0, 220.0)]);
        host.dispatch(&mut session, ListenTarget::Capture, &mut drag);
        assert!(drag.is_default_prevented());
        assert_eq!(session.delta(), (30.0, 120.0));

        host.dispatch(
            &mut session,
            ListenTarget::Capture,
            &mut RawInputEvent::touch_end(),
        );

        assert_eq!(
            log.events(),
            vec![
                SessionEvent::Start { contacts: vec![] },
                SessionEvent::Move {
                    delta_x: 30.0,
                    delta_y: 120.0
                },
                SessionEvent::End,
            ]
        );
        assert!(host.listeners().on_target(ListenTarget::Capture).next().is_none());
    }

    #[test]
    fn test_client_coordinates_include_scroll() {
        let mut host =
            HeadlessHost::new().with_document(DocumentView::default().with_root_scroll(0.0, 300.0));
        let mut session = PointerSession::new(DeviceClass::Desktop);
        session.attach(&mut host);

        let mut down = RawInputEvent::mouse(InputEventKind::MouseDown, PointerCoords::client(10.0, 10.0));
        host.dispatch(&mut session, ListenTarget::Element, &mut down);
        assert_eq!(session.start_point(), PagePoint::new(10.0, 310.0));

        // Scrolling mid-drag shifts the resolved page position.
        host.document_mut().root_scroll.top = 350.0;
        let mut drag = RawInputEvent::mouse(InputEventKind::MouseMove, PointerCoords::client(10.0, 10.0));
        host.dispatch(&mut session, ListenTarget::Capture, &mut drag);
        assert_eq!(session.delta(), (0.0, 50.0));
    }
}
