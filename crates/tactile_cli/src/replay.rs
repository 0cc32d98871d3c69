//! Script replay against a headless host

use std::time::Duration;

use tactile_gesture::{
    EventLog, GestureSession, HeadlessHost, ManualClock, PointerSession, Session, SessionEvent,
};
use tracing::debug;

use crate::config::TactileConfig;
use crate::script::Script;

/// Which tracker a script is replayed through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    /// Single-pointer drag tracking
    Pointer,
    /// Multi-contact tracking with gesture classification
    Gesture,
}

/// Replay a script and collect every emitted event
///
/// When `only` is non-empty, just the events with those names are returned.
pub fn replay(
    config: &TactileConfig,
    script: &Script,
    kind: SessionKind,
    only: &[String],
) -> Vec<SessionEvent> {
    let clock = ManualClock::new();
    let mut host = HeadlessHost::new()
        .with_document(config.document())
        .with_clock(clock.clone());

    let mut session: Box<dyn Session> = match kind {
        SessionKind::Pointer => Box::new(PointerSession::new(config.device)),
        SessionKind::Gesture => Box::new(GestureSession::new(config.device)),
    };
    let log = EventLog::recording(session.emitter_mut());
    session.attach(&mut host);

    for (index, step) in script.steps.iter().enumerate() {
        clock.advance(Duration::from_millis(step.advance_ms));
        let mut event = step.event.clone();
        let invoked = host.dispatch(session.as_mut(), step.target, &mut event);
        debug!(
            "step {}: {} on {:?} invoked {} handler(s)",
            index, event.kind, step.target, invoked
        );
    }

    log.drain()
        .into_iter()
        .filter(|event| only.is_empty() || only.iter().any(|name| name == event.name()))
        .collect()
}
