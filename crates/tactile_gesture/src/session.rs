//! The shared session contract

use tactile_platform::{InputModality, RawInputEvent};

use crate::emitter::EventEmitter;
use crate::host::{HandlerRole, Host};

/// Lifecycle contract shared by pointer and gesture sessions
///
/// A session is created once per tracked element. `attach`/`detach` toggle
/// the start listener; each start event begins a new interaction that runs
/// until the matching end event.
///
/// ```text
/// Idle --start--> Active --end/cancel--> Idle
///                  ↺ move
/// ```
pub trait Session {
    /// Event family selected at construction
    fn modality(&self) -> InputModality;

    /// Subscribe the start handler on the element
    fn attach(&mut self, host: &mut dyn Host);

    /// Unsubscribe the start handler from the element
    ///
    /// Move/end listeners already placed on the capture context by an
    /// in-flight session stay registered until that session ends.
    fn detach(&mut self, host: &mut dyn Host);

    /// Begin an interaction
    fn on_start(&mut self, host: &mut dyn Host, event: &mut RawInputEvent);

    /// Track movement during an interaction
    fn on_move(&mut self, host: &mut dyn Host, event: &mut RawInputEvent);

    /// Finish an interaction
    fn on_end(&mut self, host: &mut dyn Host, event: &mut RawInputEvent);

    fn emitter(&self) -> &EventEmitter;

    fn emitter_mut(&mut self) -> &mut EventEmitter;

    /// Invoke the handler a listener is bound to
    fn handle(&mut self, role: HandlerRole, host: &mut dyn Host, event: &mut RawInputEvent) {
        match role {
            HandlerRole::Start => self.on_start(host, event),
            HandlerRole::Move => self.on_move(host, event),
            HandlerRole::End => self.on_end(host, event),
        }
    }
}
