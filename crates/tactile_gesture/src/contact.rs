//! Per-contact tracking state

use std::time::Duration;

use serde::Serialize;
use tactile_platform::PagePoint;

use crate::host::Timestamp;

/// Label a contact carries until a rule classifies it
pub const TAP: &str = "tap";

/// One tracked touch point, or the single virtual pointer in mouse mode
///
/// The start position and time are fixed when the contact is created; only
/// the end position, elapsed time, deltas and direction label change while
/// the session is active.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Contact {
    start_x: f32,
    start_y: f32,
    start_time: Timestamp,
    end_x: Option<f32>,
    end_y: Option<f32>,
    elapsed: Duration,
    delta_x: f32,
    delta_y: f32,
    direction: String,
}

impl Contact {
    /// Create a contact at its session start position
    pub fn new(start: PagePoint, start_time: Timestamp) -> Self {
        Self {
            start_x: start.x,
            start_y: start.y,
            start_time,
            end_x: None,
            end_y: None,
            elapsed: Duration::ZERO,
            delta_x: 0.0,
            delta_y: 0.0,
            direction: TAP.to_string(),
        }
    }

    /// Record the contact's latest position
    pub fn track(&mut self, position: PagePoint, now: Timestamp) {
        self.end_x = Some(position.x);
        self.end_y = Some(position.y);
        self.elapsed = now.saturating_sub(self.start_time);
        self.delta_x = position.x - self.start_x;
        self.delta_y = position.y - self.start_y;
    }

    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    pub fn start_y(&self) -> f32 {
        self.start_y
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    /// Latest position, once the contact has moved
    pub fn end(&self) -> Option<PagePoint> {
        match (self.end_x, self.end_y) {
            (Some(x), Some(y)) => Some(PagePoint::new(x, y)),
            _ => None,
        }
    }

    /// Time between the start and the latest update
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn delta_x(&self) -> f32 {
        self.delta_x
    }

    pub fn delta_y(&self) -> f32 {
        self.delta_y
    }

    /// Current classification label
    pub fn direction(&self) -> &str {
        &self.direction
    }

    pub(crate) fn set_direction(&mut self, label: &str) {
        label.clone_into(&mut self.direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_contact_is_tap() {
        let contact = Contact::new(PagePoint::new(10.0, 20.0), Duration::from_millis(5));
        assert_eq!(contact.direction(), TAP);
        assert_eq!(contact.end(), None);
        assert_eq!(contact.delta_x(), 0.0);
        assert_eq!(contact.delta_y(), 0.0);
        assert_eq!(contact.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_track_updates_deltas_not_start() {
        let mut contact = Contact::new(PagePoint::new(10.0, 20.0), Duration::from_millis(100));
        contact.track(PagePoint::new(4.0, 95.0), Duration::from_millis(350));

        assert_eq!(contact.start_x(), 10.0);
        assert_eq!(contact.start_y(), 20.0);
        assert_eq!(contact.start_time(), Duration::from_millis(100));
        assert_eq!(contact.end(), Some(PagePoint::new(4.0, 95.0)));
        assert_eq!(contact.delta_x(), -6.0);
        assert_eq!(contact.delta_y(), 75.0);
        assert_eq!(contact.elapsed(), Duration::from_millis(250));
    }
}
