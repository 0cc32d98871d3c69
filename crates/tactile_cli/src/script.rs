//! Input scripts
//!
//! A script is a TOML list of raw input events, each dispatched at a target
//! after optionally advancing the replay clock:
//!
//! ```toml
//! [[step]]
//! kind = "touchstart"
//! touches = [{ page_x = 100.0, page_y = 300.0 }]
//!
//! [[step]]
//! target = "capture"
//! kind = "touchmove"
//! advance_ms = 120
//! touches = [{ page_x = 100.0, page_y = 180.0 }]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tactile_platform::{ListenTarget, RawInputEvent};

/// A sequence of input steps
#[derive(Debug, Default, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One dispatched event
#[derive(Debug, Deserialize)]
pub struct Step {
    /// Where the event is dispatched; element events bubble to the capture context
    #[serde(default = "default_target")]
    pub target: ListenTarget,
    /// Milliseconds to advance the clock before dispatching
    #[serde(default)]
    pub advance_ms: u64,
    #[serde(flatten)]
    pub event: RawInputEvent,
}

fn default_target() -> ListenTarget {
    ListenTarget::Element
}

impl Script {
    /// Parse a script from TOML text
    ///
    /// Steps that list `touches` without `target_touches` treat every touch
    /// as having started on the target.
    pub fn parse(content: &str) -> Result<Self> {
        let mut script: Self = toml::from_str(content).context("Failed to parse input script")?;
        for step in &mut script.steps {
            step.event.mirror_touches();
        }
        Ok(script)
    }

    /// Load a script from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid script {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactile_platform::{InputEventKind, PointerCoords};

    #[test]
    fn test_parse_touch_steps() {
        let script = Script::parse(
            r#"
            [[step]]
            kind = "touchstart"
            touches = [{ page_x = 1.0, page_y = 2.0 }, { client_x = 5.0, client_y = 6.0 }]

            [[step]]
            target = "capture"
            kind = "touchend"
            advance_ms = 50
            "#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 2);

        let start = &script.steps[0];
        assert_eq!(start.target, ListenTarget::Element);
        assert_eq!(start.event.kind, InputEventKind::TouchStart);
        let touches = start.event.touches.as_ref().unwrap();
        assert_eq!(
            touches[0],
            PointerCoords {
                page_x: Some(1.0),
                page_y: Some(2.0),
                ..Default::default()
            }
        );
        assert_eq!(touches[1], PointerCoords::client(5.0, 6.0));
        assert_eq!(start.event.target_touches.as_ref(), Some(touches));

        let end = &script.steps[1];
        assert_eq!(end.target, ListenTarget::Capture);
        assert_eq!(end.advance_ms, 50);
        assert!(end.event.touches.is_none());
        assert!(end.event.target_touches.is_none());
    }

    #[test]
    fn test_explicit_target_touches_kept() {
        let script = Script::parse(
            r#"
            [[step]]
            kind = "touchmove"
            touches = [{ page_x = 1.0, page_y = 1.0 }, { page_x = 7.0, page_y = 7.0 }]
            target_touches = [{ page_x = 7.0, page_y = 7.0 }]

            [[step]]
            kind = "touchend"
            touches = []
            "#,
        )
        .unwrap();

        let targets = script.steps[0].event.target_touches.as_ref().unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].page_position(), Some((7.0, 7.0)));
        assert!(script.steps[1].event.target_touches.is_none());
    }

    #[test]
    fn test_parse_mouse_step() {
        let script = Script::parse(
            r#"
            [[step]]
            kind = "mousedown"
            client_x = 10.0
            client_y = 20.0
            "#,
        )
        .unwrap();

        let event = &script.steps[0].event;
        assert_eq!(event.kind, InputEventKind::MouseDown);
        assert_eq!(event.coords, PointerCoords::client(10.0, 20.0));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Script::parse("[[step]]\nkind = \"pointerdown\"\n").is_err());
    }
}
