//! Document state needed to resolve page coordinates

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Document rendering compatibility mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatMode {
    /// Standards mode; the scrolling root is the document element
    #[default]
    Standards,
    /// Legacy quirks mode; the body carries the scroll offset
    Quirks,
}

impl FromStr for CompatMode {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standards" | "css1compat" => Ok(CompatMode::Standards),
            "quirks" | "backcompat" => Ok(CompatMode::Quirks),
            _ => Err(PlatformError::UnknownCompatMode(s.to_string())),
        }
    }
}

/// Scroll offset of a scrollable element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOffset {
    pub left: f32,
    pub top: f32,
}

impl ScrollOffset {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Snapshot of the document as seen by the coordinate resolver
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentView {
    /// Rendering mode of the document
    pub compat_mode: CompatMode,
    /// Scroll offset of the document's scrolling root
    pub root_scroll: ScrollOffset,
    /// Scroll offset of the document body
    pub body_scroll: ScrollOffset,
}

impl DocumentView {
    /// Set the rendering mode
    pub fn with_compat_mode(mut self, mode: CompatMode) -> Self {
        self.compat_mode = mode;
        self
    }

    /// Set the scrolling root's offset
    pub fn with_root_scroll(mut self, left: f32, top: f32) -> Self {
        self.root_scroll = ScrollOffset::new(left, top);
        self
    }

    /// Set the body's offset
    pub fn with_body_scroll(mut self, left: f32, top: f32) -> Self {
        self.body_scroll = ScrollOffset::new(left, top);
        self
    }

    /// Offset of the element that scrolls the page in the current mode
    pub fn scroll_reference(&self) -> ScrollOffset {
        match self.compat_mode {
            CompatMode::Standards => self.root_scroll,
            CompatMode::Quirks => self.body_scroll,
        }
    }
}
