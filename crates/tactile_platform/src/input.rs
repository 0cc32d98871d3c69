//! Input event types for mouse and touch

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::PlatformError;

// ============================================================================
// Event Kinds
// ============================================================================

/// Raw input event names understood by the gesture engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEventKind {
    /// Mouse button pressed
    MouseDown,
    /// Mouse moved
    MouseMove,
    /// Mouse button released
    MouseUp,
    /// One or more fingers touched the surface
    TouchStart,
    /// One or more fingers moved
    TouchMove,
    /// One or more fingers lifted
    TouchEnd,
}

impl InputEventKind {
    /// The host-facing event name (`"mousedown"`, `"touchmove"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            InputEventKind::MouseDown => "mousedown",
            InputEventKind::MouseMove => "mousemove",
            InputEventKind::MouseUp => "mouseup",
            InputEventKind::TouchStart => "touchstart",
            InputEventKind::TouchMove => "touchmove",
            InputEventKind::TouchEnd => "touchend",
        }
    }

    /// Check if this is a touch event
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            InputEventKind::TouchStart | InputEventKind::TouchMove | InputEventKind::TouchEnd
        )
    }
}

impl fmt::Display for InputEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputEventKind {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mousedown" => Ok(InputEventKind::MouseDown),
            "mousemove" => Ok(InputEventKind::MouseMove),
            "mouseup" => Ok(InputEventKind::MouseUp),
            "touchstart" => Ok(InputEventKind::TouchStart),
            "touchmove" => Ok(InputEventKind::TouchMove),
            "touchend" => Ok(InputEventKind::TouchEnd),
            _ => Err(PlatformError::UnknownEventKind(s.to_string())),
        }
    }
}

// ============================================================================
// Device & Modality
// ============================================================================

/// Class of host device, as reported by the platform at startup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    /// Desktop-class device driven by a mouse
    #[default]
    Desktop,
    /// Touch-capable mobile device
    TouchMobile,
}

impl FromStr for DeviceClass {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(DeviceClass::Desktop),
            "touch-mobile" | "mobile" | "touch" => Ok(DeviceClass::TouchMobile),
            _ => Err(PlatformError::UnknownDevice(s.to_string())),
        }
    }
}

/// Which family of raw events drives a pointer session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputModality {
    /// mousedown / mousemove / mouseup
    Mouse,
    /// touchstart / touchmove / touchend
    Touch,
}

impl InputModality {
    /// Select the modality for a device class
    pub fn for_device(device: DeviceClass) -> Self {
        match device {
            DeviceClass::TouchMobile => InputModality::Touch,
            DeviceClass::Desktop => InputModality::Mouse,
        }
    }

    /// Event that begins a session
    pub fn start_kind(&self) -> InputEventKind {
        match self {
            InputModality::Mouse => InputEventKind::MouseDown,
            InputModality::Touch => InputEventKind::TouchStart,
        }
    }

    /// Event that updates an active session
    pub fn move_kind(&self) -> InputEventKind {
        match self {
            InputModality::Mouse => InputEventKind::MouseMove,
            InputModality::Touch => InputEventKind::TouchMove,
        }
    }

    /// Event that finishes an active session
    pub fn end_kind(&self) -> InputEventKind {
        match self {
            InputModality::Mouse => InputEventKind::MouseUp,
            InputModality::Touch => InputEventKind::TouchEnd,
        }
    }
}

// ============================================================================
// Listener Targets
// ============================================================================

/// Where a listener is registered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenTarget {
    /// The tracked element itself
    Element,
    /// The document-wide capture context, which keeps receiving pointer
    /// events after the pointer leaves the element
    Capture,
}

impl FromStr for ListenTarget {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "element" => Ok(ListenTarget::Element),
            "capture" | "document" => Ok(ListenTarget::Capture),
            _ => Err(PlatformError::UnknownTarget(s.to_string())),
        }
    }
}

// ============================================================================
// Raw Events
// ============================================================================

/// Coordinate fields exposed by a pointer event or a single touch point
///
/// Page coordinates are optional because some hosts only report viewport
/// (client) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerCoords {
    /// X position relative to the page, if the host reports it
    pub page_x: Option<f32>,
    /// Y position relative to the page, if the host reports it
    pub page_y: Option<f32>,
    /// X position relative to the viewport
    pub client_x: f32,
    /// Y position relative to the viewport
    pub client_y: f32,
}

impl PointerCoords {
    /// Coordinates with page position known (client mirrors page)
    pub fn page(x: f32, y: f32) -> Self {
        Self {
            page_x: Some(x),
            page_y: Some(y),
            client_x: x,
            client_y: y,
        }
    }

    /// Coordinates with only the viewport position known
    pub fn client(x: f32, y: f32) -> Self {
        Self {
            page_x: None,
            page_y: None,
            client_x: x,
            client_y: y,
        }
    }

    /// Page position, only when both axes are reported
    pub fn page_position(&self) -> Option<(f32, f32)> {
        match (self.page_x, self.page_y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}

/// List of touch points in device order
pub type TouchList = SmallVec<[PointerCoords; 4]>;

/// A raw input event as delivered by the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawInputEvent {
    /// Event name
    pub kind: InputEventKind,
    /// Coordinates carried directly by the event (mouse events)
    #[serde(flatten)]
    pub coords: PointerCoords,
    /// Every contact currently on the surface
    #[serde(default)]
    pub touches: Option<TouchList>,
    /// Contacts that started on the event target
    #[serde(default)]
    pub target_touches: Option<TouchList>,
    #[serde(skip)]
    default_prevented: bool,
}

impl RawInputEvent {
    /// Create a mouse-style event carrying its own coordinates
    pub fn mouse(kind: InputEventKind, coords: PointerCoords) -> Self {
        Self {
            kind,
            coords,
            touches: None,
            target_touches: None,
            default_prevented: false,
        }
    }

    /// Create a touch event where every contact started on the target
    pub fn touch<I>(kind: InputEventKind, touches: I) -> Self
    where
        I: IntoIterator<Item = PointerCoords>,
    {
        let touches: TouchList = touches.into_iter().collect();
        Self {
            kind,
            coords: PointerCoords::default(),
            target_touches: Some(touches.clone()),
            touches: Some(touches),
            default_prevented: false,
        }
    }

    /// A touchend after the last finger lifted
    ///
    /// No touch lists are reported, so nothing resolves against an empty
    /// target-touch list.
    pub fn touch_end() -> Self {
        Self::mouse(InputEventKind::TouchEnd, PointerCoords::default())
    }

    /// Use the full touch list as the target-touch list when the host
    /// reported no target touches
    pub fn mirror_touches(&mut self) {
        if self.target_touches.is_none() {
            if let Some(touches) = self.touches.as_ref().filter(|t| !t.is_empty()) {
                self.target_touches = Some(touches.clone());
            }
        }
    }

    /// Replace the target-touch list
    pub fn with_target_touches<I>(mut self, touches: I) -> Self
    where
        I: IntoIterator<Item = PointerCoords>,
    {
        self.target_touches = Some(touches.into_iter().collect());
        self
    }

    /// Suppress the host's default action for this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if a handler suppressed the default action
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
