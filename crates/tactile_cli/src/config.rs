//! Tactile configuration file handling
//!
//! `tactile.toml` describes the host a script is replayed against: the
//! device class (which fixes the input modality), the document's
//! compatibility mode and scroll offsets, and the default log filter.
//!
//! ```toml
//! device = "touch-mobile"
//! compat_mode = "standards"
//! scroll_top = 120.0
//!
//! [logging]
//! filter = "tactile_gesture=debug"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tactile_platform::{CompatMode, DeviceClass, DocumentView};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "tactile.toml";

/// Simulated host configuration
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TactileConfig {
    /// Host device class
    pub device: DeviceClass,
    /// Document rendering mode
    pub compat_mode: CompatMode,
    /// Horizontal scroll of the document's scrolling root
    pub scroll_left: f32,
    /// Vertical scroll of the document's scrolling root
    pub scroll_top: f32,
    /// Horizontal scroll of the body (used in quirks mode)
    pub body_scroll_left: f32,
    /// Vertical scroll of the body (used in quirks mode)
    pub body_scroll_top: f32,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl TactileConfig {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse tactile configuration")
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load an explicit file, else `tactile.toml` if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(CONFIG_FILE);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Document snapshot described by this configuration
    pub fn document(&self) -> DocumentView {
        DocumentView::default()
            .with_compat_mode(self.compat_mode)
            .with_root_scroll(self.scroll_left, self.scroll_top)
            .with_body_scroll(self.body_scroll_left, self.body_scroll_top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TactileConfig::parse("").unwrap();
        assert_eq!(config, TactileConfig::default());
        assert_eq!(config.device, DeviceClass::Desktop);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_full_config() {
        let config = TactileConfig::parse(
            r#"
            device = "touch-mobile"
            compat_mode = "quirks"
            scroll_top = 40.0
            body_scroll_left = 3.0
            body_scroll_top = 7.0

            [logging]
            filter = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.device, DeviceClass::TouchMobile);
        assert_eq!(config.logging.filter, "debug");

        let doc = config.document();
        assert_eq!(doc.compat_mode, CompatMode::Quirks);
        assert_eq!(doc.root_scroll.top, 40.0);
        assert_eq!(doc.scroll_reference().left, 3.0);
        assert_eq!(doc.scroll_reference().top, 7.0);
    }

    #[test]
    fn test_unknown_device_rejected() {
        assert!(TactileConfig::parse(r#"device = "stylus""#).is_err());
    }
}
