//! Caller-facing scrollable configuration
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```rust
//! use sheetkit_scrollable::config::ScrollableConfig;
//!
//! let config = ScrollableConfig::from_toml(r#"
//!     enable_footer_margin_adjustment = true
//!     keyboard_dismiss_mode = "on-drag"
//! "#).unwrap();
//!
//! assert!(config.enable_footer_margin_adjustment);
//! assert!(config.shows_vertical_scroll_indicator);
//! ```

use serde::{Deserialize, Serialize};
use sheetkit_core::{Result, SheetError};

use crate::constants::{KeyboardDismissMode, OverScrollMode};

/// Configuration for a bottom-sheet scrollable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollableConfig {
    /// Content height to report instead of the measured one
    pub custom_content_height: Option<f32>,
    /// Add the footer height to the extent and to the bottom margin
    pub enable_footer_margin_adjustment: bool,
    pub over_scroll_mode: OverScrollMode,
    pub keyboard_dismiss_mode: KeyboardDismissMode,
    /// Requested indicator visibility while content scrolling is unlocked
    pub shows_vertical_scroll_indicator: bool,
    pub refreshing: Option<bool>,
    pub progress_view_offset: Option<f32>,
}

impl Default for ScrollableConfig {
    fn default() -> Self {
        Self {
            custom_content_height: None,
            enable_footer_margin_adjustment: false,
            over_scroll_mode: OverScrollMode::Never,
            keyboard_dismiss_mode: KeyboardDismissMode::Interactive,
            shows_vertical_scroll_indicator: true,
            refreshing: None,
            progress_view_offset: None,
        }
    }
}

impl ScrollableConfig {
    /// Parse a configuration from TOML
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| SheetError::Config(e.to_string()))
    }

    /// Serialize the configuration to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| SheetError::Config(e.to_string()))
    }

    /// The height override, ignoring values that are not finite
    pub fn content_height_override(&self) -> Option<f32> {
        self.custom_content_height.filter(|h| h.is_finite())
    }

    /// Whether refresh props were set
    pub fn has_refresh_props(&self) -> bool {
        self.refreshing.is_some() || self.progress_view_offset.is_some()
    }
}
