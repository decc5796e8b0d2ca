//! Desktop layout and behavior configuration.
//!
//! The embedded `config/desktop.toml` mirrors [`DesktopConfig::default`]; hosts may ship their own
//! file and load it with [`DesktopConfig::from_toml_str`]. Missing keys fall back to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    model::WindowRect,
    window_manager::{
        IconColumn, LayoutPolicy, ICON_COLUMN_TOP, ICON_COLUMN_X, ICON_ROW_HEIGHT,
        MAXIMIZE_PADDING, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, STATUS_BAR_HEIGHT,
    },
};

/// Embedded default configuration file.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/desktop.toml");

/// Initial stacking value; panels are seeded just below it.
pub const BASE_Z: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Whether feedback sound cues are emitted.
    pub audio_enabled: bool,
    /// Panel opened at boot when the initial route is the desktop root.
    pub boot_panel: Option<String>,
    /// Delay before the boot panel opens.
    pub boot_delay_ms: u64,
    pub window: WindowConfig,
    pub icons: IconLayoutConfig,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            audio_enabled: true,
            boot_panel: Some("about".to_string()),
            boot_delay_ms: 500,
            window: WindowConfig::default(),
            icons: IconLayoutConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub min_width: i32,
    pub min_height: i32,
    pub default_width: i32,
    pub default_height: i32,
    pub maximize_padding: i32,
    pub status_bar_height: i32,
    pub base_z: u32,
    pub cascade_x: i32,
    pub cascade_y: i32,
    pub cascade_step: i32,
    pub document: WindowRect,
}

impl Default for WindowConfig {
    fn default() -> Self {
        let policy = LayoutPolicy::default();
        Self {
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
            default_width: 640,
            default_height: 360,
            maximize_padding: MAXIMIZE_PADDING,
            status_bar_height: STATUS_BAR_HEIGHT,
            base_z: BASE_Z,
            cascade_x: 120,
            cascade_y: 100,
            cascade_step: 60,
            document: policy.document_rect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconLayoutConfig {
    pub x: i32,
    pub top: i32,
    pub row_height: i32,
}

impl Default for IconLayoutConfig {
    fn default() -> Self {
        Self {
            x: ICON_COLUMN_X,
            top: ICON_COLUMN_TOP,
            row_height: ICON_ROW_HEIGHT,
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid desktop config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("`{field}` must be positive, found {value}")]
    NonPositive { field: &'static str, value: i32 },
    #[error("`{field}` must not be negative, found {value}")]
    Negative { field: &'static str, value: i32 },
    #[error("`{field}` ({value}) is below the minimum window size ({min})")]
    BelowMinimum {
        field: &'static str,
        value: i32,
        min: i32,
    },
}

impl DesktopConfig {
    /// Parses and validates a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or a value is out of range.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        for (field, value) in [
            ("window.min_width", window.min_width),
            ("window.min_height", window.min_height),
            ("icons.row_height", self.icons.row_height),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("window.maximize_padding", window.maximize_padding),
            ("window.status_bar_height", window.status_bar_height),
            ("window.cascade_step", window.cascade_step),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value, min) in [
            ("window.default_width", window.default_width, window.min_width),
            ("window.default_height", window.default_height, window.min_height),
            ("window.document.w", window.document.w, window.min_width),
            ("window.document.h", window.document.h, window.min_height),
        ] {
            if value < min {
                return Err(ConfigError::BelowMinimum { field, value, min });
            }
        }
        Ok(())
    }

    /// Geometry limits handed to the reducer.
    pub fn layout_policy(&self) -> LayoutPolicy {
        LayoutPolicy {
            min_width: self.window.min_width,
            min_height: self.window.min_height,
            maximize_padding: self.window.maximize_padding,
            status_bar_height: self.window.status_bar_height,
            document_rect: self.window.document,
            icon_column: IconColumn {
                x: self.icons.x,
                top: self.icons.top,
                row_height: self.icons.row_height,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_config_matches_defaults() {
        let parsed = DesktopConfig::from_toml_str(DEFAULT_CONFIG_TOML).expect("embedded config");
        assert_eq!(parsed, DesktopConfig::default());
        assert_eq!(parsed.layout_policy(), LayoutPolicy::default());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let parsed = DesktopConfig::from_toml_str(
            r#"
            audio_enabled = false

            [window]
            min_width = 400
            "#,
        )
        .expect("partial config");

        assert!(!parsed.audio_enabled);
        assert_eq!(parsed.window.min_width, 400);
        assert_eq!(parsed.window.min_height, MIN_WINDOW_HEIGHT);
        assert_eq!(parsed.icons, IconLayoutConfig::default());
    }

    #[test]
    fn default_size_below_floor_is_rejected() {
        let err = DesktopConfig::from_toml_str(
            r#"
            [window]
            default_width = 100
            "#,
        )
        .expect_err("default width below the floor");

        assert!(matches!(
            err,
            ConfigError::BelowMinimum {
                field: "window.default_width",
                value: 100,
                min: MIN_WINDOW_WIDTH,
            }
        ));
    }

    #[test]
    fn non_positive_floor_and_malformed_toml_are_rejected() {
        let err = DesktopConfig::from_toml_str("[window]\nmin_height = 0\n").expect_err("zero");
        assert!(matches!(err, ConfigError::NonPositive { field: "window.min_height", .. }));

        let err = DesktopConfig::from_toml_str("audio_enabled = \"loud\"").expect_err("bad type");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
