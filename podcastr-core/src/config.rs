use crate::error::{PodcastrError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const LOG_TARGET: &str = "podcastr::config";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodcastrConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Episode catalog JSON file shown in the episode list
    pub episodes_path: Option<PathBuf>,
}

/// Initial toggles of the playback store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub start_looping: bool,
    #[serde(default)]
    pub start_shuffling: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Played part of the progress slider
    #[serde(default = "default_track_color")]
    pub track_color: String,
    /// Remaining part of the progress slider
    #[serde(default = "default_rail_color")]
    pub rail_color: String,
    #[serde(default)]
    pub window: WindowConfig,
}

fn default_track_color() -> String {
    "#04d361".to_string()
}

fn default_rail_color() -> String {
    "#9f75ff".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            track_color: default_track_color(),
            rail_color: default_rail_color(),
            window: WindowConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
}

const fn default_window_width() -> u32 {
    1100
}

const fn default_window_height() -> u32 {
    720
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to `paths::log_file_path()`
    #[serde(default)]
    pub enabled: bool,
}

impl PodcastrConfig {
    /// Get the configuration directory path (~/.config/podcastr/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/podcastr/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from the default location or create a template on first run
    ///
    /// # Errors
    ///
    /// Returns [`PodcastrError::ConfigNotFound`] after writing the template,
    /// or an error if the file cannot be read, parsed or validated.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path())
    }

    /// Load config from `path`, writing the template there if it is missing
    ///
    /// # Errors
    ///
    /// Returns [`PodcastrError::ConfigNotFound`] after writing the template,
    /// or an error if the file cannot be read, parsed or validated.
    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if !path.exists() {
            // Create config directory if it doesn't exist
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(path, CONFIG_TEMPLATE)?;
            info!(target: LOG_TARGET, "Wrote config template to {}", path.display());

            return Err(PodcastrError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        Self::load_from_path(path)
    }

    /// Read, parse and validate the config file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!(target: LOG_TARGET, "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values that the TOML schema cannot express
    ///
    /// # Errors
    ///
    /// Returns [`PodcastrError::ConfigInvalid`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("ui.track_color", &self.ui.track_color),
            ("ui.rail_color", &self.ui.rail_color),
        ] {
            if Self::parse_color(value).is_none() {
                return Err(PodcastrError::ConfigInvalid {
                    message: format!("{field} must be #RRGGBB or #RRGGBBAA, got {value:?}"),
                });
            }
        }

        if self.ui.window.width == 0 || self.ui.window.height == 0 {
            return Err(PodcastrError::ConfigInvalid {
                message: "ui.window width and height must be non-zero".to_string(),
            });
        }

        Ok(())
    }

    /// Parse a hex color string to RGBA tuple
    #[must_use]
    pub fn parse_color(hex: &str) -> Option<(u8, u8, u8, u8)> {
        let hex = hex.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some((r, g, b, 255))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some((r, g, b, a))
            }
            _ => None,
        }
    }
}

const CONFIG_TEMPLATE: &str = r##"# Podcastr Configuration
# ~/.config/podcastr/config.toml

[catalog]
# Episode catalog in the podcast server JSON format ({ "episodes": [...] })
# episodes_path = "/path/to/server.json"

[player]
start_looping = false
start_shuffling = false

[ui]
track_color = "#04d361"
rail_color = "#9f75ff"

[ui.window]
width = 1100
height = 720

[logging]
# Also write logs to the cache directory
enabled = false
"##;
