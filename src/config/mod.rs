//! Configuration schema definitions and validation.
//!
//! Defines the configuration structure for mpris-panel: general settings, which
//! players to talk to, and how track metadata is displayed. All sections are
//! serializable to/from TOML format and default when absent.

mod display;
mod general;
mod loading;
mod paths;
mod player;

#[cfg(test)]
mod tests;

pub use display::{DEFAULT_TEMPLATE, DisplayConfig};
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use player::PlayerConfig;

use serde::{Deserialize, Serialize};

use crate::services::mpris::ControllerSettings;

/// Main configuration structure for mpris-panel.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Player selection and protocol settings.
    #[serde(default)]
    pub player: PlayerConfig,

    /// Metadata display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            protocol: config.player.protocol,
            player: None,
            fallback: config.player.fallback.clone(),
            requery_status_after_toggle: config.player.requery_status_after_toggle,
            show_placeholders_on_connect: config.display.show_placeholders_on_connect,
        }
    }
}
