use std::{fs, io::ErrorKind, path::Path};

use tracing::{debug, instrument};

use super::Config;
use crate::{PanelError, Result};

impl Config {
    /// Load configuration from `path`
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid TOML, or fails validation
    #[instrument]
    pub fn load(path: &Path) -> Result<Config> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No configuration file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(PanelError::io_at(&e, path)),
        };

        let config: Config =
            toml::from_str(&content).map_err(|e| PanelError::toml_parse(e, Some(path)))?;
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    /// Returns error if the string is not valid TOML or fails validation
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| PanelError::toml_parse(e, None))?;
        config.validate()?;

        Ok(config)
    }

    /// Check values serde cannot check
    ///
    /// # Errors
    /// Returns [`PanelError::InvalidConfigField`] for the first offending field
    pub fn validate(&self) -> Result<()> {
        let fallback = &self.player.fallback;
        if fallback.is_empty() || fallback.contains(char::is_whitespace) {
            return Err(PanelError::InvalidConfigField {
                field: "fallback".to_string(),
                component: "player".to_string(),
                reason: format!("'{fallback}' is not a player name"),
            });
        }

        if self.display.template.trim().is_empty() {
            return Err(PanelError::InvalidConfigField {
                field: "template".to_string(),
                component: "display".to_string(),
                reason: "template is empty".to_string(),
            });
        }

        Ok(())
    }
}
