use serde::{Deserialize, Serialize};

/// Default metadata template.
pub const DEFAULT_TEMPLATE: &str = "%artist - %title [%time]";

/// How track metadata is shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Template with `%key` placeholders rendered on every track change.
    pub template: String,

    /// List the placeholders the first player offers right after connecting.
    pub show_placeholders_on_connect: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            show_placeholders_on_connect: true,
        }
    }
}
