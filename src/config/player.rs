use serde::{Deserialize, Serialize};

use crate::services::mpris::ProtocolVersion;

/// Which players to talk to and how.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Protocol used for discovery at startup.
    pub protocol: ProtocolVersion,

    /// Player attached to when the bus lists none.
    pub fallback: String,

    /// Ask the player for its status again after each play/pause toggle.
    pub requery_status_after_toggle: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolVersion::V1,
            fallback: "clementine".to_string(),
            requery_status_after_toggle: true,
        }
    }
}
