use zbus::zvariant::Value;

use super::{
    PlaybackState, PlayerIdentity, PlayerStatus, TrackMetadata, metadata::metadata_from_value,
};

/// Loop setting reported by MPRIS2 players through `LoopStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// No looping
    None,

    /// Loop current track
    Track,

    /// Loop entire playlist
    Playlist,
}

impl From<&str> for LoopMode {
    fn from(status: &str) -> Self {
        match status {
            "Track" => Self::Track,
            "Playlist" => Self::Playlist,
            _ => Self::None,
        }
    }
}

/// Subset of player properties carried by one MPRIS2 `PropertiesChanged` signal
///
/// Every field is independent; any combination may be present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyChanges {
    /// New track metadata
    pub metadata: Option<TrackMetadata>,

    /// New playback state
    pub playback: Option<PlaybackState>,

    /// New shuffle flag
    pub shuffle: Option<bool>,

    /// New loop setting
    pub loop_mode: Option<LoopMode>,
}

impl PropertyChanges {
    /// Record one changed property; unknown names and mistyped values are skipped
    pub fn record(&mut self, name: &str, value: &Value<'_>) {
        let value = match value {
            Value::Value(inner) => inner.as_ref(),
            other => other,
        };

        match (name, value) {
            ("Metadata", value) => {
                self.metadata = metadata_from_value(value).map(TrackMetadata::with_short_keys);
            }
            ("PlaybackStatus", Value::Str(status)) => {
                self.playback = Some(PlaybackState::from(status.as_str()));
            }
            ("Shuffle", Value::Bool(shuffle)) => self.shuffle = Some(*shuffle),
            ("LoopStatus", Value::Str(status)) => {
                self.loop_mode = Some(LoopMode::from(status.as_str()));
            }
            _ => {}
        }
    }

    /// Whether nothing this controller cares about changed
    pub fn is_empty(&self) -> bool {
        self.metadata.is_none()
            && self.playback.is_none()
            && self.shuffle.is_none()
            && self.loop_mode.is_none()
    }

    /// Whether the change reports the player as stopped
    pub fn reports_stopped(&self) -> bool {
        self.playback == Some(PlaybackState::Stopped)
    }

    /// Whether any status field is present
    pub fn touches_status(&self) -> bool {
        self.playback.is_some() || self.shuffle.is_some() || self.loop_mode.is_some()
    }

    /// Fold the status fields present here into `status`
    pub fn apply_to(&self, status: &mut PlayerStatus) {
        if let Some(playback) = self.playback {
            status.playback = playback;
        }
        if let Some(shuffle) = self.shuffle {
            status.shuffle = shuffle;
        }
        if let Some(mode) = self.loop_mode {
            status.repeat_track = mode == LoopMode::Track;
            status.repeat_playlist = mode == LoopMode::Playlist;
        }
    }
}

/// Everything that can happen to the active player, dispatched through one handler
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// v1 `TrackChange`: full metadata of the new track
    TrackChanged(TrackMetadata),

    /// v1 `StatusChange`: full status
    StatusChanged(PlayerStatus),

    /// v2 `PropertiesChanged`: partial property map
    PropertiesChanged(PropertyChanges),

    /// A player showed up on the bus
    PlayerAppeared(PlayerIdentity),

    /// A player left the bus
    PlayerVanished(PlayerIdentity),
}
