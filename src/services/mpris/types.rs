use std::fmt;

use serde::{Deserialize, Serialize};

/// MPRIS protocol dialect spoken by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    /// Legacy `org.mpris.<name>` players exposing `/Player`
    #[default]
    V1,

    /// `org.mpris.MediaPlayer2.<name>` players
    V2,
}

impl ProtocolVersion {
    /// Version selected by the UI toggle
    pub fn from_toggle(is_v2: bool) -> Self {
        if is_v2 { Self::V2 } else { Self::V1 }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::V1 => write!(f, "v1"),
            ProtocolVersion::V2 => write!(f, "v2"),
        }
    }
}

/// A player as the controller knows it: protocol dialect plus bare player name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerIdentity {
    /// Protocol dialect
    pub version: ProtocolVersion,

    /// Bare player name, without the namespace prefix (e.g. `clementine`)
    pub name: String,
}

impl PlayerIdentity {
    /// Create an identity for a bare player name
    pub fn new(version: ProtocolVersion, name: impl Into<String>) -> Self {
        Self {
            version,
            name: name.into(),
        }
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

/// Where a player's remote object lives on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAddress {
    /// Well-known service name, e.g. `org.mpris.clementine`
    pub service: String,

    /// Object path, e.g. `/Player`
    pub path: &'static str,

    /// Interface carrying the transport methods
    pub interface: &'static str,
}

/// Current playback state of a media player
///
/// The integer values are the ones used by the v1 `StatusChange` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Player is stopped
    #[default]
    Stopped,
}

impl PlaybackState {
    /// Wire value of this state in the v1 status tuple
    pub fn to_wire(self) -> i32 {
        match self {
            Self::Playing => 0,
            Self::Paused => 1,
            Self::Stopped => 2,
        }
    }

    /// Decode a v1 wire value; anything unknown is treated as stopped
    pub fn from_wire(value: i32) -> Self {
        match value {
            0 => Self::Playing,
            1 => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

impl From<&str> for PlaybackState {
    fn from(status: &str) -> Self {
        match status {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

/// Wire form of [`PlayerStatus`]: the v1 `(iiii)` struct
pub type StatusTuple = (i32, i32, i32, i32);

/// Last-known player status
///
/// Replaced wholesale whenever a status notification arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStatus {
    /// Playing, paused, or stopped
    pub playback: PlaybackState,

    /// Shuffle enabled
    pub shuffle: bool,

    /// Current track repeats
    pub repeat_track: bool,

    /// Whole playlist repeats
    pub repeat_playlist: bool,
}

impl PlayerStatus {
    /// Encode as the v1 `(iiii)` tuple
    pub fn to_wire(&self) -> StatusTuple {
        (
            self.playback.to_wire(),
            i32::from(self.shuffle),
            i32::from(self.repeat_track),
            i32::from(self.repeat_playlist),
        )
    }

    /// Decode the v1 `(iiii)` tuple
    pub fn from_wire((play, shuffle, repeat, repeat_playlist): StatusTuple) -> Self {
        Self {
            playback: PlaybackState::from_wire(play),
            shuffle: shuffle != 0,
            repeat_track: repeat != 0,
            repeat_playlist: repeat_playlist != 0,
        }
    }

    /// Label for the play/pause button given this status
    pub fn play_button_label(&self) -> &'static str {
        match self.playback {
            PlaybackState::Playing => "||",
            _ => ">",
        }
    }
}

/// Transport commands a player session can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Stop playback
    Stop,

    /// Previous track
    Prev,

    /// Next track
    Next,
}

impl TransportCommand {
    /// Resolve the play/pause button into a concrete command using cached status
    ///
    /// Only a paused player is resumed; anything else gets a pause.
    pub fn toggle_for(status: &PlayerStatus) -> Self {
        if status.playback == PlaybackState::Paused {
            Self::Play
        } else {
            Self::Pause
        }
    }
}

/// One `NameOwnerChanged` notification from the bus daemon
///
/// Owners are empty strings when absent, matching the wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerChange {
    /// Bus name whose ownership changed
    pub name: String,

    /// Previous owner
    pub old_owner: String,

    /// New owner
    pub new_owner: String,
}

impl OwnerChange {
    /// Build an owner change from its three wire fields
    pub fn new(
        name: impl Into<String>,
        old_owner: impl Into<String>,
        new_owner: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            old_owner: old_owner.into(),
            new_owner: new_owner.into(),
        }
    }
}
