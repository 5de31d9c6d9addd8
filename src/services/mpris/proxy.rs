#![allow(missing_docs)]

use std::collections::HashMap;
use zbus::{Result, proxy, zvariant::OwnedValue};

use super::StatusTuple;

/// Legacy MPRIS v1 player interface proxy
///
/// Exposed by v1 players on `/Player` under their `org.mpris.<name>` service. Transport
/// methods are not declared here; they go out without a reply through
/// [`MediaBus::call`](super::MediaBus::call).
#[proxy(
    interface = "org.freedesktop.MediaPlayer",
    default_path = "/Player",
    gen_blocking = false
)]
pub trait MediaPlayerV1 {
    /// Metadata of the current track
    fn get_metadata(&self) -> Result<HashMap<String, OwnedValue>>;

    /// Playback, shuffle, repeat and repeat-playlist flags
    fn get_status(&self) -> Result<StatusTuple>;

    /// Emitted with the new track's metadata
    #[zbus(signal)]
    fn track_change(&self, metadata: HashMap<String, OwnedValue>) -> Result<()>;

    /// Emitted whenever any of the status flags changes
    #[zbus(signal)]
    fn status_change(&self, status: StatusTuple) -> Result<()>;
}
