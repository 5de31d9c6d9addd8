use std::{collections::HashSet, fmt, sync::Arc};

use async_trait::async_trait;

use super::{
    MediaBus, MediaError, PlayerAddress, PlayerStatus, ProtocolVersion, SignalKind,
    TrackMetadata, TransportCommand,
};

/// Service name prefix of MPRIS v1 players
pub const MPRIS1_PREFIX: &str = "org.mpris.";
/// Object path of the MPRIS v1 player object
pub const MPRIS1_PATH: &str = "/Player";
/// Interface carrying MPRIS v1 methods and signals
pub const MPRIS1_INTERFACE: &str = "org.freedesktop.MediaPlayer";

/// Service name prefix of MPRIS2 players
pub const MPRIS2_PREFIX: &str = "org.mpris.MediaPlayer2.";
/// Object path of the MPRIS2 player object
pub const MPRIS2_PATH: &str = "/org/mpris/MediaPlayer2";
/// Interface carrying MPRIS2 transport methods and player properties
pub const MPRIS2_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

/// Everything that differs between the two MPRIS dialects
///
/// The controller holds one strategy for discovery and watching and swaps it when the
/// user toggles the protocol version; each player session keeps the strategy of the
/// version it was connected with.
#[async_trait]
pub trait ProtocolStrategy: Send + Sync + fmt::Debug {
    /// Dialect this strategy speaks
    fn version(&self) -> ProtocolVersion;

    /// Namespace prefix of player service names
    fn service_prefix(&self) -> &'static str;

    /// Object path of the player object
    fn path(&self) -> &'static str;

    /// Interface carrying the transport methods
    fn interface(&self) -> &'static str;

    /// Bus method implementing a transport command
    fn method_for(&self, command: TransportCommand) -> &'static str;

    /// Notification classes a session of this dialect subscribes to
    fn signals(&self) -> &'static [SignalKind];

    /// Bare player name for a bus name, or `None` if the name is not in this namespace
    fn player_name<'a>(&self, bus_name: &'a str) -> Option<&'a str>;

    /// Service name that hides `name` from this dialect's candidates when it is registered
    fn shadowing_service(&self, _name: &str) -> Option<String> {
        None
    }

    /// Full service name for a bare player name
    fn service_name_for(&self, name: &str) -> String {
        format!("{}{name}", self.service_prefix())
    }

    /// Bus address of the player object for a bare player name
    fn address_for(&self, name: &str) -> PlayerAddress {
        PlayerAddress {
            service: self.service_name_for(name),
            path: self.path(),
            interface: self.interface(),
        }
    }

    /// Filter registered bus names into bare player names, in bus order, without duplicates
    fn list_candidates(&self, names: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        names
            .iter()
            .filter_map(|name| self.player_name(name))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    /// Fetch the current track's metadata
    async fn query_metadata(
        &self,
        bus: &dyn MediaBus,
        address: &PlayerAddress,
    ) -> Result<TrackMetadata, MediaError>;

    /// Fetch the current player status
    async fn query_status(
        &self,
        bus: &dyn MediaBus,
        address: &PlayerAddress,
    ) -> Result<PlayerStatus, MediaError>;
}

/// Legacy `org.mpris.<name>` players on `/Player`
#[derive(Debug, Clone, Copy, Default)]
pub struct V1Strategy;

#[async_trait]
impl ProtocolStrategy for V1Strategy {
    fn version(&self) -> ProtocolVersion {
        ProtocolVersion::V1
    }

    fn service_prefix(&self) -> &'static str {
        MPRIS1_PREFIX
    }

    fn path(&self) -> &'static str {
        MPRIS1_PATH
    }

    fn interface(&self) -> &'static str {
        MPRIS1_INTERFACE
    }

    fn method_for(&self, command: TransportCommand) -> &'static str {
        match command {
            TransportCommand::Play => "Play",
            TransportCommand::Pause => "Pause",
            TransportCommand::Stop => "Stop",
            TransportCommand::Prev => "Prev",
            TransportCommand::Next => "Next",
        }
    }

    fn signals(&self) -> &'static [SignalKind] {
        &[SignalKind::TrackChange, SignalKind::StatusChange]
    }

    fn player_name<'a>(&self, bus_name: &'a str) -> Option<&'a str> {
        if bus_name.starts_with(MPRIS2_PREFIX) {
            return None;
        }
        bus_name
            .strip_prefix(MPRIS1_PREFIX)
            .filter(|name| !name.is_empty())
    }

    fn shadowing_service(&self, name: &str) -> Option<String> {
        Some(V2Strategy.service_name_for(name))
    }

    /// A player registered under both namespaces belongs to the v2 list only
    fn list_candidates(&self, names: &[String]) -> Vec<String> {
        let v2_names: HashSet<&str> = names
            .iter()
            .filter_map(|name| V2Strategy.player_name(name))
            .collect();

        let mut seen = HashSet::new();
        names
            .iter()
            .filter_map(|name| self.player_name(name))
            .filter(|name| !v2_names.contains(name))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    async fn query_metadata(
        &self,
        bus: &dyn MediaBus,
        address: &PlayerAddress,
    ) -> Result<TrackMetadata, MediaError> {
        bus.legacy_metadata(address).await
    }

    async fn query_status(
        &self,
        bus: &dyn MediaBus,
        address: &PlayerAddress,
    ) -> Result<PlayerStatus, MediaError> {
        bus.legacy_status(address).await
    }
}

/// `org.mpris.MediaPlayer2.<name>` players
#[derive(Debug, Clone, Copy, Default)]
pub struct V2Strategy;

#[async_trait]
impl ProtocolStrategy for V2Strategy {
    fn version(&self) -> ProtocolVersion {
        ProtocolVersion::V2
    }

    fn service_prefix(&self) -> &'static str {
        MPRIS2_PREFIX
    }

    fn path(&self) -> &'static str {
        MPRIS2_PATH
    }

    fn interface(&self) -> &'static str {
        MPRIS2_INTERFACE
    }

    fn method_for(&self, command: TransportCommand) -> &'static str {
        match command {
            TransportCommand::Play => "Play",
            TransportCommand::Pause => "Pause",
            TransportCommand::Stop => "Stop",
            TransportCommand::Prev => "Previous",
            TransportCommand::Next => "Next",
        }
    }

    fn signals(&self) -> &'static [SignalKind] {
        &[SignalKind::PropertiesChanged]
    }

    fn player_name<'a>(&self, bus_name: &'a str) -> Option<&'a str> {
        bus_name
            .strip_prefix(MPRIS2_PREFIX)
            .filter(|name| !name.is_empty())
    }

    async fn query_metadata(
        &self,
        bus: &dyn MediaBus,
        address: &PlayerAddress,
    ) -> Result<TrackMetadata, MediaError> {
        let properties = bus.player_properties(address).await?;
        Ok(properties.metadata.unwrap_or_default())
    }

    async fn query_status(
        &self,
        bus: &dyn MediaBus,
        address: &PlayerAddress,
    ) -> Result<PlayerStatus, MediaError> {
        let properties = bus.player_properties(address).await?;
        let mut status = PlayerStatus::default();
        properties.apply_to(&mut status);
        Ok(status)
    }
}

/// Strategy for a protocol version
pub fn strategy_for(version: ProtocolVersion) -> Arc<dyn ProtocolStrategy> {
    match version {
        ProtocolVersion::V1 => Arc::new(V1Strategy),
        ProtocolVersion::V2 => Arc::new(V2Strategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered() -> Vec<String> {
        [
            "org.freedesktop.DBus",
            "org.mpris.foo",
            "org.mpris.MediaPlayer2.foo",
            "org.mpris.bar",
            ":1.42",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    #[test]
    fn v1_candidates_exclude_players_also_on_v2() {
        assert_eq!(V1Strategy.list_candidates(&registered()), vec!["bar"]);
    }

    #[test]
    fn v2_candidates_strip_the_namespace() {
        assert_eq!(V2Strategy.list_candidates(&registered()), vec!["foo"]);
    }

    #[test]
    fn candidates_keep_bus_order_and_drop_duplicates() {
        let names: Vec<String> = [
            "org.mpris.MediaPlayer2.vlc",
            "org.mpris.MediaPlayer2.mpv",
            "org.mpris.MediaPlayer2.vlc",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        assert_eq!(V2Strategy.list_candidates(&names), vec!["vlc", "mpv"]);
    }

    #[test]
    fn bare_prefixes_are_not_players() {
        assert_eq!(V1Strategy.player_name("org.mpris."), None);
        assert_eq!(V2Strategy.player_name("org.mpris.MediaPlayer2."), None);
        assert_eq!(V1Strategy.player_name("org.mpris.MediaPlayer2.vlc"), None);
        assert_eq!(V1Strategy.player_name("org.mpris.amarok"), Some("amarok"));
    }

    #[test]
    fn addresses_follow_the_wire_contract() {
        let v1 = V1Strategy.address_for("clementine");
        assert_eq!(v1.service, "org.mpris.clementine");
        assert_eq!(v1.path, "/Player");
        assert_eq!(v1.interface, "org.freedesktop.MediaPlayer");

        let v2 = V2Strategy.address_for("vlc");
        assert_eq!(v2.service, "org.mpris.MediaPlayer2.vlc");
        assert_eq!(v2.path, "/org/mpris/MediaPlayer2");
        assert_eq!(v2.interface, "org.mpris.MediaPlayer2.Player");
    }

    #[test]
    fn previous_track_method_differs_per_version() {
        assert_eq!(V1Strategy.method_for(TransportCommand::Prev), "Prev");
        assert_eq!(V2Strategy.method_for(TransportCommand::Prev), "Previous");
    }

    #[test]
    fn only_v1_players_can_be_shadowed() {
        assert_eq!(
            V1Strategy.shadowing_service("foo").as_deref(),
            Some("org.mpris.MediaPlayer2.foo")
        );
        assert_eq!(V2Strategy.shadowing_service("foo"), None);
    }

    #[test]
    fn strategy_for_matches_version() {
        assert_eq!(strategy_for(ProtocolVersion::V1).version(), ProtocolVersion::V1);
        assert_eq!(strategy_for(ProtocolVersion::V2).version(), ProtocolVersion::V2);
    }
}
