use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::{
    MediaBus, MediaError, PlayerAddress, PlayerIdentity, PlayerStatus, ProtocolStrategy,
    TrackMetadata, TransportCommand,
};

struct Remote {
    identity: PlayerIdentity,
    address: PlayerAddress,
    strategy: Arc<dyn ProtocolStrategy>,
}

/// The one remote player the controller is attached to
///
/// Connecting does not check that the player exists; commands check liveness first and
/// queries simply fail against a missing player.
pub struct PlayerSession<B: MediaBus> {
    bus: Arc<B>,
    current: Option<Remote>,
}

impl<B: MediaBus> PlayerSession<B> {
    /// Create a session with no player attached
    pub fn new(bus: Arc<B>) -> Self {
        Self { bus, current: None }
    }

    /// Attach to a player by bare name, replacing any previous one
    #[instrument(skip(self, strategy), fields(version = %strategy.version()))]
    pub fn connect(&mut self, name: &str, strategy: Arc<dyn ProtocolStrategy>) -> PlayerIdentity {
        let identity = PlayerIdentity::new(strategy.version(), name);
        let address = strategy.address_for(name);
        info!(service = %address.service, "Connecting to player");

        self.current = Some(Remote {
            identity: identity.clone(),
            address,
            strategy,
        });
        identity
    }

    /// Detach from the current player, returning who it was
    pub fn disconnect(&mut self) -> Option<PlayerIdentity> {
        let remote = self.current.take()?;
        debug!("Disconnected from {}", remote.identity);
        Some(remote.identity)
    }

    /// Player currently attached
    pub fn identity(&self) -> Option<&PlayerIdentity> {
        self.current.as_ref().map(|remote| &remote.identity)
    }

    /// Whether a player is attached
    pub fn is_connected(&self) -> bool {
        self.current.is_some()
    }

    /// Check that the attached player's bus name currently has an owner
    ///
    /// # Errors
    /// Returns [`MediaError::NotConnected`] without a player,
    /// [`MediaError::PlayerUnreachable`] when its name has no owner, or the bus failure
    pub async fn ensure_alive(&self) -> Result<&PlayerIdentity, MediaError> {
        let remote = self.current.as_ref().ok_or(MediaError::NotConnected)?;

        if self.bus.name_has_owner(&remote.address.service).await? {
            Ok(&remote.identity)
        } else {
            Err(MediaError::PlayerUnreachable(remote.identity.clone()))
        }
    }

    /// Whether the attached player's bus name currently has an owner
    ///
    /// Bus errors count as not alive.
    pub async fn is_alive(&self) -> bool {
        match self.ensure_alive().await {
            Ok(_) => true,
            Err(e @ (MediaError::NotConnected | MediaError::PlayerUnreachable(_))) => {
                debug!("{e}");
                false
            }
            Err(e) => {
                warn!("Cannot check player liveness: {e}");
                false
            }
        }
    }

    /// Issue a transport command, fire-and-forget
    ///
    /// Nothing is sent to a player that is not alive. Failures are logged, never returned.
    #[instrument(skip(self))]
    pub async fn send_command(&self, command: TransportCommand) {
        let Some(remote) = &self.current else {
            debug!("No player attached, dropping command");
            return;
        };

        if !self.is_alive().await {
            debug!("{} is not on the bus, dropping command", remote.identity);
            return;
        }

        let method = remote.strategy.method_for(command);
        if let Err(e) = self.bus.call(&remote.address, method).await {
            warn!("{method} on {} failed: {e}", remote.identity);
        }
    }

    /// Fetch the attached player's current metadata
    ///
    /// # Errors
    /// Returns [`MediaError::NotConnected`] without a player, or the bus failure
    pub async fn query_metadata(&self) -> Result<TrackMetadata, MediaError> {
        let remote = self.current.as_ref().ok_or(MediaError::NotConnected)?;
        remote
            .strategy
            .query_metadata(self.bus.as_ref(), &remote.address)
            .await
    }

    /// Fetch the attached player's current status
    ///
    /// # Errors
    /// Returns [`MediaError::NotConnected`] without a player, or the bus failure
    pub async fn query_status(&self) -> Result<PlayerStatus, MediaError> {
        let remote = self.current.as_ref().ok_or(MediaError::NotConnected)?;
        remote
            .strategy
            .query_status(self.bus.as_ref(), &remote.address)
            .await
    }
}
