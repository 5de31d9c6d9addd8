use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{CliError, Command, CommandResult},
    services::mpris::{
        BusDirectory, MediaBus, PlayerSession, ProtocolVersion, format, strategy_for,
    },
};

/// Command to render the current track of one player
pub struct NowPlayingCommand<B: MediaBus> {
    bus: Arc<B>,
    version: ProtocolVersion,
    player: Option<String>,
    template: String,
}

impl<B: MediaBus> NowPlayingCommand<B> {
    /// Creates a new NowPlayingCommand
    ///
    /// # Arguments
    ///
    /// * `player` - Player to query; the first candidate when `None`
    /// * `template` - Metadata template to render
    pub fn new(
        bus: Arc<B>,
        version: ProtocolVersion,
        player: Option<String>,
        template: String,
    ) -> Self {
        Self {
            bus,
            version,
            player,
            template,
        }
    }
}

#[async_trait]
impl<B: MediaBus> Command for NowPlayingCommand<B> {
    /// Fetches the player's metadata and renders it with the template
    ///
    /// # Errors
    ///
    /// Returns CliError if no player is available or its metadata cannot be fetched
    async fn execute(&self) -> CommandResult {
        let strategy = strategy_for(self.version);

        let name = match &self.player {
            Some(name) => name.clone(),
            None => BusDirectory::new(Arc::clone(&self.bus))
                .list_candidates(strategy.as_ref())
                .await
                .into_iter()
                .next()
                .ok_or_else(|| CliError::InvalidArgument {
                    arg: "player".to_string(),
                    reason: format!("No {} media players found", self.version),
                })?,
        };

        let mut session = PlayerSession::new(Arc::clone(&self.bus));
        session.connect(&name, strategy);

        session
            .ensure_alive()
            .await
            .map_err(|e| CliError::InvalidArgument {
                arg: "player".to_string(),
                reason: e.to_string(),
            })?;

        let metadata = session
            .query_metadata()
            .await
            .map_err(|e| CliError::ServiceError {
                service: "Media".to_string(),
                details: e.to_string(),
            })?;

        Ok(format::render(&metadata, &self.template))
    }
}
