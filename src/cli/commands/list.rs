use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        Command, CommandResult,
        formatting::{format_header, format_player_list},
    },
    services::mpris::{BusDirectory, MediaBus, ProtocolVersion, strategy_for},
};

/// Command to list the players registered for one protocol version
pub struct ListCommand<B: MediaBus> {
    bus: Arc<B>,
    version: ProtocolVersion,
    json: bool,
}

impl<B: MediaBus> ListCommand<B> {
    /// Creates a new ListCommand
    pub fn new(bus: Arc<B>, version: ProtocolVersion, json: bool) -> Self {
        Self { bus, version, json }
    }
}

#[async_trait]
impl<B: MediaBus> Command for ListCommand<B> {
    /// Lists candidate players in bus order
    ///
    /// # Errors
    ///
    /// Returns CliError if the JSON output cannot be produced
    async fn execute(&self) -> CommandResult {
        let strategy = strategy_for(self.version);
        let candidates = BusDirectory::new(Arc::clone(&self.bus))
            .list_candidates(strategy.as_ref())
            .await;

        if self.json {
            return Ok(serde_json::to_string(&candidates)?);
        }

        if candidates.is_empty() {
            return Ok(format!("No {} media players found", self.version));
        }

        Ok(format!(
            "{}\n{}",
            format_header(&format!(
                "Found {} {} media player(s):",
                candidates.len(),
                self.version
            )),
            format_player_list(&candidates)
        ))
    }
}
