use std::{ops::ControlFlow, sync::Arc};

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::{
    BusDirectory, ControlPanel, Generation, LifecycleWatcher, MediaBus, OwnerChange, PlayerEvent,
    PlayerIdentity, PlayerSession, PlayerStatus, ProtocolStrategy, ProtocolVersion,
    SubscriptionManager, TrackMetadata, TransportCommand, UiCommand, format, lifecycle,
    strategy_for,
};

/// Everything the controller reacts to, delivered through one channel
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// Input from the user interface
    Ui(UiCommand),

    /// Notification from the bound player, stamped with its binding's generation
    Signal {
        /// Binding the notification was received under
        generation: Generation,
        /// Decoded notification
        event: PlayerEvent,
    },

    /// Bus-wide `NameOwnerChanged`
    OwnerChanged(OwnerChange),

    /// Stop the event loop
    Shutdown,
}

/// Whether the controller currently has a player session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No session; commands are dropped
    Disconnected,

    /// Session attached to the active player
    Connected,
}

/// Startup choices for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Protocol used for discovery and watching at startup
    pub protocol: ProtocolVersion,

    /// Player to attach to at startup instead of the first candidate
    pub player: Option<String>,

    /// Player name used when the bus lists no candidates
    pub fallback: String,

    /// Query status again after every play/pause toggle
    pub requery_status_after_toggle: bool,

    /// Print the `%key` placeholders the first player offers
    pub show_placeholders_on_connect: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            protocol: ProtocolVersion::V1,
            player: None,
            fallback: String::from("clementine"),
            requery_status_after_toggle: true,
            show_placeholders_on_connect: true,
        }
    }
}

/// Session controller tying discovery, the active player, its notifications and the UI
/// together
///
/// All state is owned here and mutated from one task only, so a rebind is never observed
/// half done.
pub struct Controller<B: MediaBus, P: ControlPanel> {
    bus: Arc<B>,
    panel: P,
    settings: ControllerSettings,
    strategy: Arc<dyn ProtocolStrategy>,
    directory: BusDirectory<B>,
    session: PlayerSession<B>,
    subscriptions: SubscriptionManager<B>,
    lifecycle: Option<LifecycleWatcher>,
    events: mpsc::UnboundedSender<ControllerEvent>,
    active: Option<PlayerIdentity>,
    status: PlayerStatus,
    metadata: TrackMetadata,
}

impl<B: MediaBus, P: ControlPanel> Controller<B, P> {
    /// Create a controller and the receiving end of its event channel
    pub fn new(
        bus: Arc<B>,
        panel: P,
        settings: ControllerSettings,
    ) -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        let controller = Self {
            directory: BusDirectory::new(Arc::clone(&bus)),
            session: PlayerSession::new(Arc::clone(&bus)),
            subscriptions: SubscriptionManager::new(Arc::clone(&bus), events.clone()),
            strategy: strategy_for(settings.protocol),
            lifecycle: None,
            events,
            active: None,
            status: PlayerStatus::default(),
            metadata: TrackMetadata::default(),
            bus,
            panel,
            settings,
        };

        (controller, receiver)
    }

    /// Sender for feeding UI commands and shutdown into the event loop
    pub fn sender(&self) -> mpsc::UnboundedSender<ControllerEvent> {
        self.events.clone()
    }

    /// Watch the bus, list candidates and attach to the initial player
    ///
    /// The initial player is the configured one, else the first candidate, else the
    /// fallback name.
    #[instrument(skip(self), fields(version = %self.strategy.version()))]
    pub async fn start(&mut self) {
        self.lifecycle = Some(LifecycleWatcher::start(&self.bus, self.events.clone()).await);

        let candidates = self.refresh_candidates().await;
        let name = self
            .settings
            .player
            .clone()
            .or_else(|| candidates.first().cloned())
            .unwrap_or_else(|| self.settings.fallback.clone());

        self.rebind(&name).await;

        if self.settings.show_placeholders_on_connect {
            self.show_placeholders().await;
        }
    }

    /// Process events until [`ControllerEvent::Shutdown`], then detach
    ///
    /// The controller holds a sender of its own, so the channel never closes while this runs.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<ControllerEvent>) -> P {
        while let Some(event) = events.recv().await {
            if self.handle_event(event).await.is_break() {
                break;
            }
        }

        self.teardown();
        info!("Controller stopped");
        self.panel
    }

    /// Dispatch one event
    pub async fn handle_event(&mut self, event: ControllerEvent) -> ControlFlow<()> {
        match event {
            ControllerEvent::Ui(command) => self.handle_command(command).await,
            ControllerEvent::Signal { generation, event } => {
                if self.subscriptions.is_current(generation) {
                    self.handle_player_event(event).await;
                } else {
                    debug!(generation, "Dropping notification from a released binding");
                }
            }
            ControllerEvent::OwnerChanged(change) => self.handle_owner_change(&change).await,
            ControllerEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Apply a player notification or lifecycle event
    pub async fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::TrackChanged(metadata) => {
                self.metadata = metadata;
                self.render_metadata();
            }
            PlayerEvent::StatusChanged(status) => {
                self.status = status;
                self.update_play_button();
            }
            PlayerEvent::PropertiesChanged(changes) => {
                if changes.touches_status() {
                    changes.apply_to(&mut self.status);
                    self.update_play_button();
                }
                if changes.reports_stopped() {
                    return;
                }
                if let Some(metadata) = changes.metadata {
                    self.metadata = metadata;
                    self.render_metadata();
                }
            }
            PlayerEvent::PlayerAppeared(identity) => {
                info!("Player {identity} appeared, switching to it");
                self.rebind(&identity.name).await;
            }
            PlayerEvent::PlayerVanished(identity) => {
                if self.session.identity() == Some(&identity) {
                    info!("Player {identity} left the bus");
                    self.teardown();
                }
            }
        }
    }

    /// Replace the active player with `name` under the current protocol version
    ///
    /// Releases the old binding and session before attaching the new ones, then fetches the
    /// new player's status so the play button and the toggle start from it.
    #[instrument(skip(self), fields(version = %self.strategy.version()))]
    pub async fn rebind(&mut self, name: &str) -> PlayerIdentity {
        self.teardown();

        let identity = self.session.connect(name, Arc::clone(&self.strategy));
        let generation = self
            .subscriptions
            .bind(&identity, self.strategy.as_ref())
            .await;
        debug!(generation, "Bound {identity}");

        self.active = Some(identity.clone());
        self.refresh_status().await;
        identity
    }

    /// Release the binding and session of the current player
    ///
    /// The active player name is remembered so a later reappearance can reattach.
    #[instrument(skip(self))]
    pub fn teardown(&mut self) -> Option<PlayerIdentity> {
        let identity = self.session.identity()?.clone();

        if !self.subscriptions.unbind(&identity) {
            warn!("No binding held for {identity}");
        }
        self.session.disconnect();
        self.status = PlayerStatus::default();
        self.metadata = TrackMetadata::default();
        self.update_play_button();

        Some(identity)
    }

    /// Re-list players for the current protocol version and publish them to the panel
    pub async fn refresh_candidates(&mut self) -> Vec<String> {
        let candidates = self.directory.list_candidates(self.strategy.as_ref()).await;
        self.panel.set_candidate_list(&candidates);
        candidates
    }

    /// Connection state
    pub fn state(&self) -> ControllerState {
        if self.session.is_connected() {
            ControllerState::Connected
        } else {
            ControllerState::Disconnected
        }
    }

    /// Player last selected, whether or not its session is still up
    pub fn active_player(&self) -> Option<&PlayerIdentity> {
        self.active.as_ref()
    }

    /// Protocol used for discovery and watching
    pub fn protocol(&self) -> ProtocolVersion {
        self.strategy.version()
    }

    /// Last-known player status
    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    /// Last-known track metadata
    pub fn metadata(&self) -> &TrackMetadata {
        &self.metadata
    }

    /// The UI collaborator
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// The UI collaborator, mutably
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    async fn handle_command(&mut self, command: UiCommand) {
        match command {
            UiCommand::Play => {
                let command = TransportCommand::toggle_for(&self.status);
                self.session.send_command(command).await;
                if self.settings.requery_status_after_toggle {
                    self.refresh_status().await;
                }
            }
            UiCommand::Stop => self.session.send_command(TransportCommand::Stop).await,
            UiCommand::Prev => self.session.send_command(TransportCommand::Prev).await,
            UiCommand::Next => self.session.send_command(TransportCommand::Next).await,
            UiCommand::SelectPlayer(name) => {
                self.rebind(&name).await;
            }
            UiCommand::ToggleVersion(is_v2) => {
                let version = ProtocolVersion::from_toggle(is_v2);
                info!("Protocol switched to {version}");
                self.strategy = strategy_for(version);
                self.refresh_candidates().await;
            }
            UiCommand::RefreshMetadata => match self.session.query_metadata().await {
                Ok(metadata) => {
                    self.metadata = metadata;
                    self.render_metadata();
                }
                Err(e) => warn!("Cannot fetch metadata: {e}"),
            },
            UiCommand::RefreshCandidates => {
                self.refresh_candidates().await;
            }
        }
    }

    async fn handle_owner_change(&mut self, change: &OwnerChange) {
        let version = self.strategy.version();
        let active_name = self
            .active
            .as_ref()
            .filter(|identity| identity.version == version)
            .map(|identity| identity.name.as_str());

        let event = lifecycle::classify(
            change,
            self.strategy.as_ref(),
            active_name,
            self.session.is_connected(),
        );
        match event {
            Some(PlayerEvent::PlayerAppeared(identity))
                if self.is_shadowed(&identity.name).await =>
            {
                debug!("{identity} is also registered under MPRIS2, not switching");
            }
            Some(event) => self.handle_player_event(event).await,
            None => {}
        }

        self.refresh_candidates().await;
    }

    async fn is_shadowed(&self, name: &str) -> bool {
        let Some(service) = self.strategy.shadowing_service(name) else {
            return false;
        };
        self.bus.name_has_owner(&service).await.unwrap_or(false)
    }

    async fn refresh_status(&mut self) {
        match self.session.query_status().await {
            Ok(status) => {
                self.status = status;
                self.update_play_button();
            }
            Err(e) => debug!("Cannot fetch status: {e}"),
        }
    }

    async fn show_placeholders(&mut self) {
        match self.session.query_metadata().await {
            Ok(metadata) => {
                for key in metadata.keys() {
                    self.panel.append_log_line(&format!("%{key}"));
                }
            }
            Err(e) => warn!("Cannot list metadata keys: {e}"),
        }
    }

    fn render_metadata(&mut self) {
        let template = self.panel.format_template();
        let line = format::render(&self.metadata, &template);
        self.panel.append_log_line(&line);
    }

    fn update_play_button(&mut self) {
        self.panel
            .set_play_button_label(self.status.play_button_label());
    }
}
