use std::sync::Arc;

use futures::StreamExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, instrument, warn};

use super::{
    ControllerEvent, MediaBus, OwnerChange, PlayerEvent, PlayerIdentity, ProtocolStrategy,
};

/// Watches bus name ownership and classifies changes into player appear/vanish events
pub struct LifecycleWatcher {
    task: Option<JoinHandle<()>>,
}

impl LifecycleWatcher {
    /// Subscribe to `NameOwnerChanged` and forward every change into `events`
    ///
    /// A failed subscription is logged and leaves the watcher inert.
    #[instrument(skip_all)]
    pub async fn start<B: MediaBus>(
        bus: &Arc<B>,
        events: mpsc::UnboundedSender<ControllerEvent>,
    ) -> Self {
        let mut changes = match bus.owner_changes().await {
            Ok(changes) => changes,
            Err(e) => {
                warn!("Cannot watch player lifecycle: {e}");
                return Self { task: None };
            }
        };

        info!("Watching bus name ownership");
        let task = tokio::spawn(async move {
            while let Some(change) = changes.next().await {
                if events.send(ControllerEvent::OwnerChanged(change)).is_err() {
                    break;
                }
            }
            debug!("Name ownership notifications ended");
        });

        Self { task: Some(task) }
    }
}

impl Drop for LifecycleWatcher {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Turn an ownership change into a lifecycle event for the controller
///
/// `active_name` is the bare name the user selected; `connected` tells whether a session
/// to it is currently up. A player appearing is reported when it is not the active one,
/// or when it is the active one and its session was torn down earlier. A player vanishing
/// is reported only when it is the active one. Names outside the strategy's namespace are
/// ignored.
pub fn classify(
    change: &OwnerChange,
    strategy: &dyn ProtocolStrategy,
    active_name: Option<&str>,
    connected: bool,
) -> Option<PlayerEvent> {
    let name = strategy.player_name(&change.name)?;
    let identity = || PlayerIdentity::new(strategy.version(), name);
    let is_active = active_name == Some(name);

    if change.new_owner.is_empty() {
        return is_active.then(|| PlayerEvent::PlayerVanished(identity()));
    }

    (!is_active || !connected).then(|| PlayerEvent::PlayerAppeared(identity()))
}
