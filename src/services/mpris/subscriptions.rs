use std::{fmt, sync::Arc};

use futures::StreamExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, instrument, warn};

use super::{ControllerEvent, MediaBus, PlayerIdentity, ProtocolStrategy};

/// Player notification classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// v1 `TrackChange(a{sv})`
    TrackChange,

    /// v1 `StatusChange((iiii))`
    StatusChange,

    /// `org.freedesktop.DBus.Properties.PropertiesChanged`, used by MPRIS2
    PropertiesChanged,
}

impl SignalKind {
    /// Signal member name on the wire
    pub fn member(self) -> &'static str {
        match self {
            Self::TrackChange => "TrackChange",
            Self::StatusChange => "StatusChange",
            Self::PropertiesChanged => "PropertiesChanged",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.member())
    }
}

/// Monotonic tag identifying one binding; notifications carry the tag they were bound with
pub type Generation = u64;

struct Binding {
    identity: PlayerIdentity,
    generation: Generation,
    tasks: Vec<JoinHandle<()>>,
}

impl Binding {
    fn release(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

/// Binds player notifications to the controller's event channel
///
/// At most one player is bound at a time. Each binding gets a fresh generation, and
/// forwarded notifications are stamped with it so the controller can drop anything that
/// was in flight when the binding was released.
pub struct SubscriptionManager<B: MediaBus> {
    bus: Arc<B>,
    events: mpsc::UnboundedSender<ControllerEvent>,
    binding: Option<Binding>,
    next_generation: Generation,
}

impl<B: MediaBus> SubscriptionManager<B> {
    /// Create a manager forwarding into `events`
    pub fn new(bus: Arc<B>, events: mpsc::UnboundedSender<ControllerEvent>) -> Self {
        Self {
            bus,
            events,
            binding: None,
            next_generation: 0,
        }
    }

    /// Register for every notification class `strategy` uses on the player
    ///
    /// A previous binding still in place is released first. Failing registrations are
    /// logged; the others stay active.
    #[instrument(skip(self, identity, strategy), fields(player = %identity))]
    pub async fn bind(
        &mut self,
        identity: &PlayerIdentity,
        strategy: &dyn ProtocolStrategy,
    ) -> Generation {
        if let Some(stale) = self.binding.take() {
            warn!("Releasing binding for {} before rebinding", stale.identity);
            stale.release();
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let address = strategy.address_for(&identity.name);

        let mut tasks = Vec::with_capacity(strategy.signals().len());
        for &signal in strategy.signals() {
            match self.bus.subscribe(&address, signal).await {
                Ok(mut stream) => {
                    let events = self.events.clone();
                    tasks.push(tokio::spawn(async move {
                        while let Some(event) = stream.next().await {
                            if events
                                .send(ControllerEvent::Signal { generation, event })
                                .is_err()
                            {
                                break;
                            }
                        }
                        debug!("{signal} notifications ended");
                    }));
                }
                Err(e) => warn!("{e}"),
            }
        }

        self.binding = Some(Binding {
            identity: identity.clone(),
            generation,
            tasks,
        });
        generation
    }

    /// Release the binding for `identity`
    ///
    /// Returns `false` and leaves everything alone when `identity` is not the bound player.
    #[instrument(skip(self, identity), fields(player = %identity))]
    pub fn unbind(&mut self, identity: &PlayerIdentity) -> bool {
        match self.binding.take() {
            Some(binding) if binding.identity == *identity => {
                binding.release();
                true
            }
            other => {
                self.binding = other;
                false
            }
        }
    }

    /// Whether notifications stamped with `generation` belong to the current binding
    pub fn is_current(&self, generation: Generation) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|binding| binding.generation == generation)
    }
}

impl<B: MediaBus> Drop for SubscriptionManager<B> {
    fn drop(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.release();
        }
    }
}
