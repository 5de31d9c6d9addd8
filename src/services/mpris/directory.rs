use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::{MediaBus, ProtocolStrategy};

/// Enumerates candidate players on the bus for one protocol dialect
pub struct BusDirectory<B: MediaBus> {
    bus: Arc<B>,
}

impl<B: MediaBus> BusDirectory<B> {
    /// Create a directory over `bus`
    pub fn new(bus: Arc<B>) -> Self {
        Self { bus }
    }

    /// Bare names of every player registered under the strategy's namespace
    ///
    /// Bus order is kept and duplicates are dropped. A bus failure yields an empty list.
    #[instrument(skip(self, strategy), fields(version = %strategy.version()))]
    pub async fn list_candidates(&self, strategy: &dyn ProtocolStrategy) -> Vec<String> {
        let names = match self.bus.list_names().await {
            Ok(names) => names,
            Err(e) => {
                warn!("Cannot list bus names: {e}");
                return Vec::new();
            }
        };

        let candidates = strategy.list_candidates(&names);
        debug!(count = candidates.len(), "Listed candidate players");
        candidates
    }
}
