//! In-memory bus and recording panel shared by the integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use futures::{StreamExt, channel::mpsc};
use mpris_panel::services::mpris::{
    ControlPanel, Controller, ControllerEvent, EventStream, LoopMode, MediaBus, MediaError,
    OwnerChange, OwnerChangeStream, PlayerAddress, PlayerEvent, PlayerIdentity, PlayerStatus,
    PropertyChanges, ProtocolVersion, SignalKind, TrackMetadata,
};
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Default)]
struct State {
    names: Vec<String>,
    calls: Vec<(String, String)>,
    metadata: HashMap<String, TrackMetadata>,
    statuses: HashMap<String, PlayerStatus>,
    subscribers: Vec<(String, SignalKind, mpsc::UnboundedSender<PlayerEvent>)>,
    subscribe_calls: usize,
    owner_watchers: Vec<mpsc::UnboundedSender<OwnerChange>>,
    listing_fails: bool,
}

/// Session bus stand-in: registered names, canned replies, and hand-fired signals
#[derive(Default)]
pub struct FakeBus {
    state: Mutex<State>,
}

impl FakeBus {
    pub fn with_names(names: &[&str]) -> Arc<Self> {
        let bus = Self::default();
        for name in names {
            bus.register(name);
        }
        Arc::new(bus)
    }

    pub fn register(&self, service: &str) {
        self.state.lock().unwrap().names.push(service.to_string());
    }

    pub fn unregister(&self, service: &str) {
        self.state.lock().unwrap().names.retain(|name| name != service);
    }

    pub fn set_metadata(&self, service: &str, metadata: TrackMetadata) {
        let mut state = self.state.lock().unwrap();
        state.metadata.insert(service.to_string(), metadata);
    }

    pub fn set_status(&self, service: &str, status: PlayerStatus) {
        let mut state = self.state.lock().unwrap();
        state.statuses.insert(service.to_string(), status);
    }

    pub fn fail_listing(&self) {
        self.state.lock().unwrap().listing_fails = true;
    }

    /// Method calls received so far, as `(service, method)`
    pub fn calls(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of `subscribe` calls so far
    pub fn subscribe_calls(&self) -> usize {
        self.state.lock().unwrap().subscribe_calls
    }

    /// Fire a signal at every subscriber of `service` for `kind`
    pub fn emit(&self, service: &str, kind: SignalKind, event: PlayerEvent) {
        let state = self.state.lock().unwrap();
        for (subscribed, subscribed_kind, sender) in &state.subscribers {
            if subscribed == service && *subscribed_kind == kind {
                let _ = sender.unbounded_send(event.clone());
            }
        }
    }

    /// Subscribers of `service` whose receiving end is still alive
    pub fn live_subscriptions(&self, service: &str) -> usize {
        let state = self.state.lock().unwrap();
        state
            .subscribers
            .iter()
            .filter(|(subscribed, _, sender)| subscribed == service && !sender.is_closed())
            .count()
    }

    fn unreachable(service: &str) -> MediaError {
        MediaError::PlayerUnreachable(PlayerIdentity::new(ProtocolVersion::V1, service))
    }
}

#[async_trait]
impl MediaBus for FakeBus {
    async fn list_names(&self) -> Result<Vec<String>, MediaError> {
        let state = self.state.lock().unwrap();
        if state.listing_fails {
            return Err(MediaError::BusUnavailable("no session bus".to_string()));
        }
        Ok(state.names.clone())
    }

    async fn name_has_owner(&self, service: &str) -> Result<bool, MediaError> {
        let state = self.state.lock().unwrap();
        Ok(state.names.iter().any(|name| name == service))
    }

    async fn call(&self, address: &PlayerAddress, method: &str) -> Result<(), MediaError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push((address.service.clone(), method.to_string()));
        Ok(())
    }

    async fn legacy_metadata(&self, address: &PlayerAddress) -> Result<TrackMetadata, MediaError> {
        let state = self.state.lock().unwrap();
        state
            .metadata
            .get(&address.service)
            .cloned()
            .ok_or_else(|| Self::unreachable(&address.service))
    }

    async fn legacy_status(&self, address: &PlayerAddress) -> Result<PlayerStatus, MediaError> {
        let state = self.state.lock().unwrap();
        state
            .statuses
            .get(&address.service)
            .copied()
            .ok_or_else(|| Self::unreachable(&address.service))
    }

    async fn player_properties(
        &self,
        address: &PlayerAddress,
    ) -> Result<PropertyChanges, MediaError> {
        let state = self.state.lock().unwrap();
        if !state.names.contains(&address.service) {
            return Err(Self::unreachable(&address.service));
        }

        let status = state.statuses.get(&address.service);
        Ok(PropertyChanges {
            metadata: state.metadata.get(&address.service).cloned(),
            playback: status.map(|status| status.playback),
            shuffle: status.map(|status| status.shuffle),
            loop_mode: status.map(|status| {
                if status.repeat_track {
                    LoopMode::Track
                } else if status.repeat_playlist {
                    LoopMode::Playlist
                } else {
                    LoopMode::None
                }
            }),
        })
    }

    async fn subscribe(
        &self,
        address: &PlayerAddress,
        signal: SignalKind,
    ) -> Result<EventStream, MediaError> {
        let (sender, receiver) = mpsc::unbounded();
        let mut state = self.state.lock().unwrap();
        state.subscribe_calls += 1;
        state
            .subscribers
            .push((address.service.clone(), signal, sender));
        Ok(receiver.boxed())
    }

    async fn owner_changes(&self) -> Result<OwnerChangeStream, MediaError> {
        let (sender, receiver) = mpsc::unbounded();
        self.state.lock().unwrap().owner_watchers.push(sender);
        Ok(receiver.boxed())
    }
}

/// Panel that records everything the controller shows
#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub labels: Vec<String>,
    pub lines: Vec<String>,
    pub candidates: Vec<Vec<String>>,
    pub template: String,
}

impl RecordingPanel {
    pub fn with_template(template: &str) -> Self {
        Self {
            template: template.to_string(),
            ..Default::default()
        }
    }

    pub fn last_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    pub fn last_candidates(&self) -> Option<&[String]> {
        self.candidates.last().map(Vec::as_slice)
    }
}

impl ControlPanel for RecordingPanel {
    fn set_play_button_label(&mut self, label: &str) {
        self.labels.push(label.to_string());
    }

    fn append_log_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn set_candidate_list(&mut self, names: &[String]) {
        self.candidates.push(names.to_vec());
    }

    fn format_template(&self) -> String {
        self.template.clone()
    }
}

/// Let spawned forwarding tasks run
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Deliver everything queued for the controller
pub async fn drain(
    controller: &mut Controller<FakeBus, RecordingPanel>,
    events: &mut UnboundedReceiver<ControllerEvent>,
) {
    settle().await;
    while let Ok(event) = events.try_recv() {
        controller.handle_event(event).await;
        settle().await;
    }
}

pub fn metadata(entries: &[(&str, &str)]) -> TrackMetadata {
    entries.iter().copied().collect()
}
