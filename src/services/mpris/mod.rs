/// D-Bus primitives and the zbus-backed implementation
pub mod bus;
/// Interface to the user interface collaborator
pub mod control_panel;
/// Session controller state machine
pub mod controller;
/// Candidate player enumeration
pub mod directory;
/// Media player error types
pub mod error;
/// Player notifications and lifecycle events
pub mod events;
/// Template rendering of track metadata
pub mod format;
/// Player appearance and disappearance tracking
pub mod lifecycle;
/// Track metadata types
pub mod metadata;
/// MPRIS v1 and v2 dialects
pub mod protocol;
/// D-Bus proxy trait definitions
pub mod proxy;
/// Connection to the active player
pub mod session;
/// Notification bindings for the active player
pub mod subscriptions;
/// Player identity and status types
pub mod types;

pub use bus::*;
pub use control_panel::*;
pub use controller::*;
pub use directory::*;
pub use error::*;
pub use events::*;
pub use lifecycle::LifecycleWatcher;
pub use metadata::{MetadataValue, TrackMetadata};
pub use protocol::*;
pub use proxy::*;
pub use session::*;
pub use subscriptions::*;
pub use types::*;
