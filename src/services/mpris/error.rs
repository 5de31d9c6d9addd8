use super::PlayerIdentity;

/// Errors that can occur while talking to media players over the session bus
#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    /// No session bus connection could be established at startup
    #[error("Session bus unavailable: {0}")]
    BusUnavailable(String),

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Error reported by a standard `org.freedesktop.DBus` interface
    #[error("D-Bus interface call failed: {0}")]
    FdoError(#[from] zbus::fdo::Error),

    /// The player's bus name currently has no owner
    #[error("Player {0} is not reachable")]
    PlayerUnreachable(PlayerIdentity),

    /// An operation needed a player session but none is connected
    #[error("No player session is connected")]
    NotConnected,

    /// A reply or signal did not have the expected shape
    #[error("Malformed payload for {member}: {details}")]
    MalformedPayload {
        /// Method, signal, or property whose payload was rejected
        member: String,
        /// What was wrong with it
        details: String,
    },

    /// Registering for a player notification failed
    #[error("Failed to subscribe to {signal} on {service}: {details}")]
    SubscriptionFailed {
        /// Signal member name
        signal: String,
        /// Bus service the subscription targeted
        service: String,
        /// Underlying failure
        details: String,
    },
}
