use roulette_core::ConnectionId;
use thiserror::Error;

/// Failures local to one connection. Nothing here is fatal to the server;
/// the matchmaker loop logs and carries on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignalError {
    /// Lookup of an id that is not (or no longer) registered. Usually a
    /// stale reference racing a disconnect.
    #[error("unknown connection {0}")]
    NotFound(ConnectionId),

    /// A handshake message arrived for a connection with no active room,
    /// or stamped with a room the sender is not in. Dropped, never
    /// surfaced to any client.
    #[error("connection {0} is not in a room")]
    NotInRoom(ConnectionId),
}

pub type SignalResult<T> = Result<T, SignalError>;
