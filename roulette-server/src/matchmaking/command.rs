use roulette_core::{ConnectionId, RoomId, SignalKind};
use serde_json::Value;

/// Commands feeding the matchmaker actor, one per transport event. The
/// actor's mpsc preserves per-connection arrival order, which is all the
/// ordering the relay guarantees.
#[derive(Debug)]
pub enum MatchCommand {
    /// A WebSocket opened; register and enqueue the connection.
    Connect { connection_id: ConnectionId },

    /// Client supplied a display name.
    Join {
        connection_id: ConnectionId,
        name: String,
    },

    /// A handshake message to forward to the sender's partner.
    Relay {
        connection_id: ConnectionId,
        room_id: RoomId,
        kind: SignalKind,
        payload: Value,
    },

    /// Voluntary leave; the sender goes idle, the partner is requeued.
    Leave { connection_id: ConnectionId },

    /// Re-enter the waiting pool from idle.
    Requeue { connection_id: ConnectionId },

    /// The WebSocket closed.
    Disconnect { connection_id: ConnectionId },
}
