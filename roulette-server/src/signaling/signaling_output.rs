use async_trait::async_trait;
use roulette_core::{ConnectionId, ServerMessage};

/// Outbound side of the signaling transport. The matchmaker only knows this
/// trait; the WebSocket layer implements it, and tests substitute a mock
/// that records every message.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Deliver a message to one client. Must not block the caller on a slow
    /// client; implementations buffer per connection.
    async fn send(&self, connection_id: ConnectionId, message: ServerMessage);
}
