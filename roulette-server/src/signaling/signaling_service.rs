use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use roulette_core::{ConnectionId, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Per-connection outboxes. Sends go into an unbounded channel drained by
/// the connection's own write task, so matchmaking never waits on a slow
/// WebSocket.
#[derive(Clone, Default)]
pub struct SignalingService {
    connections: Arc<DashMap<ConnectionId, mpsc::UnboundedSender<Message>>>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.connections.insert(connection_id, tx);
    }

    pub fn detach(&self, connection_id: ConnectionId) {
        self.connections.remove(&connection_id);
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send(&self, connection_id: ConnectionId, message: ServerMessage) {
        let Some(outbox) = self.connections.get(&connection_id) else {
            warn!(%connection_id, "Attempted to send to a detached connection");
            return;
        };

        match serde_json::to_string(&message) {
            Ok(json) => {
                if outbox.send(Message::Text(json.into())).is_err() {
                    warn!(%connection_id, "Outbox closed; connection is going away");
                }
            }
            Err(e) => error!(%connection_id, error = %e, "Failed to serialize server message"),
        }
    }
}
