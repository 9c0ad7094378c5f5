use async_trait::async_trait;
use roulette_core::{ConnectionId, RoomId, ServerMessage};
use roulette_server::SignalingOutput;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// SignalingOutput that captures every outgoing message for verification.
#[derive(Clone)]
pub struct MockSignaling {
    /// Live feed of captured messages.
    tx: mpsc::UnboundedSender<(ConnectionId, ServerMessage)>,
    /// Everything sent so far.
    sent: Arc<Mutex<Vec<(ConnectionId, ServerMessage)>>>,
}

impl MockSignaling {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(ConnectionId, ServerMessage)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            sent: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    /// All messages delivered to one connection, in send order.
    pub async fn sent_to(&self, id: ConnectionId) -> Vec<ServerMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(to, _)| *to == id)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    /// The first pairing notification a connection received, if any.
    pub async fn pairing_for(&self, id: ConnectionId) -> Option<(RoomId, bool)> {
        self.sent.lock().await.iter().find_map(|(to, msg)| match msg {
            ServerMessage::Paired { room_id, initiator } if *to == id => {
                Some((*room_id, *initiator))
            }
            _ => None,
        })
    }

    pub async fn partner_left_count(&self, id: ConnectionId) -> usize {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(to, msg)| *to == id && matches!(msg, ServerMessage::PartnerLeft))
            .count()
    }
}

#[async_trait]
impl SignalingOutput for MockSignaling {
    async fn send(&self, connection_id: ConnectionId, message: ServerMessage) {
        tracing::debug!(%connection_id, ?message, "[MockSignaling] send");

        self.sent
            .lock()
            .await
            .push((connection_id, message.clone()));
        let _ = self.tx.send((connection_id, message));
    }
}
