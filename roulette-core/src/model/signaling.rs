use crate::model::connection::ConnectionId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which half of the peer handshake a relayed message carries.
///
/// The server never looks inside the payload; the kind only decides which
/// outbound variant the partner receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

/// Messages a client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ClientMessage {
    /// Attach a display name to the connection. Never validated for
    /// uniqueness.
    Join { name: String },
    /// Session offer for the partner in `room_id`.
    Offer { room_id: RoomId, payload: Value },
    /// Session answer for the partner in `room_id`.
    Answer { room_id: RoomId, payload: Value },
    /// One connectivity candidate; may repeat any number of times in any
    /// order relative to offer/answer.
    Candidate { room_id: RoomId, payload: Value },
    /// Leave the current room voluntarily and go idle.
    Leave,
    /// Re-enter the waiting pool from idle.
    Requeue,
}

/// Messages the server sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ServerMessage {
    /// Sent once right after the connection is registered.
    Welcome { connection_id: ConnectionId },
    /// A room formed. The initiator is expected to produce the first offer;
    /// the other member waits for it.
    Paired { room_id: RoomId, initiator: bool },
    Offer { payload: Value },
    Answer { payload: Value },
    Candidate { payload: Value },
    /// The other room member disconnected or left; discard any in-progress
    /// peer connection and await re-pairing.
    PartnerLeft,
}

impl SignalKind {
    pub fn into_server_message(self, payload: Value) -> ServerMessage {
        match self {
            SignalKind::Offer => ServerMessage::Offer { payload },
            SignalKind::Answer => ServerMessage::Answer { payload },
            SignalKind::Candidate => ServerMessage::Candidate { payload },
        }
    }
}
