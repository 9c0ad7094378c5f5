use crate::AppState;
use crate::matchmaking::MatchCommand;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use roulette_core::{ClientMessage, ConnectionId, SignalKind};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::new();
    info!(%connection_id, "New WebSocket connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.attach(connection_id, tx);
    if state
        .commands
        .send(MatchCommand::Connect { connection_id })
        .await
        .is_err()
    {
        error!("Matchmaker is gone; dropping new connection");
        state.signaling.detach(connection_id);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let commands = state.commands.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            let cmd = to_command(connection_id, client_msg);
                            if commands.send(cmd).await.is_err() {
                                error!("Matchmaker is gone");
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(%connection_id, error = %e, "Invalid client message")
                        }
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.signaling.detach(connection_id);
    let _ = state
        .commands
        .send(MatchCommand::Disconnect { connection_id })
        .await;
    info!(%connection_id, "WebSocket disconnected");
}

fn to_command(connection_id: ConnectionId, msg: ClientMessage) -> MatchCommand {
    match msg {
        ClientMessage::Join { name } => MatchCommand::Join {
            connection_id,
            name,
        },
        ClientMessage::Offer { room_id, payload } => MatchCommand::Relay {
            connection_id,
            room_id,
            kind: SignalKind::Offer,
            payload,
        },
        ClientMessage::Answer { room_id, payload } => MatchCommand::Relay {
            connection_id,
            room_id,
            kind: SignalKind::Answer,
            payload,
        },
        ClientMessage::Candidate { room_id, payload } => MatchCommand::Relay {
            connection_id,
            room_id,
            kind: SignalKind::Candidate,
            payload,
        },
        ClientMessage::Leave => MatchCommand::Leave { connection_id },
        ClientMessage::Requeue => MatchCommand::Requeue { connection_id },
    }
}
