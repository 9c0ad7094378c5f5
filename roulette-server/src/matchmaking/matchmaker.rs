use crate::config::MatchmakerConfig;
use crate::error::{SignalError, SignalResult};
use crate::matchmaking::command::MatchCommand;
use crate::matchmaking::registry::{Connection, ConnectionState, Registry};
use crate::matchmaking::room::Room;
use crate::matchmaking::waiting_pool::WaitingPool;
use crate::signaling::SignalingOutput;
use roulette_core::{ConnectionId, RoomId, ServerMessage, SignalKind};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The single task owning all pairing state: registry, waiting pool and
/// room table. Every mutation flows through its command channel, so a relay
/// racing a teardown observes either the fully-paired or the fully-closed
/// state, never anything in between.
pub struct Matchmaker {
    registry: Registry,
    pool: WaitingPool,
    rooms: HashMap<RoomId, Room>,
    command_rx: mpsc::Receiver<MatchCommand>,
    output: Arc<dyn SignalingOutput>,
    config: MatchmakerConfig,
}

impl Matchmaker {
    pub fn new(
        config: MatchmakerConfig,
        command_rx: mpsc::Receiver<MatchCommand>,
        output: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            registry: Registry::new(),
            pool: WaitingPool::new(),
            rooms: HashMap::new(),
            command_rx,
            output,
            config,
        }
    }

    pub async fn run(mut self) {
        info!("Matchmaker event loop started");

        let mut sweep = tokio::time::interval(self.config.sweep_interval);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd).await,
                        None => {
                            info!("Command channel closed. Shutting down matchmaker.");
                            break;
                        }
                    }
                }

                _ = sweep.tick(), if self.config.handshake_timeout.is_some() => {
                    self.sweep_stale_rooms().await;
                }
            }
        }

        info!("Matchmaker event loop finished");
    }

    async fn handle_command(&mut self, cmd: MatchCommand) {
        let result = match cmd {
            MatchCommand::Connect { connection_id } => {
                self.connect(connection_id).await;
                Ok(())
            }
            MatchCommand::Join {
                connection_id,
                name,
            } => self.join(connection_id, name),
            MatchCommand::Relay {
                connection_id,
                room_id,
                kind,
                payload,
            } => self.relay(connection_id, room_id, kind, payload).await,
            MatchCommand::Leave { connection_id } => self.leave(connection_id).await,
            MatchCommand::Requeue { connection_id } => self.requeue(connection_id).await,
            MatchCommand::Disconnect { connection_id } => self.disconnect(connection_id).await,
        };

        match result {
            Ok(()) => {}
            Err(SignalError::NotInRoom(id)) => {
                debug!(%id, "Dropped handshake message from connection outside a room");
            }
            Err(SignalError::NotFound(id)) => {
                warn!(%id, "Stale reference to unknown connection");
            }
        }
    }

    async fn connect(&mut self, id: ConnectionId) {
        self.registry.register(Connection::new(id));
        info!(%id, "Connection registered");

        self.output
            .send(id, ServerMessage::Welcome { connection_id: id })
            .await;

        self.enqueue_waiter(id).await;
    }

    fn join(&mut self, id: ConnectionId, name: String) -> SignalResult<()> {
        let conn = self.registry.lookup_mut(id)?;
        info!(%id, %name, "Connection joined");
        conn.name = Some(name);
        Ok(())
    }

    async fn relay(
        &mut self,
        sender: ConnectionId,
        room_id: RoomId,
        kind: SignalKind,
        payload: Value,
    ) -> SignalResult<()> {
        let conn = self.registry.lookup(sender)?;
        if conn.room_id() != Some(room_id) {
            return Err(SignalError::NotInRoom(sender));
        }

        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(SignalError::NotInRoom(sender))?;
        let partner = room
            .partner_of(sender)
            .ok_or(SignalError::NotInRoom(sender))?;

        if kind == SignalKind::Answer {
            room.answered = true;
        }

        debug!(%sender, %partner, ?kind, "Relaying handshake message");
        self.output.send(partner, kind.into_server_message(payload)).await;
        Ok(())
    }

    async fn leave(&mut self, id: ConnectionId) -> SignalResult<()> {
        let conn = self.registry.lookup_mut(id)?;
        let ConnectionState::Paired(room_id) = conn.state else {
            // Leave outside a room changes nothing.
            return Ok(());
        };
        conn.state = ConnectionState::Idle;

        info!(%id, %room_id, "Connection left its room");
        self.close_room(room_id, Some(id)).await;
        Ok(())
    }

    async fn requeue(&mut self, id: ConnectionId) -> SignalResult<()> {
        let conn = self.registry.lookup(id)?;
        if let ConnectionState::Paired(_) = conn.state {
            // Still in a room; a Leave has to come first.
            return Ok(());
        }

        self.enqueue_waiter(id).await;
        Ok(())
    }

    async fn disconnect(&mut self, id: ConnectionId) -> SignalResult<()> {
        let conn = self.registry.deregister(id)?;
        info!(%id, "Connection deregistered");

        match conn.state {
            ConnectionState::Waiting => self.pool.remove(id),
            ConnectionState::Paired(room_id) => self.close_room(room_id, Some(id)).await,
            ConnectionState::Idle => {}
        }
        Ok(())
    }

    /// Marks the connection as waiting, appends it to the pool and runs the
    /// edge-triggered pairing attempt.
    async fn enqueue_waiter(&mut self, id: ConnectionId) {
        if let Ok(conn) = self.registry.lookup_mut(id) {
            conn.state = ConnectionState::Waiting;
        }
        if self.pool.enqueue(id) {
            self.try_pair().await;
        }
    }

    /// Pairs greedily while two or more waiters are queued. The loop matters
    /// for room closures that requeue both members at once.
    async fn try_pair(&mut self) {
        while let Some((first, second)) = self.pool.dequeue_pair() {
            let room = Room::new(first, second);
            let room_id = room.id;

            for member in room.members() {
                if let Ok(conn) = self.registry.lookup_mut(member) {
                    conn.state = ConnectionState::Paired(room_id);
                }
            }
            self.rooms.insert(room_id, room);
            info!(%room_id, %first, %second, "Paired two waiters");

            self.output
                .send(
                    first,
                    ServerMessage::Paired {
                        room_id,
                        initiator: true,
                    },
                )
                .await;
            self.output
                .send(
                    second,
                    ServerMessage::Paired {
                        room_id,
                        initiator: false,
                    },
                )
                .await;
        }
    }

    /// Closes a room and requeues every member still registered, except the
    /// one that is departing. `PartnerLeft` goes out before the requeue so
    /// the client can reset its session before the next pairing arrives.
    async fn close_room(&mut self, room_id: RoomId, departing: Option<ConnectionId>) {
        let Some(room) = self.rooms.remove(&room_id) else {
            return;
        };
        info!(%room_id, "Room closed");

        let mut requeued = false;
        for member in room.members() {
            if Some(member) == departing || !self.registry.contains(member) {
                continue;
            }

            self.output.send(member, ServerMessage::PartnerLeft).await;
            if let Ok(conn) = self.registry.lookup_mut(member) {
                conn.state = ConnectionState::Waiting;
            }
            self.pool.enqueue(member);
            requeued = true;
        }

        if requeued {
            self.try_pair().await;
        }
    }

    /// Drops rooms whose offer was never answered within the configured
    /// timeout. Both members are notified and requeued; with an empty pool
    /// they will simply pair up again with a fresh timeout window.
    async fn sweep_stale_rooms(&mut self) {
        let Some(timeout) = self.config.handshake_timeout else {
            return;
        };

        let stale: Vec<RoomId> = self
            .rooms
            .values()
            .filter(|room| !room.answered && room.created_at.elapsed() >= timeout)
            .map(|room| room.id)
            .collect();

        for room_id in stale {
            warn!(%room_id, "Closing room with no answered offer");
            self.close_room(room_id, None).await;
        }
    }
}
