use crate::error::{SignalError, SignalResult};
use roulette_core::{ConnectionId, RoomId};
use std::collections::HashMap;

/// Where a connection currently sits in the pairing lifecycle.
///
/// A connection has a room if and only if it is paired, so the room
/// reference lives inside the variant rather than alongside a separate
/// state field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Waiting,
    Paired(RoomId),
}

/// One registered client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub name: Option<String>,
    pub state: ConnectionState,
}

impl Connection {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            name: None,
            state: ConnectionState::Idle,
        }
    }

    pub fn room_id(&self) -> Option<RoomId> {
        match self.state {
            ConnectionState::Paired(room_id) => Some(room_id),
            _ => None,
        }
    }
}

/// Owns every live connection. Rooms and the waiting pool only hold ids
/// and come back here to resolve them.
#[derive(Debug, Default)]
pub struct Registry {
    connections: HashMap<ConnectionId, Connection>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, connection: Connection) -> ConnectionId {
        let id = connection.id;
        self.connections.insert(id, connection);
        id
    }

    /// Removes and returns the connection so the caller can react to the
    /// state it was in (room teardown, pool removal).
    pub fn deregister(&mut self, id: ConnectionId) -> SignalResult<Connection> {
        self.connections
            .remove(&id)
            .ok_or(SignalError::NotFound(id))
    }

    pub fn lookup(&self, id: ConnectionId) -> SignalResult<&Connection> {
        self.connections.get(&id).ok_or(SignalError::NotFound(id))
    }

    pub fn lookup_mut(&mut self, id: ConnectionId) -> SignalResult<&mut Connection> {
        self.connections
            .get_mut(&id)
            .ok_or(SignalError::NotFound(id))
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
