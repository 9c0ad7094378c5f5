use roulette_core::{ConnectionId, RoomId};
// Runtime clock, not wall clock; the stale-room sweep runs on tokio time.
use tokio::time::Instant;

/// A bounded two-party session. Exactly two distinct members for its whole
/// lifetime; when either one leaves the room is dropped, never kept around
/// half-empty.
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    /// The member told to produce the first offer.
    pub first: ConnectionId,
    pub second: ConnectionId,
    /// Set once an answer has been relayed; rooms that never get this far
    /// are eligible for the stale-room sweep.
    pub answered: bool,
    pub created_at: Instant,
}

impl Room {
    pub fn new(first: ConnectionId, second: ConnectionId) -> Self {
        debug_assert_ne!(first, second);
        Self {
            id: RoomId::new(),
            first,
            second,
            answered: false,
            created_at: Instant::now(),
        }
    }

    pub fn members(&self) -> [ConnectionId; 2] {
        [self.first, self.second]
    }

    pub fn partner_of(&self, id: ConnectionId) -> Option<ConnectionId> {
        if id == self.first {
            Some(self.second)
        } else if id == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}
