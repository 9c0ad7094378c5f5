use roulette_core::ConnectionId;
use std::collections::VecDeque;

/// Connections awaiting a partner, in arrival order. FIFO position is the
/// only pairing priority; there is no affinity or randomization.
#[derive(Debug, Default)]
pub struct WaitingPool {
    waiters: VecDeque<ConnectionId>,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the tail. Returns `false` (and changes nothing) if the
    /// connection is already waiting; duplicate enqueues are idempotent.
    pub fn enqueue(&mut self, id: ConnectionId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.waiters.push_back(id);
        true
    }

    /// Removes and returns the two longest-waiting connections, oldest
    /// first. `None` while fewer than two are waiting.
    pub fn dequeue_pair(&mut self) -> Option<(ConnectionId, ConnectionId)> {
        if self.waiters.len() < 2 {
            return None;
        }
        let first = self.waiters.pop_front()?;
        let second = self.waiters.pop_front()?;
        Some((first, second))
    }

    /// No-op when the connection is not in the pool.
    pub fn remove(&mut self, id: ConnectionId) {
        self.waiters.retain(|waiter| *waiter != id);
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.waiters.iter().any(|waiter| *waiter == id)
    }

    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }
}
