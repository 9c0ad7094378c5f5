pub mod config;
pub mod error;
pub mod matchmaking;
pub mod signaling;

pub use config::{MatchmakerConfig, ServerConfig};
pub use error::{SignalError, SignalResult};
pub use matchmaking::{MatchCommand, Matchmaker};
pub use signaling::{SignalingOutput, SignalingService, ws_handler};

use tokio::sync::mpsc;

/// Shared axum state: the outbox registry and the matchmaker's command
/// channel.
pub struct AppState {
    pub signaling: SignalingService,
    pub commands: mpsc::Sender<MatchCommand>,
}
