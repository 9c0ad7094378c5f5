use std::env;
use std::time::Duration;

/// Server configuration, read from the environment.
///
/// `PORT` and `CLIENT_URL` keep the names the deployment already uses;
/// `HANDSHAKE_TIMEOUT_SECS` is optional and enables the stale-room sweep.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// CORS allow-origin for the signaling endpoint. `None` allows any
    /// origin.
    pub client_url: Option<String>,
    pub matchmaker: MatchmakerConfig,
}

/// Policy knobs for the matchmaker actor.
#[derive(Debug, Clone)]
pub struct MatchmakerConfig {
    /// Close rooms whose offer was never answered after this long.
    /// `None` disables the sweep; core correctness does not depend on it.
    pub handshake_timeout: Option<Duration>,
    pub sweep_interval: Duration,
}

impl Default for MatchmakerConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: None,
            sweep_interval: Duration::from_secs(5),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            client_url: None,
            matchmaker: MatchmakerConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = env::var("PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!(%port, "Ignoring unparseable PORT"),
            }
        }

        config.client_url = env::var("CLIENT_URL").ok();

        if let Ok(secs) = env::var("HANDSHAKE_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => {
                    config.matchmaker.handshake_timeout = Some(Duration::from_secs(secs));
                }
                Err(_) => tracing::warn!(%secs, "Ignoring unparseable HANDSHAKE_TIMEOUT_SECS"),
            }
        }

        config
    }
}
