//! Environment-driven gateway configuration.

use std::path::PathBuf;

/// Password accepted when `RIFA_ADMIN_PASSWORD` is not set.
///
/// Kept for drop-in compatibility with existing deployments; `from_env`
/// logs a warning whenever it is in use.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

/// Runtime configuration for the gateway, resolved once at startup.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
    /// Shared password that unlocks the admin session.
    pub admin_password: String,
    /// Snapshot file for ticket state; `None` keeps state in memory only.
    pub state_path: Option<PathBuf>,
}

impl GatewayConfig {
    /// Reads configuration from `RIFA_LISTEN_ADDR`, `RIFA_ADMIN_PASSWORD`,
    /// and `RIFA_STATE_PATH`, falling back to defaults where unset.
    #[must_use]
    pub fn from_env() -> Self {
        let listen_addr = std::env::var("RIFA_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_owned());
        let admin_password = std::env::var("RIFA_ADMIN_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_owned());
        let state_path = std::env::var("RIFA_STATE_PATH").ok().map(PathBuf::from);

        if admin_password == DEFAULT_ADMIN_PASSWORD {
            tracing::warn!("RIFA_ADMIN_PASSWORD not set; using the default admin password");
        }

        Self { listen_addr, admin_password, state_path }
    }
}
