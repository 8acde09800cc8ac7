//! Entry point for the `rifa-gateway` HTTP server.

use std::sync::Arc;

use rifa_gateway::{
    config::GatewayConfig,
    routes::{create_router, AppState},
    store::TicketStore,
};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();

    let store = match TicketStore::open(config.state_path.clone()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to open ticket store");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(store, config.admin_password.clone()));
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, "rifa-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
