use std::sync::{Arc, RwLock};

use signalhub::auth::{OriginPolicy, SessionGate};
use signalhub::config::load_config;
use signalhub::hub::Hub;
use signalhub::transport::websocket::{AppState, serve};
use signalhub::utils::error::ServerError;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    signalhub::utils::logging::init("info");

    if let Err(e) = run().await {
        error!("server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = load_config()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = Arc::new(AppState {
        hub: Arc::new(RwLock::new(Hub::new())),
        gate: SessionGate::new(config.auth.server_url.clone()),
        origins: OriginPolicy::new(config.auth.allowed_origins.clone()),
    });

    tokio::select! {
        res = serve(&addr, state) => {
            error!("WebSocket server exited unexpectedly.");
            res?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}
