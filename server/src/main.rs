//! WLX wallet API server
//!
//! Usage:
//!   ASSET_ISSUER=G... wlx-server --listen 0.0.0.0:8001 --database-url /var/lib/wlx/records.db

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wlx_server::{
    api::{self, AppState},
    config, Config, DocumentStore, HorizonClient, WalletService,
};

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = config::load_env_file(None);
    let config = Config::parse();

    init_logging(&config.log_level);

    config.validate()?;
    let tracked = config.tracked_asset()?;

    info!("WLX wallet API starting");
    if let Some(path) = &env_file {
        info!("Loaded environment from {:?}", path);
    }
    info!("Horizon URL: {}", config.horizon_url);
    info!("Network: {}", config.network().as_str());
    info!("Tracked asset: {}:{}", tracked.code, tracked.issuer);

    let store = match &config.database_url {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            info!("Database: {:?}", path);
            DocumentStore::open(path)?
        }
        None => {
            info!("No DATABASE_URL set, keeping records in memory");
            DocumentStore::open_in_memory()?
        }
    };
    store.migrate()?;

    let horizon = HorizonClient::new(&config.horizon_url, config.request_timeout())?;
    let wallet = WalletService::new(Arc::new(horizon), tracked);
    let state = AppState::new(wallet, store, config.network());

    let cors = api::cors_layer(&config.origins())?;
    api::serve(config.listen, state, cors).await
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
