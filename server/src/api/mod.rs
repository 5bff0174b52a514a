//! HTTP API
//!
//! Endpoints:
//! - GET  /api/                          liveness message
//! - GET  /api/health                    service status
//! - POST /api/status                    record a client check-in
//! - GET  /api/status                    list check-ins
//! - POST /api/wallet/balance            all balances of an account
//! - GET  /api/wallet/{account_id}/wlx   tracked-asset balance only
//! - POST /api/wallet/tier               tracked-asset balance and reward tier
//! - POST /api/transactions              record a deposit
//! - GET  /api/transactions              list deposits

mod error;
mod records;
mod wallet;

pub use error::{ApiError, ApiResult, ErrorResponse};

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    extract::State,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::info;

use crate::{config::Network, store::DocumentStore, wallet::WalletService};

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "whiplash-xlm-bot-api";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub wallet: Arc<WalletService>,
    pub store: DocumentStore,
    pub network: Network,
}

impl AppState {
    pub fn new(wallet: WalletService, store: DocumentStore, network: Network) -> Self {
        Self {
            wallet: Arc::new(wallet),
            store,
            network,
        }
    }
}

/// Build the API router without transport layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/health", get(health))
        .route(
            "/api/status",
            post(records::create_status_check).get(records::list_status_checks),
        )
        .route("/api/wallet/balance", post(wallet::wallet_balance))
        .route("/api/wallet/:account_id/wlx", get(wallet::wlx_balance))
        .route("/api/wallet/tier", post(wallet::wallet_tier))
        .route(
            "/api/transactions",
            post(records::create_transaction).get(records::list_transactions),
        )
        .with_state(state)
}

/// CORS policy for the configured origins.
///
/// Credentials are always allowed, so nothing is answered with a literal
/// wildcard: a `*` entry mirrors the request origin, and methods and headers
/// always mirror the preflight request.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|e| anyhow::anyhow!("invalid CORS origin {:?}: {}", origin, e))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Serve the API on `addr` until the process stops.
pub async fn serve(addr: SocketAddr, state: AppState, cors: CorsLayer) -> Result<()> {
    let app = router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "WhiplashXLM Bot API - Ready to track WLX assets!" }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "service": SERVICE_NAME,
        "stellar_network": state.network.as_str(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_wildcard() {
        assert!(cors_layer(&["*".to_string()]).is_ok());
    }

    #[test]
    fn test_cors_explicit_origins() {
        let origins = vec![
            "https://app.example".to_string(),
            "http://localhost:3000".to_string(),
        ];
        assert!(cors_layer(&origins).is_ok());
    }

    #[test]
    fn test_cors_rejects_invalid_origin() {
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    }
}
