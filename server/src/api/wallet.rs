use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult, AppState};
use crate::{
    account_id::{parse_account_id, AccountId, AccountIdError},
    wallet::{WalletBalance, WalletTier},
};

#[derive(Debug, Deserialize)]
pub(super) struct WalletRequest {
    public_key: String,
}

#[derive(Debug, Serialize)]
pub(super) struct WlxBalanceResponse {
    account_id: String,
    wlx_balance: Option<String>,
    has_wlx: bool,
    native_balance: String,
    timestamp: DateTime<Utc>,
}

fn invalid_key(e: AccountIdError) -> String {
    format!("Invalid Stellar public key format: {}", e)
}

/// Account id from a path segment; rejected with 400.
fn path_account_id(candidate: &str) -> ApiResult<AccountId> {
    parse_account_id(candidate.trim()).map_err(|e| ApiError::BadRequest(invalid_key(e)))
}

/// Account id from a request body field; rejected with 422.
pub(super) fn body_account_id(candidate: &str) -> ApiResult<AccountId> {
    parse_account_id(candidate.trim()).map_err(|e| ApiError::Unprocessable(invalid_key(e)))
}

pub(super) async fn wallet_balance(
    State(state): State<AppState>,
    Json(request): Json<WalletRequest>,
) -> ApiResult<Json<WalletBalance>> {
    let id = body_account_id(&request.public_key)?;
    Ok(Json(state.wallet.balances(&id).await?))
}

pub(super) async fn wlx_balance(
    State(state): State<AppState>,
    Path(candidate): Path<String>,
) -> ApiResult<Json<WlxBalanceResponse>> {
    let id = path_account_id(&candidate)?;
    let balances = state.wallet.balances(&id).await?;

    Ok(Json(WlxBalanceResponse {
        account_id: id.to_string(),
        wlx_balance: balances.wlx_balance,
        has_wlx: balances.has_wlx,
        native_balance: balances.native_balance,
        timestamp: Utc::now(),
    }))
}

pub(super) async fn wallet_tier(
    State(state): State<AppState>,
    Json(request): Json<WalletRequest>,
) -> ApiResult<Json<WalletTier>> {
    let id = body_account_id(&request.public_key)?;
    Ok(Json(state.wallet.tier(&id).await?))
}
