use axum::{extract::State, Json};
use tracing::info;

use super::{wallet::body_account_id, ApiError, ApiResult, AppState};
use crate::records::{
    is_valid_amount, StatusCheck, StatusCheckCreate, TransactionCreate, TransactionRecord,
    LIST_LIMIT, STATUS_CHECKS, TRANSACTIONS,
};

pub(super) async fn create_status_check(
    State(state): State<AppState>,
    Json(request): Json<StatusCheckCreate>,
) -> ApiResult<Json<StatusCheck>> {
    let check = StatusCheck::new(request.client_name);
    state.store.insert(STATUS_CHECKS, &check.id, &check)?;

    Ok(Json(check))
}

pub(super) async fn list_status_checks(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<StatusCheck>>> {
    Ok(Json(state.store.list_all(STATUS_CHECKS, LIST_LIMIT)?))
}

pub(super) async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<TransactionCreate>,
) -> ApiResult<Json<TransactionRecord>> {
    let account_id = body_account_id(&request.account_id)?;
    if !is_valid_amount(&request.amount) {
        return Err(ApiError::Unprocessable(format!(
            "amount must be a non-negative decimal, got {:?}",
            request.amount
        )));
    }

    let default_asset = state.wallet.tracked_asset().code.clone();
    let record = TransactionRecord::deposit(account_id, request, &default_asset);
    state.store.insert(TRANSACTIONS, &record.id, &record)?;
    info!(
        "Recorded {} {} deposit for {}",
        record.amount, record.asset_code, record.account_id
    );

    Ok(Json(record))
}

pub(super) async fn list_transactions(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TransactionRecord>>> {
    Ok(Json(state.store.list_all(TRANSACTIONS, LIST_LIMIT)?))
}
