use crate::domains::credits::models::{
    CreditAddResponse, CreditAmountRequest, CreditBalanceResponse, CreditDeductResponse,
    CreditTransactionsResponse,
};
use crate::shared::services::AppState;
use crate::shared::errors::CreditError;
use crate::shared::middleware::auth::AuthenticatedUser;
use axum::{extract::State, http::StatusCode, Json};

/// 잔액 조회 (원장 기준)
#[utoipa::path(
    get,
    path = "/api/credits/balance",
    responses(
        (status = 200, description = "Ledger balance", body = CreditBalanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Credits"
)]
pub async fn get_balance(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<CreditBalanceResponse>, (StatusCode, Json<serde_json::Value>)> {
    let balance = app_state
        .credit_state
        .credit_service
        .get_balance(authenticated_user.user_id)
        .await
        .map_err(|e: CreditError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(balance))
}

#[utoipa::path(
    post,
    path = "/api/credits/add",
    request_body = CreditAmountRequest,
    responses(
        (status = 200, description = "Credits added", body = CreditAddResponse),
        (status = 400, description = "Amount must be positive"),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Credits"
)]
pub async fn add_credits(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreditAmountRequest>,
) -> Result<Json<CreditAddResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .credit_state
        .credit_service
        .add_credits(authenticated_user.user_id, request.amount)
        .await
        .map_err(|e: CreditError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/credits/deduct",
    request_body = CreditAmountRequest,
    responses(
        (status = 200, description = "Credits deducted", body = CreditDeductResponse),
        (status = 400, description = "Non-positive amount or insufficient credits"),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Credits"
)]
pub async fn deduct_credits(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreditAmountRequest>,
) -> Result<Json<CreditDeductResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .credit_state
        .credit_service
        .deduct_credits(authenticated_user.user_id, request.amount)
        .await
        .map_err(|e: CreditError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 거래 내역
#[utoipa::path(
    get,
    path = "/api/credits/transactions",
    responses(
        (status = 200, description = "Ledger entries, newest first", body = CreditTransactionsResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Credits"
)]
pub async fn get_transactions(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<CreditTransactionsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let transactions = app_state
        .credit_state
        .credit_service
        .transactions(authenticated_user.user_id)
        .await
        .map_err(|e: CreditError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(CreditTransactionsResponse {
        user_id: authenticated_user.user_id,
        transactions,
    }))
}

#[utoipa::path(
    post,
    path = "/api/credits/sync",
    responses(
        (status = 200, description = "Cached balance recomputed from the ledger", body = CreditBalanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Credits"
)]
pub async fn sync_balance(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<CreditBalanceResponse>, (StatusCode, Json<serde_json::Value>)> {
    let balance = app_state
        .credit_state
        .credit_service
        .sync_balance(authenticated_user.user_id)
        .await
        .map_err(|e: CreditError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(balance))
}
