use crate::domains::swaps::models::{
    SwapDecisionResponse, SwapHistoryResponse, SwapRequestCreated, SwapRequestsResponse,
};
use crate::shared::services::AppState;
use crate::shared::errors::SwapError;
use crate::shared::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// 스왑 요청 (크레딧 보류)
/// Request a swap; the item's credits are held until the owner decides
#[utoipa::path(
    post,
    path = "/api/swaps/items/{item_id}/request",
    params(("item_id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Swap requested", body = SwapRequestCreated),
        (status = 400, description = "Item not available, duplicate request, insufficient credits or pending limit reached"),
        (status = 401, description = "Unauthorized"),
        (status = 402, description = "Insufficient credits (items worth 1 credit or less)"),
        (status = 403, description = "You cannot swap or purchase your own items"),
        (status = 404, description = "item not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Swaps"
)]
pub async fn request_swap(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(item_id): Path<u64>,
) -> Result<Json<SwapRequestCreated>, (StatusCode, Json<serde_json::Value>)> {
    let created = app_state
        .swap_state
        .swap_service
        .request_swap(authenticated_user.user_id, item_id)
        .await
        .map_err(|e: SwapError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(created))
}

/// 승인 (소유자)
#[utoipa::path(
    post,
    path = "/api/swaps/items/{item_id}/requests/{request_id}/approve",
    params(
        ("item_id" = u64, Path, description = "Item ID"),
        ("request_id" = u64, Path, description = "Swap request ID")
    ),
    responses(
        (status = 200, description = "Swap approved", body = SwapDecisionResponse),
        (status = 400, description = "Request does not match item or is not pending"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the item owner can approve swap requests"),
        (status = 404, description = "Item or request not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Swaps"
)]
pub async fn approve_swap(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path((item_id, request_id)): Path<(u64, u64)>,
) -> Result<Json<SwapDecisionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let decision = app_state
        .swap_state
        .swap_service
        .approve(authenticated_user.user_id, item_id, request_id)
        .await
        .map_err(|e: SwapError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(decision))
}

/// 거절 (소유자)
#[utoipa::path(
    post,
    path = "/api/swaps/items/{item_id}/requests/{request_id}/reject",
    params(
        ("item_id" = u64, Path, description = "Item ID"),
        ("request_id" = u64, Path, description = "Swap request ID")
    ),
    responses(
        (status = 200, description = "Swap rejected, requester refunded", body = SwapDecisionResponse),
        (status = 400, description = "Request does not match item or is not pending"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the item owner can reject swap requests"),
        (status = 404, description = "Item or request not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Swaps"
)]
pub async fn reject_swap(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path((item_id, request_id)): Path<(u64, u64)>,
) -> Result<Json<SwapDecisionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let decision = app_state
        .swap_state
        .swap_service
        .reject(authenticated_user.user_id, item_id, request_id)
        .await
        .map_err(|e: SwapError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(decision))
}

/// 요청 취소 (요청자)
#[utoipa::path(
    post,
    path = "/api/swaps/items/{item_id}/cancel",
    params(("item_id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Swap request cancelled, credits refunded", body = SwapDecisionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No pending swap request found for this item")
    ),
    security(("BearerAuth" = [])),
    tag = "Swaps"
)]
pub async fn cancel_swap(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(item_id): Path<u64>,
) -> Result<Json<SwapDecisionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let decision = app_state
        .swap_state
        .swap_service
        .cancel(authenticated_user.user_id, item_id)
        .await
        .map_err(|e: SwapError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(decision))
}

#[utoipa::path(
    get,
    path = "/api/swaps/requests",
    responses(
        (status = 200, description = "Incoming pending requests and my own requests", body = SwapRequestsResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Swaps"
)]
pub async fn get_swap_requests(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<SwapRequestsResponse>, (StatusCode, Json<serde_json::Value>)> {
    let requests = app_state
        .swap_state
        .swap_service
        .requests_for(authenticated_user.user_id)
        .await
        .map_err(|e: SwapError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/api/swaps/history",
    responses(
        (status = 200, description = "Approved swaps, newest first", body = SwapHistoryResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Swaps"
)]
pub async fn get_swap_history(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<SwapHistoryResponse>, (StatusCode, Json<serde_json::Value>)> {
    let history = app_state
        .swap_state
        .swap_service
        .history_for(authenticated_user.user_id)
        .await
        .map_err(|e: SwapError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(history))
}
