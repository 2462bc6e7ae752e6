// Swaps domain routes
// 스왑 요청 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::swaps::handlers::swap_handler;
use crate::shared::services::AppState;

/// Create swaps router
pub fn create_swaps_router() -> Router<AppState> {
    Router::new()
        .route("/items/:item_id/request", post(swap_handler::request_swap))
        .route(
            "/items/:item_id/requests/:request_id/approve",
            post(swap_handler::approve_swap),
        )
        .route(
            "/items/:item_id/requests/:request_id/reject",
            post(swap_handler::reject_swap),
        )
        .route("/items/:item_id/cancel", post(swap_handler::cancel_swap))
        .route("/requests", get(swap_handler::get_swap_requests))
        .route("/history", get(swap_handler::get_swap_history))
}
