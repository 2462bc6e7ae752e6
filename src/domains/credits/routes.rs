// Credits domain routes
// 크레딧 도메인 라우터
use axum::{routing::{get, post}, Router};
use crate::domains::credits::handlers::credit_handler;
use crate::shared::services::AppState;

/// Create credits router
pub fn create_credit_router() -> Router<AppState> {
    Router::new()
        .route("/balance", get(credit_handler::get_balance))
        .route("/add", post(credit_handler::add_credits))
        .route("/deduct", post(credit_handler::deduct_credits))
        .route("/transactions", get(credit_handler::get_transactions))
        .route("/sync", post(credit_handler::sync_balance))
}
