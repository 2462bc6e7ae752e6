// Ratings domain routes
use axum::{routing::{get, post}, Router};
use crate::domains::ratings::handlers::rating_handler;
use crate::shared::services::AppState;

/// Create ratings router
pub fn create_rating_router() -> Router<AppState> {
    Router::new()
        .route("/:rated_user_id", post(rating_handler::rate_user))
        .route("/:rated_user_id/my-rating", get(rating_handler::get_my_rating))
        .route("/:rated_user_id/stats", get(rating_handler::get_rating_stats))
}
