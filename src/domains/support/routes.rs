// Support domain routes
use axum::{routing::post, Router};
use crate::domains::support::handlers::support_handler;
use crate::shared::services::AppState;

/// POST /api/reports
pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/", post(support_handler::submit_report))
}

/// POST /api/contact
pub fn create_contact_router() -> Router<AppState> {
    Router::new().route("/", post(support_handler::submit_contact))
}
