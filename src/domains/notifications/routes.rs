// Notifications domain routes
use axum::{routing::{delete, get, patch}, Router};
use crate::domains::notifications::handlers::notification_handler;
use crate::shared::services::AppState;

/// Create notifications router
pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification_handler::list_notifications))
        .route("/recent", get(notification_handler::recent_events))
        .route("/unread-count", get(notification_handler::unread_count))
        .route("/read-all", patch(notification_handler::mark_all_read))
        .route("/:id/read", patch(notification_handler::mark_read))
        .route("/:id", delete(notification_handler::delete_notification))
}
