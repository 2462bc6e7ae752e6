// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::{routing::get, Json, Router};
use serde_json::json;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::auth::routes::create_auth_router;
use crate::domains::users::routes::create_user_router;
use crate::domains::items::routes::create_item_router;
use crate::domains::swaps::routes::create_swaps_router;
use crate::domains::credits::routes::create_credit_router;
use crate::domains::notifications::routes::create_notification_router;
use crate::domains::ratings::routes::create_rating_router;
use crate::domains::support::routes::{create_contact_router, create_report_router};

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", create_auth_router())
        .nest("/api/users", create_user_router())
        .nest("/api/items", create_item_router())
        .nest("/api/swaps", create_swaps_router())
        .nest("/api/credits", create_credit_router())
        .nest("/api/notifications", create_notification_router())
        .nest("/api/ratings", create_rating_router())
        .nest("/api/reports", create_report_router())
        .nest("/api/contact", create_contact_router())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
