// Items domain routes
// 아이템 도메인 라우터
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use crate::domains::items::handlers::item_handler;
use crate::shared::clients::ITEM_IMAGES_BODY_LIMIT;
use crate::shared::services::AppState;

/// Create items router
pub fn create_item_router() -> Router<AppState> {
    Router::new()
        .route("/", get(item_handler::list_items).post(item_handler::create_item))
        .route(
            "/:id",
            get(item_handler::get_item)
                .patch(item_handler::update_item)
                .delete(item_handler::delete_item),
        )
        .route(
            "/:id/images",
            post(item_handler::upload_item_images).layer(DefaultBodyLimit::max(ITEM_IMAGES_BODY_LIMIT)),
        )
        .route("/:id/lock", post(item_handler::lock_item))
        .route("/:id/unlock", post(item_handler::unlock_item))
}
