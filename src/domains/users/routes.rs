// Users domain routes
// 사용자 프로필/즐겨찾기 라우터
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use crate::domains::users::handlers::user_handler;
use crate::shared::clients::PROFILE_PICTURE_BODY_LIMIT;
use crate::shared::services::AppState;

/// Create users router
pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(user_handler::list_users))
        .route("/search", get(user_handler::search_users))
        .route("/username/:username", get(user_handler::get_user_by_username))
        .route("/:id", get(user_handler::get_user).patch(user_handler::update_user))
        .route(
            "/:id/profile-picture",
            post(user_handler::upload_profile_picture)
                .layer(DefaultBodyLimit::max(PROFILE_PICTURE_BODY_LIMIT)),
        )
        .route("/:id/favorites", get(user_handler::list_favorites))
        .route(
            "/:id/favorites/:item_id",
            post(user_handler::add_favorite).delete(user_handler::remove_favorite),
        )
}
