use crate::domains::users::models::{
    FavoritesResponse, ProfilePictureUpload, ProfileUpdateRequest, UserListResponse, UserProfile,
    UserSearchQuery, UserSearchResponse,
};
use crate::shared::services::AppState;
use crate::shared::errors::UserError;
use crate::shared::middleware::auth::{AuthenticatedUser, MaybeAuthenticatedUser};
use crate::shared::utils::read_files;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

type ApiError = (StatusCode, Json<serde_json::Value>);

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All public profiles", body = UserListResponse)
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    viewer: MaybeAuthenticatedUser,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = app_state
        .user_state
        .user_service
        .list_users(viewer.user_id())
        .await
        .map_err(|e: UserError| -> ApiError { e.into() })?;

    Ok(Json(UserListResponse { users }))
}

/// 사용자 검색 (username / full_name)
#[utoipa::path(
    get,
    path = "/api/users/search",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "Matching users", body = UserSearchResponse),
        (status = 400, description = "Empty or too long query, or limit out of range")
    ),
    tag = "Users"
)]
pub async fn search_users(
    State(app_state): State<AppState>,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<UserSearchResponse>, ApiError> {
    let response = app_state
        .user_state
        .user_service
        .search_users(&query)
        .await
        .map_err(|e: UserError| -> ApiError { e.into() })?;

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/users/username/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "Public profile", body = UserProfile),
        (status = 404, description = "user not found")
    ),
    tag = "Users"
)]
pub async fn get_user_by_username(
    State(app_state): State<AppState>,
    viewer: MaybeAuthenticatedUser,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = app_state
        .user_state
        .user_service
        .get_by_username(&username, viewer.user_id())
        .await
        .map_err(|e: UserError| -> ApiError { e.into() })?;

    Ok(Json(profile))
}

/// 프로필 조회 (credits 는 본인에게만 보임)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Profile with favorites and rating stats", body = UserProfile),
        (status = 404, description = "user not found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    viewer: MaybeAuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = app_state
        .user_state
        .user_service
        .get_profile(id, viewer.user_id())
        .await
        .map_err(|e: UserError| -> ApiError { e.into() })?;

    Ok(Json(profile))
}

/// 설정 변경
/// Settings update; credits and email_verified cannot be changed here
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User ID")),
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 400, description = "No valid fields to update, or username taken"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "forbidden")
    ),
    security(("BearerAuth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = app_state
        .user_state
        .user_service
        .update_profile(authenticated_user.user_id, id, request)
        .await
        .map_err(|e: UserError| -> ApiError { e.into() })?;

    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/profile-picture",
    params(("id" = u64, Path, description = "User ID")),
    request_body(content = ProfilePictureUpload, content_type = "multipart/form-data", description = "Image in the `file` part"),
    responses(
        (status = 200, description = "Profile with the new picture", body = UserProfile),
        (status = 400, description = "Missing or invalid image"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "forbidden")
    ),
    security(("BearerAuth" = [])),
    tag = "Users"
)]
pub async fn upload_profile_picture(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
    mut multipart: Multipart,
) -> Result<Json<UserProfile>, ApiError> {
    let files = read_files(&mut multipart, "file")
        .await
        .map_err(|e| -> ApiError { UserError::from(e).into() })?;

    let profile = app_state
        .user_state
        .user_service
        .upload_profile_picture(authenticated_user.user_id, id, files)
        .await
        .map_err(|e: UserError| -> ApiError { e.into() })?;

    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/favorites",
    params(("id" = u64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Favorite item ids", body = FavoritesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "forbidden")
    ),
    security(("BearerAuth" = [])),
    tag = "Users"
)]
pub async fn list_favorites(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = app_state
        .user_state
        .user_service
        .list_favorites(authenticated_user.user_id, id)
        .await
        .map_err(|e: UserError| -> ApiError { e.into() })?;

    Ok(Json(FavoritesResponse {
        message: format!("{} favorite(s)", favorites.len()),
        favorites,
    }))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/favorites/{item_id}",
    params(
        ("id" = u64, Path, description = "User ID"),
        ("item_id" = u64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item added to favorites", body = FavoritesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "forbidden"),
        (status = 404, description = "item not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Users"
)]
pub async fn add_favorite(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path((id, item_id)): Path<(u64, u64)>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = app_state
        .user_state
        .user_service
        .add_favorite(authenticated_user.user_id, id, item_id)
        .await
        .map_err(|e: UserError| -> ApiError { e.into() })?;

    Ok(Json(FavoritesResponse {
        message: "Item added to favorites".to_string(),
        favorites,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/favorites/{item_id}",
    params(
        ("id" = u64, Path, description = "User ID"),
        ("item_id" = u64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item removed from favorites", body = FavoritesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "forbidden")
    ),
    security(("BearerAuth" = [])),
    tag = "Users"
)]
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path((id, item_id)): Path<(u64, u64)>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = app_state
        .user_state
        .user_service
        .remove_favorite(authenticated_user.user_id, id, item_id)
        .await
        .map_err(|e: UserError| -> ApiError { e.into() })?;

    Ok(Json(FavoritesResponse {
        message: "Item removed from favorites".to_string(),
        favorites,
    }))
}
