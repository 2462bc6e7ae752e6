use crate::domains::items::models::{
    Item, ItemCreate, ItemFilter, ItemImagesUpload, ItemLockResponse, ItemUpdate,
};
use crate::domains::items::services::LOCK_DURATION_HOURS;
use crate::shared::services::AppState;
use crate::shared::errors::ItemError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::utils::read_files;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

type ApiError = (StatusCode, Json<serde_json::Value>);

/// 아이템 등록
/// Create a listing (awards 1 credit)
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = ItemCreate,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid title or credits"),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Items"
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<ItemCreate>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = app_state
        .item_state
        .item_service
        .create_item(authenticated_user.user_id, request)
        .await
        .map_err(|e: ItemError| -> ApiError { e.into() })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// 아이템 목록 (필터/정렬/페이지)
#[utoipa::path(
    get,
    path = "/api/items",
    params(ItemFilter),
    responses(
        (status = 200, description = "Filtered listings", body = [Item])
    ),
    tag = "Items"
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    Query(filter): Query<ItemFilter>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let items = app_state
        .item_state
        .item_service
        .list_items(&filter)
        .await
        .map_err(|e: ItemError| -> ApiError { e.into() })?;

    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item", body = Item),
        (status = 404, description = "item not found")
    ),
    tag = "Items"
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Item>, ApiError> {
    let item = app_state
        .item_state
        .item_service
        .get_item(id)
        .await
        .map_err(|e: ItemError| -> ApiError { e.into() })?;

    Ok(Json(item))
}

/// 아이템 수정 (소유자만)
#[utoipa::path(
    patch,
    path = "/api/items/{id}",
    params(("id" = u64, Path, description = "Item ID")),
    request_body = ItemUpdate,
    responses(
        (status = 200, description = "Updated item", body = Item),
        (status = 400, description = "Invalid field or status change"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "forbidden"),
        (status = 404, description = "item not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Items"
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
    Json(request): Json<ItemUpdate>,
) -> Result<Json<Item>, ApiError> {
    let item = app_state
        .item_state
        .item_service
        .update_item(authenticated_user.user_id, id, request)
        .await
        .map_err(|e: ItemError| -> ApiError { e.into() })?;

    Ok(Json(item))
}

/// 이미지 추가 (multipart 필드 `images`, 여러 개 가능)
/// Append images (multipart field `images`, repeatable)
#[utoipa::path(
    post,
    path = "/api/items/{id}/images",
    params(("id" = u64, Path, description = "Item ID")),
    request_body(content = ItemImagesUpload, content_type = "multipart/form-data", description = "One or more `images` file parts"),
    responses(
        (status = 200, description = "Item with new images", body = Item),
        (status = 400, description = "Invalid image"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "forbidden"),
        (status = 404, description = "item not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Items"
)]
pub async fn upload_item_images(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
    mut multipart: Multipart,
) -> Result<Json<Item>, ApiError> {
    let files = read_files(&mut multipart, "images")
        .await
        .map_err(|e| -> ApiError { ItemError::from(e).into() })?;

    let item = app_state
        .item_state
        .item_service
        .add_images(authenticated_user.user_id, id, files)
        .await
        .map_err(|e: ItemError| -> ApiError { e.into() })?;

    Ok(Json(item))
}

/// 아이템 삭제
/// - available 이면 아이템 크레딧만큼 차감 (잔액 한도 내)
/// - pending 요청 취소 + 환불
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the item owner can delete this item"),
        (status = 404, description = "item not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Items"
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    app_state
        .item_state
        .item_service
        .delete_item(authenticated_user.user_id, id)
        .await
        .map_err(|e: ItemError| -> ApiError { e.into() })?;

    Ok(StatusCode::NO_CONTENT)
}

/// 24시간 예약
#[utoipa::path(
    post,
    path = "/api/items/{id}/lock",
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item reserved", body = ItemLockResponse),
        (status = 400, description = "already locked, or item not available"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "You cannot swap or purchase your own items"),
        (status = 404, description = "item not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Items"
)]
pub async fn lock_item(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<ItemLockResponse>, ApiError> {
    let item = app_state
        .item_state
        .item_service
        .lock_item(authenticated_user.user_id, id)
        .await
        .map_err(|e: ItemError| -> ApiError { e.into() })?;

    Ok(Json(ItemLockResponse {
        message: format!("Item locked for {} hours", LOCK_DURATION_HOURS),
        item,
    }))
}

#[utoipa::path(
    post,
    path = "/api/items/{id}/unlock",
    params(("id" = u64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item unlocked", body = ItemLockResponse),
        (status = 400, description = "not locked"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the item owner can unlock this item"),
        (status = 404, description = "item not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Items"
)]
pub async fn unlock_item(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<ItemLockResponse>, ApiError> {
    let item = app_state
        .item_state
        .item_service
        .unlock_item(authenticated_user.user_id, id)
        .await
        .map_err(|e: ItemError| -> ApiError { e.into() })?;

    Ok(Json(ItemLockResponse {
        message: "Item unlocked".to_string(),
        item,
    }))
}
