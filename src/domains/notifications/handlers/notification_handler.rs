use crate::domains::notifications::models::{
    Notification, NotificationActionResponse, NotificationListQuery, RecentEvent, RecentQuery,
    UnreadCountResponse,
};
use crate::shared::services::AppState;
use crate::shared::errors::NotificationError;
use crate::shared::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// 알림 목록 (최신순)
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationListQuery),
    responses(
        (status = 200, description = "Notifications, newest first", body = [Notification]),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Notifications"
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<Notification>>, (StatusCode, Json<serde_json::Value>)> {
    let notifications = app_state
        .notification_state
        .notification_service
        .list(authenticated_user.user_id, &query)
        .await
        .map_err(|e: NotificationError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(notifications))
}

/// 최근 이벤트 (폴링 클라이언트용)
/// Recent swap events in the legacy polling shape
#[utoipa::path(
    get,
    path = "/api/notifications/recent",
    params(RecentQuery),
    responses(
        (status = 200, description = "Events from the last N minutes", body = [RecentEvent]),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Notifications"
)]
pub async fn recent_events(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<RecentEvent>>, (StatusCode, Json<serde_json::Value>)> {
    let events = app_state
        .notification_state
        .notification_service
        .recent(authenticated_user.user_id, &query)
        .await
        .map_err(|e: NotificationError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    responses(
        (status = 200, description = "Unread notifications", body = UnreadCountResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Notifications"
)]
pub async fn unread_count(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UnreadCountResponse>, (StatusCode, Json<serde_json::Value>)> {
    let count = app_state
        .notification_state
        .notification_service
        .unread_count(authenticated_user.user_id)
        .await
        .map_err(|e: NotificationError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(UnreadCountResponse { count }))
}

#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    params(("id" = u64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = NotificationActionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Notifications"
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<NotificationActionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .notification_state
        .notification_service
        .mark_read(authenticated_user.user_id, id)
        .await
        .map_err(|e: NotificationError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/notifications/read-all",
    responses(
        (status = 200, description = "All notifications marked as read", body = NotificationActionResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Notifications"
)]
pub async fn mark_all_read(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<NotificationActionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .notification_state
        .notification_service
        .mark_all_read(authenticated_user.user_id)
        .await
        .map_err(|e: NotificationError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(("id" = u64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted", body = NotificationActionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Notifications"
)]
pub async fn delete_notification(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<u64>,
) -> Result<Json<NotificationActionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .notification_state
        .notification_service
        .delete(authenticated_user.user_id, id)
        .await
        .map_err(|e: NotificationError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}
