use crate::domains::support::models::{ContactRequest, ContactResponse, ReportRequest, ReportResponse};
use crate::shared::services::AppState;
use crate::shared::errors::SupportError;
use crate::shared::middleware::auth::AuthenticatedUser;
use axum::{extract::State, http::StatusCode, Json};

/// 아이템/사용자 신고
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Report recorded", body = ReportResponse),
        (status = 400, description = "Invalid target_type or missing field"),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Support"
)]
pub async fn submit_report(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .support_state
        .support_service
        .submit_report(authenticated_user.user_id, request)
        .await
        .map_err(|e: SupportError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// 문의/피드백/버그 제보 (로그인 불필요)
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Confirmation and admin emails sent", body = ContactResponse),
        (status = 400, description = "Invalid form or an email could not be sent")
    ),
    tag = "Support"
)]
pub async fn submit_contact(
    State(app_state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .support_state
        .support_service
        .submit_contact(request)
        .await
        .map_err(|e: SupportError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}
