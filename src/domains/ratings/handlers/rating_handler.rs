use crate::domains::ratings::models::{Rating, RatingRequest, RatingStats};
use crate::shared::services::AppState;
use crate::shared::errors::RatingError;
use crate::shared::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// 사용자 평가 (1~5점, 다시 평가하면 덮어씀)
#[utoipa::path(
    post,
    path = "/api/ratings/{rated_user_id}",
    params(("rated_user_id" = u64, Path, description = "User being rated")),
    request_body = RatingRequest,
    responses(
        (status = 200, description = "Rating saved", body = Rating),
        (status = 400, description = "Invalid stars or self rating"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "user not found")
    ),
    security(("BearerAuth" = [])),
    tag = "Ratings"
)]
pub async fn rate_user(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(rated_user_id): Path<u64>,
    Json(request): Json<RatingRequest>,
) -> Result<Json<Rating>, (StatusCode, Json<serde_json::Value>)> {
    let rating = app_state
        .rating_state
        .rating_service
        .rate_user(authenticated_user.user_id, rated_user_id, request.stars)
        .await
        .map_err(|e: RatingError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(rating))
}

#[utoipa::path(
    get,
    path = "/api/ratings/{rated_user_id}/my-rating",
    params(("rated_user_id" = u64, Path, description = "Rated user")),
    responses(
        (status = 200, description = "My rating of the user, or null", body = Rating),
        (status = 401, description = "Unauthorized")
    ),
    security(("BearerAuth" = [])),
    tag = "Ratings"
)]
pub async fn get_my_rating(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(rated_user_id): Path<u64>,
) -> Result<Json<Option<Rating>>, (StatusCode, Json<serde_json::Value>)> {
    let rating = app_state
        .rating_state
        .rating_service
        .my_rating(authenticated_user.user_id, rated_user_id)
        .await
        .map_err(|e: RatingError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(rating))
}

/// 평점 통계 (공개)
#[utoipa::path(
    get,
    path = "/api/ratings/{rated_user_id}/stats",
    params(("rated_user_id" = u64, Path, description = "Rated user")),
    responses(
        (status = 200, description = "Average, total and per-star breakdown", body = RatingStats)
    ),
    tag = "Ratings"
)]
pub async fn get_rating_stats(
    State(app_state): State<AppState>,
    Path(rated_user_id): Path<u64>,
) -> Result<Json<RatingStats>, (StatusCode, Json<serde_json::Value>)> {
    let stats = app_state
        .rating_state
        .rating_service
        .stats(rated_user_id)
        .await
        .map_err(|e: RatingError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(stats))
}
