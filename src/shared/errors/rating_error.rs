use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 평점 관련 에러
/// Rating errors
#[derive(Error, Debug)]
pub enum RatingError {
    #[error("Stars must be between 1 and 5")]
    InvalidStars { stars: i64 },

    #[error("Users cannot rate themselves")]
    SelfRating,

    #[error("user not found")]
    UserNotFound { id: u64 },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RatingError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: RatingError) -> Self {
        let status = match &err {
            RatingError::InvalidStars { .. } | RatingError::SelfRating => StatusCode::BAD_REQUEST,
            RatingError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            RatingError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
