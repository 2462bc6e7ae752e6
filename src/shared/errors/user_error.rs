use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use crate::shared::errors::ImageError;

/// 사용자 프로필/즐겨찾기 관련 에러
/// Profile, settings and favorites errors
#[derive(Error, Debug)]
pub enum UserError {
    #[error("user not found")]
    NotFound,

    #[error("item not found")]
    ItemNotFound { id: u64 },

    /// 다른 사용자의 리소스 접근
    #[error("forbidden")]
    Forbidden,

    #[error("No valid fields to update")]
    NoValidFields,

    #[error("username already taken")]
    UsernameTaken { username: String },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<UserError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: UserError) -> Self {
        let status = match &err {
            UserError::NotFound | UserError::ItemNotFound { .. } => StatusCode::NOT_FOUND,
            UserError::Forbidden => StatusCode::FORBIDDEN,
            UserError::NoValidFields
            | UserError::UsernameTaken { .. }
            | UserError::Validation(_) => StatusCode::BAD_REQUEST,
            UserError::Image(image_err) => image_err.status_code(),
            UserError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
