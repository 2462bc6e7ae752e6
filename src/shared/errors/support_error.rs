use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 신고/문의 관련 에러
/// Report and contact-form errors
#[derive(Error, Debug)]
pub enum SupportError {
    #[error("Invalid target_type")]
    InvalidTargetType { target_type: String },

    #[error("Invalid contact type: {kind}")]
    InvalidContactType { kind: String },

    #[error("{0}")]
    Validation(String),

    /// 메일 발송 실패 (어느 쪽 메일인지 포함)
    #[error("Failed to send {leg} email: {reason}")]
    MailFailed { leg: &'static str, reason: String },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<SupportError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: SupportError) -> Self {
        let status = match &err {
            SupportError::InvalidTargetType { .. }
            | SupportError::InvalidContactType { .. }
            | SupportError::Validation(_)
            | SupportError::MailFailed { .. } => StatusCode::BAD_REQUEST,
            SupportError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
