use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification not found")]
    NotFound { id: u64 },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<NotificationError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: NotificationError) -> Self {
        let status = match &err {
            NotificationError::NotFound { .. } => StatusCode::NOT_FOUND,
            NotificationError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
