use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use crate::shared::errors::{CreditError, ImageError};

/// 아이템(리스팅) 관련 에러
/// Listing errors
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("item not found")]
    NotFound { id: u64 },

    #[error("forbidden")]
    Forbidden,

    #[error("Only the item owner can delete this item")]
    DeleteForbidden,

    #[error("Only the item owner can unlock this item")]
    UnlockForbidden,

    #[error("You cannot swap or purchase your own items")]
    OwnItem,

    #[error("already locked")]
    AlreadyLocked,

    #[error("not locked")]
    NotLocked,

    #[error("Item is not available (current status: {status})")]
    NotAvailable { status: String },

    #[error("Item status can only be changed between available and locked")]
    InvalidStatusChange,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Credit(#[from] CreditError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<ItemError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: ItemError) -> Self {
        let status = match &err {
            ItemError::NotFound { .. } => StatusCode::NOT_FOUND,
            ItemError::Forbidden
            | ItemError::DeleteForbidden
            | ItemError::UnlockForbidden
            | ItemError::OwnItem => StatusCode::FORBIDDEN,
            ItemError::AlreadyLocked
            | ItemError::NotLocked
            | ItemError::NotAvailable { .. }
            | ItemError::InvalidStatusChange
            | ItemError::Validation(_) => StatusCode::BAD_REQUEST,
            ItemError::Image(image_err) => image_err.status_code(),
            ItemError::Credit(credit_err) => credit_err.status_code(),
            ItemError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
