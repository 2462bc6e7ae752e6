use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use crate::shared::errors::CreditError;

/// 스왑 요청 관련 에러
/// Swap request lifecycle errors
#[derive(Error, Debug)]
pub enum SwapError {
    #[error("item not found")]
    ItemNotFound { id: u64 },

    #[error("swap request not found")]
    RequestNotFound { id: u64 },

    #[error("Item is not available for swap (already pending/swapped)")]
    ItemNotAvailable,

    #[error("You cannot swap or purchase your own items")]
    OwnItem,

    #[error("You already have a pending swap request for this item")]
    DuplicateRequest,

    /// 크레딧 부족 (1 크레딧 이하 아이템이면 402)
    #[error("Insufficient credits to request this item.")]
    InsufficientCredits { payment_required: bool },

    #[error("You've reached your pending request limit ({limit} max pending requests based on credits).")]
    PendingLimitReached { limit: i64 },

    #[error("Only the item owner can {action} swap requests")]
    NotOwner { action: &'static str },

    #[error("swap request does not match item")]
    ItemMismatch,

    #[error("Swap request is not pending (current status: {status})")]
    NotPending { status: String },

    #[error("No pending swap request found for this item")]
    NoPendingRequest,

    #[error(transparent)]
    Credit(#[from] CreditError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<SwapError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: SwapError) -> Self {
        let status = match &err {
            SwapError::ItemNotFound { .. }
            | SwapError::RequestNotFound { .. }
            | SwapError::NoPendingRequest => StatusCode::NOT_FOUND,
            SwapError::OwnItem | SwapError::NotOwner { .. } => StatusCode::FORBIDDEN,
            SwapError::InsufficientCredits { payment_required: true } => {
                StatusCode::PAYMENT_REQUIRED
            }
            SwapError::InsufficientCredits { payment_required: false }
            | SwapError::ItemNotAvailable
            | SwapError::DuplicateRequest
            | SwapError::PendingLimitReached { .. }
            | SwapError::ItemMismatch
            | SwapError::NotPending { .. } => StatusCode::BAD_REQUEST,
            SwapError::Credit(credit_err) => credit_err.status_code(),
            SwapError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
