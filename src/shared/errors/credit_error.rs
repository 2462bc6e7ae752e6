use thiserror::Error;
use axum::{http::StatusCode, Json};
use rust_decimal::Decimal;
use serde_json::json;

/// 크레딧 원장 관련 에러
/// Credit ledger errors
#[derive(Error, Debug)]
pub enum CreditError {
    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Insufficient credits. Current balance: {balance}, required: {required}")]
    InsufficientCredits { balance: Decimal, required: Decimal },

    #[error("user not found")]
    UserNotFound { id: u64 },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl CreditError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CreditError::NonPositiveAmount | CreditError::InsufficientCredits { .. } => {
                StatusCode::BAD_REQUEST
            }
            CreditError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            CreditError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CreditError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: CreditError) -> Self {
        (err.status_code(), Json(json!({ "error": err.to_string() })))
    }
}
