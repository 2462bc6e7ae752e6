// Shared errors
pub mod auth_error;
pub mod user_error;
pub mod image_error;
pub mod item_error;
pub mod credit_error;
pub mod swap_error;
pub mod notification_error;
pub mod rating_error;
pub mod support_error;

pub use auth_error::*;
pub use user_error::*;
pub use image_error::*;
pub use item_error::*;
pub use credit_error::*;
pub use swap_error::*;
pub use notification_error::*;
pub use rating_error::*;
pub use support_error::*;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, Json};
    use rust_decimal::Decimal;

    fn status_of<E>(err: E) -> StatusCode
    where
        E: Into<(StatusCode, Json<serde_json::Value>)>,
    {
        err.into().0
    }

    #[test]
    fn insufficient_credits_uses_402_only_for_cheap_items() {
        assert_eq!(
            status_of(SwapError::InsufficientCredits { payment_required: true }),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            status_of(SwapError::InsufficientCredits { payment_required: false }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn nested_credit_errors_keep_their_status() {
        let err = ItemError::from(CreditError::UserNotFound { id: 3 });
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);

        let err = SwapError::from(CreditError::InsufficientCredits {
            balance: Decimal::ZERO,
            required: Decimal::ONE,
        });
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_body_carries_the_message() {
        let (status, Json(body)) = SwapError::NotOwner { action: "approve" }.into();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Only the item owner can approve swap requests");
    }

    #[test]
    fn image_storage_failures_are_server_errors() {
        let err = UserError::from(ImageError::Storage("disk full".into()));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
        let err = ItemError::from(ImageError::TooLarge { size: 10, max: 5 });
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }
}
