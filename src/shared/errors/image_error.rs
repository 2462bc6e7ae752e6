use thiserror::Error;
use axum::http::StatusCode;

/// 이미지 업로드 에러
/// Image upload errors
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Invalid image type: {content_type}. Allowed: JPEG, PNG, GIF, WebP")]
    UnsupportedType { content_type: String },

    #[error("Image too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Empty image upload")]
    Empty,

    #[error("Invalid multipart upload: {0}")]
    Multipart(String),

    #[error("Failed to store image: {0}")]
    Storage(String),
}

impl ImageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ImageError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
