use std::path::{Path, PathBuf};
use uuid::Uuid;
use crate::shared::errors::ImageError;

/// 업로드 이미지 최대 크기 (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// multipart 경계/헤더 여유분
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// 아이템 이미지 한 번에 올릴 수 있는 최대 장수 (요청 본문 한도 계산용)
pub const MAX_IMAGES_PER_UPLOAD: usize = 10;

/// 프로필 사진 요청 본문 한도
/// Replaces axum's 2MB default on the upload route
pub const PROFILE_PICTURE_BODY_LIMIT: usize = MAX_IMAGE_BYTES + MULTIPART_OVERHEAD;

/// 아이템 이미지 요청 본문 한도
pub const ITEM_IMAGES_BODY_LIMIT: usize = MAX_IMAGE_BYTES * MAX_IMAGES_PER_UPLOAD + MULTIPART_OVERHEAD;

/// 업로드 이미지가 서빙되는 경로
pub const UPLOADS_ROUTE: &str = "/uploads";

/// 저장된 이미지
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// File name inside the upload directory
    pub id: String,
    pub url: String,
}

/// 허용된 이미지 타입의 확장자
/// Extension for an allowed content type
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// 매직 바이트로 타입 추정 (content-type이 없을 때)
fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpg")
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("png")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("webp")
    } else {
        None
    }
}

/// 이미지 검증: 타입(JPEG/PNG/GIF/WebP)과 크기(≤ 5MB)
/// Validate an upload and return the file extension to store it under
pub fn validate_image(content_type: Option<&str>, bytes: &[u8]) -> Result<&'static str, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge { size: bytes.len(), max: MAX_IMAGE_BYTES });
    }

    match content_type.filter(|ct| !ct.trim().is_empty()) {
        Some(ct) => extension_for(ct).ok_or_else(|| ImageError::UnsupportedType {
            content_type: ct.to_string(),
        }),
        None => sniff_extension(bytes).ok_or_else(|| ImageError::UnsupportedType {
            content_type: "unknown".to_string(),
        }),
    }
}

/// 로컬 디스크 이미지 저장소
/// Stores uploads on local disk; files are served under `/uploads`
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    public_url: String,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 검증 후 UUID 파일명으로 저장
    pub async fn save(&self, content_type: Option<&str>, bytes: &[u8]) -> Result<StoredImage, ImageError> {
        let ext = validate_image(content_type, bytes)?;
        let id = format!("{}.{}", Uuid::new_v4().simple(), ext);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ImageError::Storage(format!("create {}: {}", self.dir.display(), e)))?;
        tokio::fs::write(self.dir.join(&id), bytes)
            .await
            .map_err(|e| ImageError::Storage(format!("write {}: {}", id, e)))?;

        tracing::debug!(image_id = %id, size = bytes.len(), "stored image");

        Ok(StoredImage {
            url: format!("{}{}/{}", self.public_url, UPLOADS_ROUTE, id),
            id,
        })
    }

    /// 파일 삭제 (없는 파일은 무시)
    /// Remove a stored image; a missing file is not an error
    pub async fn delete(&self, id: &str) -> Result<(), ImageError> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(ImageError::Storage(format!("invalid image id: {}", id)));
        }

        match tokio::fs::remove_file(self.dir.join(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ImageError::Storage(format!("remove {}: {}", id, e))),
        }
    }

    /// 여러 이미지 삭제, 실패는 로그만
    pub async fn delete_all(&self, ids: &[String]) {
        for id in ids {
            if let Err(e) = self.delete(id).await {
                tracing::warn!(image_id = %id, error = %e, "failed to remove image file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n0000";

    #[test]
    fn content_type_decides_extension() {
        assert_eq!(validate_image(Some("image/png"), PNG).unwrap(), "png");
        assert_eq!(validate_image(Some("IMAGE/JPEG"), b"x").unwrap(), "jpg");
        assert!(matches!(
            validate_image(Some("application/pdf"), b"%PDF"),
            Err(ImageError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn missing_content_type_is_sniffed() {
        assert_eq!(validate_image(None, PNG).unwrap(), "png");
        assert_eq!(validate_image(None, b"GIF89a....").unwrap(), "gif");
        assert_eq!(validate_image(None, b"RIFF\0\0\0\0WEBPVP8 ").unwrap(), "webp");
        assert!(validate_image(None, b"hello").is_err());
    }

    #[test]
    fn size_limits_are_enforced() {
        assert!(matches!(validate_image(Some("image/png"), b""), Err(ImageError::Empty)));
        let big = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(
            validate_image(Some("image/png"), &big),
            Err(ImageError::TooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn save_and_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path(), "http://localhost:8000/");

        let stored = store.save(Some("image/png"), PNG).await.unwrap();
        assert!(stored.id.ends_with(".png"));
        assert_eq!(stored.url, format!("http://localhost:8000/uploads/{}", stored.id));
        assert!(dir.path().join(&stored.id).exists());

        store.delete(&stored.id).await.unwrap();
        assert!(!dir.path().join(&stored.id).exists());
        // 두 번째 삭제도 성공
        store.delete(&stored.id).await.unwrap();
    }

    #[tokio::test]
    async fn delete_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path(), "http://x");
        assert!(store.delete("../secret").await.is_err());
    }
}
