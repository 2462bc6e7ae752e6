use axum::extract::Multipart;
use crate::shared::errors::ImageError;

/// 업로드된 파일 한 개
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// multipart 본문에서 지정한 이름의 파일 필드를 모두 읽음
/// Collect every file part named `field_name`; other parts are skipped
pub async fn read_files(multipart: &mut Multipart, field_name: &str) -> Result<Vec<UploadedFile>, ImageError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ImageError::Multipart(e.to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ImageError::Multipart(e.to_string()))?;

        files.push(UploadedFile {
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(files)
}
