/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - multipart 파일 업로드 읽기
/// - 사용자 입력 검증
pub mod multipart;
pub mod validation;

pub use multipart::*;
pub use validation::*;
