// =====================================================
// 라우터 테스트 (DB 불필요)
// =====================================================
// 인증 거부, 입력 검증, 문의 메일처럼 DB 조회 전에 끝나는 경로 확인
// lazy 풀은 쿼리 전까지 접속하지 않으므로 DB 없이 실행 가능
// =====================================================

mod common;
use common::*;

use axum::http::{Method, StatusCode};
use serde_json::json;
use swapcircle_api::shared::clients::MAX_IMAGE_BYTES;

#[tokio::test]
async fn health_reports_ok() {
    let app = lazy_app();
    let (status, body) = call(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn openapi_document_lists_swap_routes() {
    let app = lazy_app();
    let (status, body) = call(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/swaps/items/{item_id}/request"));
    assert!(paths.contains_key("/api/credits/balance"));
    assert!(body["components"]["securitySchemes"]["BearerAuth"].is_object());

    for path in ["/api/items/{id}/images", "/api/users/{id}/profile-picture"] {
        let content = &body["paths"][path]["post"]["requestBody"]["content"];
        assert!(content["multipart/form-data"]["schema"].is_object(), "{}", path);
    }
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = lazy_app();

    for (method, uri) in [
        (Method::GET, "/api/credits/balance"),
        (Method::GET, "/api/auth/me"),
        (Method::GET, "/api/swaps/requests"),
        (Method::GET, "/api/notifications"),
        (Method::POST, "/api/swaps/items/1/request"),
    ] {
        let (status, body) = call(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"], "Missing authorization header");
    }
}

#[tokio::test]
async fn malformed_and_invalid_tokens_are_rejected() {
    let app = lazy_app();

    let (status, body) = call(&app, Method::GET, "/api/credits/balance", Some("Token abc"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("Bearer"));

    let (status, _) = call(
        &app,
        Method::GET,
        "/api/credits/balance",
        Some("Bearer not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn credit_amount_must_be_positive() {
    let app = lazy_app();
    let auth = bearer_for(7);

    for path in ["/api/credits/add", "/api/credits/deduct"] {
        let (status, body) = call(&app, Method::POST, path, Some(&auth), Some(json!({ "amount": 0 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(body["error"], "Amount must be positive");
    }
}

#[tokio::test]
async fn empty_user_search_is_rejected() {
    let app = lazy_app();
    let (status, body) = call(&app, Method::GET, "/api/users/search?q=%20%20", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query must not be empty");
}

#[tokio::test]
async fn ratings_validate_stars_and_self_rating() {
    let app = lazy_app();
    let auth = bearer_for(3);

    let (status, body) = call(&app, Method::POST, "/api/ratings/4", Some(&auth), Some(json!({ "stars": 6 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Stars must be between 1 and 5");

    let (status, body) = call(&app, Method::POST, "/api/ratings/3", Some(&auth), Some(json!({ "stars": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Users cannot rate themselves");
}

#[tokio::test]
async fn contact_form_sends_confirmation_and_admin_mail() {
    let app = lazy_app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({
            "name": "Sam",
            "email": " sam@college.edu ",
            "subject": "Sizing",
            "message": "Do you list kids sizes?",
            "type": "feedback",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "success");
    assert_eq!(body["email"], "sam@college.edu");
    assert_eq!(body["type"], "feedback");

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "sam@college.edu");
    assert!(sent[0].subject.contains("feedback"));
    assert_eq!(sent[1].to, "admin@swapcircle.test");
    assert!(sent[1].subject.contains("Feedback"));
}

#[tokio::test]
async fn contact_form_rejects_unknown_type_and_bad_email() {
    let app = lazy_app();

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({
            "name": "Sam",
            "email": "sam@college.edu",
            "subject": "Hi",
            "message": "Hello",
            "type": "complaint",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({
            "name": "Sam",
            "email": "not-an-email",
            "subject": "Hi",
            "message": "Hello",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn contact_form_reports_mail_failure() {
    let app = lazy_app_with_failing_mailer();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/contact",
        None,
        Some(json!({
            "name": "Sam",
            "email": "sam@college.edu",
            "subject": "Hi",
            "message": "Hello",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("confirmation"));
}

#[tokio::test]
async fn profile_picture_upload_accepts_bodies_over_two_megabytes() {
    let app = lazy_app();

    // 3MB 이미지: 본문을 끝까지 읽은 뒤 소유자 검사에서 403
    let (status, body) = upload(
        &app,
        "/api/users/2/profile-picture",
        &bearer_for(1),
        "file",
        &[png_bytes(3 * 1024 * 1024)],
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{}", body);
}

#[tokio::test]
async fn profile_picture_upload_body_is_still_capped() {
    let app = lazy_app();

    let (status, body) = upload(
        &app,
        "/api/users/2/profile-picture",
        &bearer_for(1),
        "file",
        &[png_bytes(MAX_IMAGE_BYTES + 256 * 1024)],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
}
