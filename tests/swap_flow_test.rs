// =====================================================
// 스왑 흐름 통합 테스트 (실제 DB)
// =====================================================
// SWAPCIRCLE_TEST_DATABASE_URL 이 설정된 경우에만 실행
// 사용자/아이템은 테스트마다 새로 만들어 병렬 실행에도 안전
//
// 확인 항목:
// - 요청 시 크레딧 보류, 승인 시 소유자에게 이전
// - 거절/취소/아이템 삭제 시 환불
// - 잔액 부족 (402/400), 자기 아이템, pending 한도
// - 알림과 이력 (아이템 삭제 후에도 유지)
// - 잠금 보유자의 요청
// =====================================================

mod common;
use common::*;

use axum::http::{Method, StatusCode};

async fn request_swap(app: &TestApp, user: &TestUser, item_id: u64) -> (StatusCode, serde_json::Value) {
    call(
        app,
        Method::POST,
        &format!("/api/swaps/items/{}/request", item_id),
        Some(&user.auth),
        None,
    )
    .await
}

async fn decide(
    app: &TestApp,
    user: &TestUser,
    item_id: u64,
    request_id: u64,
    action: &str,
) -> (StatusCode, serde_json::Value) {
    call(
        app,
        Method::POST,
        &format!("/api/swaps/items/{}/requests/{}/{}", item_id, request_id, action),
        Some(&user.auth),
        None,
    )
    .await
}

async fn event_types(app: &TestApp, user: &TestUser) -> Vec<String> {
    let (status, body) = call(app, Method::GET, "/api/notifications", Some(&user.auth), None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array()
        .unwrap()
        .iter()
        .map(|n| n["event_type"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn approve_transfers_held_credits_to_owner() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let item_id = create_item(&app, &owner, "Denim jacket", 2.0).await;
    // 업로드 보상 1 크레딧
    assert_eq!(balance_of(&app, &owner).await, 1.0);

    let requester = register_user(&app).await;
    add_credits(&app, &requester, 3.0).await;

    let (status, body) = request_swap(&app, &requester, item_id).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "requested");
    assert_eq!(body["credits_required"].as_f64(), Some(2.0));
    let request_id = body["request_id"].as_u64().unwrap();

    assert_eq!(balance_of(&app, &requester).await, 1.0);
    assert_eq!(item_status(&app, item_id).await, "pending");

    let (status, body) = call(&app, Method::GET, "/api/swaps/requests", Some(&owner.auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["as_owner"].as_array().unwrap().len(), 1);

    // 요청자는 승인할 수 없음
    let (status, _) = decide(&app, &requester, item_id, request_id, "approve").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = decide(&app, &owner, item_id, request_id, "approve").await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["message"], "Swap request approved. 2 credits transferred.");

    assert_eq!(balance_of(&app, &owner).await, 3.0);
    assert_eq!(balance_of(&app, &requester).await, 1.0);
    assert_eq!(item_status(&app, item_id).await, "swapped");

    // 두 번째 승인은 불가 (pending 아님)
    let (status, _) = decide(&app, &owner, item_id, request_id, "approve").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(event_types(&app, &owner).await.contains(&"new_request".to_string()));
    assert!(event_types(&app, &requester).await.contains(&"approved".to_string()));

    let (status, body) = call(&app, Method::GET, "/api/swaps/history", Some(&requester.auth), None).await;
    assert_eq!(status, StatusCode::OK);
    let swaps = body["swaps"].as_array().unwrap();
    assert_eq!(swaps.len(), 1);
    assert_eq!(swaps[0]["owner"]["id"].as_u64(), Some(owner.id));
}

#[tokio::test]
async fn reject_refunds_and_reopens_item() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let item_id = create_item(&app, &owner, "Wool scarf", 1.5).await;
    let requester = register_user(&app).await;
    add_credits(&app, &requester, 2.0).await;

    let (status, body) = request_swap(&app, &requester, item_id).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let request_id = body["request_id"].as_u64().unwrap();
    assert_eq!(balance_of(&app, &requester).await, 0.5);

    let (status, body) = decide(&app, &owner, item_id, request_id, "reject").await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "rejected");

    assert_eq!(balance_of(&app, &requester).await, 2.0);
    assert_eq!(balance_of(&app, &owner).await, 1.0);
    assert_eq!(item_status(&app, item_id).await, "available");
    assert!(event_types(&app, &requester).await.contains(&"rejected".to_string()));
}

#[tokio::test]
async fn cancel_refunds_once() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let item_id = create_item(&app, &owner, "Canvas tote", 1.0).await;
    let requester = register_user(&app).await;
    add_credits(&app, &requester, 1.0).await;

    let (status, _) = request_swap(&app, &requester, item_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance_of(&app, &requester).await, 0.0);

    let cancel = format!("/api/swaps/items/{}/cancel", item_id);
    let (status, body) = call(&app, Method::POST, &cancel, Some(&requester.auth), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "cancelled");
    assert_eq!(balance_of(&app, &requester).await, 1.0);
    assert_eq!(item_status(&app, item_id).await, "available");

    let (status, body) = call(&app, Method::POST, &cancel, Some(&requester.auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No pending swap request found for this item");
    assert_eq!(balance_of(&app, &requester).await, 1.0);

    assert!(event_types(&app, &owner).await.contains(&"request_cancelled".to_string()));
}

#[tokio::test]
async fn requests_are_refused_without_enough_credits() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let cheap = create_item(&app, &owner, "Beanie", 1.0).await;
    let pricey = create_item(&app, &owner, "Leather boots", 3.0).await;
    let broke = register_user(&app).await;

    let (status, body) = request_swap(&app, &broke, cheap).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["error"], "Insufficient credits to request this item.");

    let (status, _) = request_swap(&app, &broke, pricey).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 실패한 요청은 아이템 상태를 바꾸지 않음
    assert_eq!(item_status(&app, cheap).await, "available");
}

#[tokio::test]
async fn owners_cannot_request_their_own_items() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let item_id = create_item(&app, &owner, "Raincoat", 1.0).await;

    let (status, body) = request_swap(&app, &owner, item_id).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You cannot swap or purchase your own items");
}

#[tokio::test]
async fn pending_requests_are_capped_by_balance() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let a = create_item(&app, &owner, "Tee A", 0.5).await;
    let b = create_item(&app, &owner, "Tee B", 0.5).await;
    let c = create_item(&app, &owner, "Tee C", 0.5).await;

    let requester = register_user(&app).await;
    add_credits(&app, &requester, 2.5).await;

    assert_eq!(request_swap(&app, &requester, a).await.0, StatusCode::OK);
    assert_eq!(request_swap(&app, &requester, b).await.0, StatusCode::OK);

    // 잔액 1.5 -> 최대 1개, 이미 2개 pending
    let (status, body) = request_swap(&app, &requester, c).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("pending request limit"));
    assert_eq!(balance_of(&app, &requester).await, 1.5);
}

#[tokio::test]
async fn deleting_an_item_refunds_pending_requesters() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let item_id = create_item(&app, &owner, "Cord skirt", 2.0).await;
    let requester = register_user(&app).await;
    add_credits(&app, &requester, 2.0).await;

    assert_eq!(request_swap(&app, &requester, item_id).await.0, StatusCode::OK);
    assert_eq!(balance_of(&app, &requester).await, 0.0);

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/items/{}", item_id),
        Some(&owner.auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert_eq!(balance_of(&app, &requester).await, 2.0);
    let (status, _) = call(&app, Method::GET, &format!("/api/items/{}", item_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_survives_deleting_the_swapped_item() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let item_id = create_item(&app, &owner, "Linen shirt", 1.0).await;
    let requester = register_user(&app).await;
    add_credits(&app, &requester, 1.0).await;

    let (status, body) = request_swap(&app, &requester, item_id).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let request_id = body["request_id"].as_u64().unwrap();
    assert_eq!(decide(&app, &owner, item_id, request_id, "approve").await.0, StatusCode::OK);

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/items/{}", item_id),
        Some(&owner.auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for user in [&requester, &owner] {
        let (status, body) = call(&app, Method::GET, "/api/swaps/history", Some(&user.auth), None).await;
        assert_eq!(status, StatusCode::OK);
        let swaps = body["swaps"].as_array().unwrap();
        assert_eq!(swaps.len(), 1, "{}", body);
        assert_eq!(swaps[0]["id"].as_u64(), Some(request_id));
        assert!(swaps[0]["item_id"].is_null());
        assert!(swaps[0]["item"].is_null());
        assert_eq!(swaps[0]["item_title"], "Linen shirt");
        assert_eq!(swaps[0]["owner"]["id"].as_u64(), Some(owner.id));
        assert_eq!(swaps[0]["requester"]["id"].as_u64(), Some(requester.id));
    }

    // 삭제 후에도 거래 수 집계 유지
    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/users/search?q={}", owner.username),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"][0]["id"].as_u64(), Some(owner.id));
    assert_eq!(body["users"][0]["totalSwaps"].as_i64(), Some(1));

    // 요청자는 이전된 크레딧을 돌려받지 않음
    assert_eq!(balance_of(&app, &requester).await, 0.0);
}

#[tokio::test]
async fn lock_holder_can_request_and_lock_is_cleared() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let item_id = create_item(&app, &owner, "Puffer vest", 1.0).await;
    let holder = register_user(&app).await;
    let other = register_user(&app).await;
    add_credits(&app, &holder, 1.0).await;
    add_credits(&app, &other, 1.0).await;

    let lock = format!("/api/items/{}/lock", item_id);
    let (status, body) = call(&app, Method::POST, &lock, Some(&holder.auth), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    // 다른 사용자는 잠긴 아이템을 요청할 수 없음
    let (status, _) = request_swap(&app, &other, item_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request_swap(&app, &holder, item_id).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let request_id = body["request_id"].as_u64().unwrap();

    let (_, item) = call(&app, Method::GET, &format!("/api/items/{}", item_id), None, None).await;
    assert_eq!(item["status"], "pending");
    assert!(item["locked_by"].is_null());
    assert!(item["locked_until"].is_null());

    assert_eq!(decide(&app, &owner, item_id, request_id, "reject").await.0, StatusCode::OK);

    let (_, item) = call(&app, Method::GET, &format!("/api/items/{}", item_id), None, None).await;
    assert_eq!(item["status"], "available");
    assert!(item["locked_by"].is_null());

    // 잠금이 남아 있지 않으므로 다른 사용자도 요청 가능
    let (status, body) = request_swap(&app, &other, item_id).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
}
