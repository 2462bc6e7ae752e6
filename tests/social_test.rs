// =====================================================
// 프로필 / 검색 / 평점 / 알림 통합 테스트 (실제 DB)
// =====================================================
// SWAPCIRCLE_TEST_DATABASE_URL 이 설정된 경우에만 실행
// =====================================================

mod common;
use common::*;

use axum::http::{Method, StatusCode};
use serde_json::json;

async fn unread_count(app: &TestApp, user: &TestUser) -> i64 {
    let (status, body) = call(app, Method::GET, "/api/notifications/unread-count", Some(&user.auth), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["count"].as_i64().unwrap()
}

#[tokio::test]
async fn credits_are_only_visible_to_the_profile_owner() {
    let Some(app) = db_app().await else { return };

    let user = register_user(&app).await;
    let viewer = register_user(&app).await;
    add_credits(&app, &user, 5.0).await;
    let uri = format!("/api/users/{}", user.id);

    let (status, body) = call(&app, Method::GET, &uri, Some(&user.auth), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["credits"].as_f64(), Some(5.0));

    let (_, body) = call(&app, Method::GET, &uri, Some(&viewer.auth), None).await;
    assert_eq!(body["credits"].as_f64(), Some(0.0));

    let (_, body) = call(&app, Method::GET, &uri, None, None).await;
    assert_eq!(body["credits"].as_f64(), Some(0.0));
    assert_eq!(body["username"], user.username.as_str());
}

#[tokio::test]
async fn search_ranks_exact_then_username_then_full_name() {
    let Some(app) = db_app().await else { return };

    let token = unique_token();
    let by_name = register_named(&app, &format!("n_{}", unique_token()), &format!("Maya {}", token)).await;
    let partial = register_named(&app, &format!("z{}", token), "Zoe Park").await;
    let exact = register_named(&app, &token, "Ed Exact").await;

    let (status, body) = call(&app, Method::GET, &format!("/api/users/search?q={}", token), None, None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["query"], token.as_str());
    assert_eq!(body["total"].as_u64(), Some(3));

    let ids: Vec<u64> = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![exact.id, partial.id, by_name.id]);

    let first = &body["users"][0];
    assert_eq!(first["fullName"], "Ed Exact");
    assert_eq!(first["initials"], "E");
    assert_eq!(first["totalSwaps"].as_i64(), Some(0));

    let (_, body) = call(
        &app,
        Method::GET,
        &format!("/api/users/search?q={}&limit=1", token),
        None,
        None,
    )
    .await;
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ratings_are_upserted_and_summarised() {
    let Some(app) = db_app().await else { return };

    let rated = register_user(&app).await;
    let first = register_user(&app).await;
    let second = register_user(&app).await;
    let uri = format!("/api/ratings/{}", rated.id);

    let (status, body) = call(&app, Method::POST, &uri, Some(&first.auth), Some(json!({ "stars": 5 }))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let rating_id = body["id"].as_u64().unwrap();

    // 같은 평가자가 다시 평가하면 덮어씀
    let (status, body) = call(&app, Method::POST, &uri, Some(&first.auth), Some(json!({ "stars": 3 }))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["id"].as_u64(), Some(rating_id));
    assert_eq!(body["stars"].as_i64(), Some(3));

    let (status, _) = call(&app, Method::POST, &uri, Some(&second.auth), Some(json!({ "stars": 4 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = call(&app, Method::GET, &format!("{}/stats", uri), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["average_rating"].as_f64(), Some(3.5));
    assert_eq!(stats["total_ratings"].as_i64(), Some(2));
    assert_eq!(
        stats["rating_breakdown"],
        json!({ "1": 0, "2": 0, "3": 1, "4": 1, "5": 0 })
    );

    let (status, mine) = call(&app, Method::GET, &format!("{}/my-rating", uri), Some(&first.auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["stars"].as_i64(), Some(3));
    assert_eq!(mine["rater_user_id"].as_u64(), Some(first.id));

    // 평가하지 않은 경우 null
    let (status, none) = call(
        &app,
        Method::GET,
        &format!("/api/ratings/{}/my-rating", first.id),
        Some(&rated.auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(none.is_null());

    let (_, profile) = call(&app, Method::GET, &format!("/api/users/{}", rated.id), None, None).await;
    assert_eq!(profile["average_rating"].as_f64(), Some(3.5));
    assert_eq!(profile["total_ratings"].as_i64(), Some(2));
}

#[tokio::test]
async fn notifications_can_be_read_and_deleted() {
    let Some(app) = db_app().await else { return };

    let owner = register_user(&app).await;
    let first_item = create_item(&app, &owner, "Velvet blazer", 1.0).await;
    let second_item = create_item(&app, &owner, "Silk scarf", 1.0).await;
    let requester = register_user(&app).await;
    add_credits(&app, &requester, 2.0).await;

    for item_id in [first_item, second_item] {
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/swaps/items/{}/request", item_id),
            Some(&requester.auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
    }

    let (status, list) = call(&app, Method::GET, "/api/notifications", Some(&owner.auth), None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap().clone();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|n| n["event_type"] == "new_request" && n["read"] == false));
    assert_eq!(unread_count(&app, &owner).await, 2);

    let (status, recent) = call(&app, Method::GET, "/api/notifications/recent", Some(&owner.auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recent.as_array().unwrap().len(), 2);

    let first_id = list[0]["id"].as_u64().unwrap();
    let second_id = list[1]["id"].as_u64().unwrap();

    // 다른 사용자의 알림은 찾을 수 없음
    let read_uri = format!("/api/notifications/{}/read", first_id);
    let (status, _) = call(&app, Method::PATCH, &read_uri, Some(&requester.auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, Method::PATCH, &read_uri, Some(&owner.auth), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["success"], true);
    assert_eq!(unread_count(&app, &owner).await, 1);

    let (status, body) = call(&app, Method::PATCH, "/api/notifications/read-all", Some(&owner.auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "1 notification(s) marked as read");
    assert_eq!(unread_count(&app, &owner).await, 0);

    let (_, unread) = call(
        &app,
        Method::GET,
        "/api/notifications?unread_only=true",
        Some(&owner.auth),
        None,
    )
    .await;
    assert!(unread.as_array().unwrap().is_empty());

    let delete_uri = format!("/api/notifications/{}", second_id);
    let (status, body) = call(&app, Method::DELETE, &delete_uri, Some(&owner.auth), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["success"], true);

    let (status, _) = call(&app, Method::DELETE, &delete_uri, Some(&owner.auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = call(&app, Method::GET, "/api/notifications", Some(&owner.auth), None).await;
    let remaining: Vec<u64> = list.as_array().unwrap().iter().map(|n| n["id"].as_u64().unwrap()).collect();
    assert_eq!(remaining, vec![first_id]);
}

#[tokio::test]
async fn profile_picture_over_two_megabytes_is_stored() {
    let Some(app) = db_app().await else { return };

    let user = register_user(&app).await;
    let (status, body) = upload(
        &app,
        &format!("/api/users/{}/profile-picture", user.id),
        &user.auth,
        "file",
        &[png_bytes(3 * 1024 * 1024)],
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let url = body["profile_pic"].as_str().unwrap();
    assert!(url.ends_with(".png"), "{}", url);
}
