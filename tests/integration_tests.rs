// Integration tests for Matchmaker

use actix_web::{http::StatusCode, test, web, App};
use matchmaker::models::{Match, Recommendation};
use matchmaker::routes::{self, AppState};
use matchmaker::services::{seed_demo_users, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;

// Demo seed ids, in insertion order
const ALICE: i64 = 1;
const BOB: i64 = 2;
const CHARLIE: i64 = 3;
const DIANA: i64 = 4;
const ETHAN: i64 = 5;

async fn seeded_state() -> AppState {
    let store = Arc::new(MemoryStore::new());
    seed_demo_users(store.as_ref()).await.expect("seed failed");
    AppState::new(store)
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::configure_extractors)
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_mutual_like_end_to_end() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/like")
        .set_json(json!({"user_id": ALICE, "liked_user_id": BOB}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"status": "like registered"}));

    let req = test::TestRequest::post()
        .uri("/api/v1/like")
        .set_json(json!({"user_id": BOB, "liked_user_id": ALICE}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        json!({"status": "match found", "match": {"user_id": BOB, "matched_user_id": ALICE}})
    );

    for user in [ALICE, BOB] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/matches/{}", user))
            .to_request();
        let matches: Vec<Match> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(matches.len(), 1, "user {} should see the match once", user);
        assert_eq!(matches[0].pair(), (ALICE, BOB));
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/matches/{}", CHARLIE))
        .to_request();
    let matches: Vec<Match> = test::call_and_read_body_json(&app, req).await;
    assert!(matches.is_empty());
}

#[actix_web::test]
async fn test_recommendations_scenario() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/recommendations/{}", ALICE))
        .set_json(json!({"looking_for_gender": "male", "age_range": {"min": 28, "max": 32}}))
        .to_request();
    let recommendations: Vec<Recommendation> = test::call_and_read_body_json(&app, req).await;

    let ids: Vec<i64> = recommendations.iter().map(|r| r.user.id).collect();
    assert_eq!(ids, vec![BOB]);
    assert!(!ids.contains(&CHARLIE) && !ids.contains(&DIANA) && !ids.contains(&ETHAN));
}

#[actix_web::test]
async fn test_recommendation_response_shape() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/recommendations/{}", ALICE))
        .set_json(json!({"max_distance": 5}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let first = &body.as_array().expect("array body")[0];
    for field in ["id", "name", "gender", "latitude", "longitude", "diet_type", "age", "distance"] {
        assert!(first.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(first["name"], "Bob");
}

#[actix_web::test]
async fn test_invalid_age_range_is_bad_request() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/recommendations/{}", ALICE))
        .set_json(json!({"age_range": {"min": 35, "max": 20}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn test_unknown_user_is_not_found() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations/404")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/like")
        .set_json(json!({"user_id": ALICE, "liked_user_id": 404}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_like_is_bad_request() {
    let app = init_app!(seeded_state().await);

    for body in [
        json!({"user_id": ALICE}),
        json!({"user_id": "alice", "liked_user_id": BOB}),
        json!({"user_id": ALICE, "liked_user_id": ALICE}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/like")
            .set_json(body.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {} should be rejected", body);
    }
}

#[actix_web::test]
async fn test_non_numeric_path_is_bad_request() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::get().uri("/api/v1/matches/alice").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}
