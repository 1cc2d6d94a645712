//! HTTP surface integration tests
//!
//! Exercises the full router against in-memory collaborators: list
//! ordering, the filter engine behind query parameters, the auth
//! wall on write paths, and the form validation error shape.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use shop_server::{
    Config, MemoryAuth, MemoryStorage, MemoryStore, ServerState, build_app,
};
use shared::Shop;

fn shop(id: i64, name: &str) -> Shop {
    serde_json::from_value(json!({
        "id": id,
        "created_at": "2024-04-01T10:00:00+00:00",
        "name": name,
    }))
    .unwrap()
}

fn test_app(shops: Vec<Shop>) -> Router {
    let config = Config::for_tests();
    let state = ServerState::with_collaborators(
        config.clone(),
        Arc::new(MemoryStore::with_shops(shops)),
        Arc::new(MemoryAuth::new(
            &config.dev_login_email,
            &config.dev_login_password,
        )),
        Arc::new(MemoryStorage::new()),
    );
    build_app(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::post("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"email": "dev@example.com", "password": "devpass"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["data"]["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn list_orders_recommended_then_recent() {
    let mut sushi = shop(1, "Sushi");
    sushi.updated_at = Some("2024-04-10T00:00:00+00:00".to_string());
    let mut ramen = shop(2, "Ramen");
    ramen.updated_at = Some("2024-04-20T00:00:00+00:00".to_string());
    ramen.egami_hirano = Some("egami".to_string());

    let app = test_app(vec![sushi, ramen]);
    let response = app
        .oneshot(Request::get("/api/shops").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["code"], "E0000");
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ramen", "Sushi"]);
}

#[tokio::test]
async fn list_with_query_params_applies_the_filter_engine() {
    let mut flagged = shop(1, "かね田");
    flagged.is_takemachelin = true;
    let plain = shop(2, "鮨さいとう");

    let app = test_app(vec![flagged, plain]);
    let response = app
        .oneshot(
            Request::get("/api/shops?showTakemachelin=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["鮨さいとう"]);
}

#[tokio::test]
async fn keyword_search_folds_kana() {
    let app = test_app(vec![shop(1, "ラーメン二郎"), shop(2, "鮨さいとう")]);
    let response = app
        .oneshot(
            Request::get("/api/shops?keyword=%E3%82%89%E3%83%BC%E3%82%81%E3%82%93") // らーめん
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ラーメン二郎"]);
}

#[tokio::test]
async fn write_paths_require_authentication() {
    let app = test_app(vec![]);
    let response = app
        .oneshot(
            Request::post("/api/shops")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"name": "新しい店"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "E3001");
}

#[tokio::test]
async fn create_with_session_returns_created_shop() {
    let app = test_app(vec![shop(1, "既存の店")]);
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/shops")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    json!({
                        "name": "新しい店",
                        "genre": "寿司",
                        "url": "https://example.com/shop",
                        "star": 4.5
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "新しい店");
    // id continues past the seeded row
    assert_eq!(body["data"]["id"], 2);

    // the new row shows up in the list
    let response = app
        .oneshot(Request::get("/api/shops").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_form_returns_field_details() {
    let app = test_app(vec![]);
    let token = login(&app).await;

    let response = app
        .oneshot(
            Request::post("/api/shops")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    json!({"name": "", "url": "not a url"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "E0002");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["url"].is_array());
}

#[tokio::test]
async fn get_by_id_missing_row_is_not_found() {
    let app = test_app(vec![shop(1, "店")]);
    let response = app
        .oneshot(Request::get("/api/shops/42").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "E0003");
}

#[tokio::test]
async fn delete_flow_and_legacy_id_rejection() {
    let app = test_app(vec![shop(1, "消える店")]);
    let token = login(&app).await;

    // legacy (negative) ids are read-only
    let response = app
        .clone()
        .oneshot(
            Request::delete("/api/shops/-1")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(
            Request::delete("/api/shops/1")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/api/shops").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn options_are_distinct_and_sorted() {
    let mut a = shop(1, "a");
    a.genre = Some("寿司".to_string());
    a.area_category = Some("港区".to_string());
    let mut b = shop(2, "b");
    b.genre = Some("ラーメン".to_string());
    b.area_category = Some("港区".to_string());
    let mut c = shop(3, "c");
    c.genre = Some("寿司".to_string());

    let app = test_app(vec![a, b, c]);
    let response = app
        .oneshot(Request::get("/api/options").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["genres"], json!(["ラーメン", "寿司"]));
    assert_eq!(body["data"]["areaCategories"], json!(["港区"]));
}

#[tokio::test]
async fn health_reports_version() {
    let app = test_app(vec![]);
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}
