//! Integration tests for the HTTP API
//!
//! The router is cloned between requests; clones share one AppState, so
//! swipes recorded by one request are visible to the next.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use sparq::core::create_router;

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router();
    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["profiles"], 16);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_swipes_without_sockets_open_no_channels() {
    let app = create_router();
    for user in ["ann", "ben", "cat"] {
        let (status, _) =
            post_json(&app, &format!("/users/{}/swipe", user), r#"{"profileId": "w1", "liked": true}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, json) = get(&app, "/health").await;
    assert_eq!(json["liveUsers"], 0);
}

#[tokio::test]
async fn test_profiles_filter() {
    let app = create_router();
    let (status, json) = get(&app, "/profiles?gender=female&visualType=artistic").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json.as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["w3", "w4"]);

    let (_, json) = get(&app, "/profiles?minAge=31").await;
    assert!(json.as_array().unwrap().iter().all(|p| p["age"].as_u64().unwrap() >= 31));
}

#[tokio::test]
async fn test_fresh_model_for_unknown_user() {
    let app = create_router();
    let (status, json) = get(&app, "/users/newbie/model").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["userId"], "newbie");
    assert_eq!(json["confidence"], 0);
    assert_eq!(json["categoryScores"].as_object().unwrap().len(), 8);

    let (_, top) = get(&app, "/users/newbie/top-categories").await;
    assert_eq!(top, serde_json::json!(["athletic", "artistic", "professional"]));
}

#[tokio::test]
async fn test_swipe_flow() {
    let app = create_router();

    for id in ["w1", "w2", "m1", "m2"] {
        let body = format!(r#"{{"profileId": "{}", "liked": true}}"#, id);
        let (status, _) = post_json(&app, "/users/alice/swipe", &body).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, outcome) =
        post_json(&app, "/users/alice/swipe", r#"{"profileId": "w5", "liked": false}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["confidence"], 25);
    assert_eq!(outcome["totalSwipes"], 5);
    assert_eq!(outcome["topCategories"][0], "athletic");
    assert_eq!(outcome["reasons"][0], "R101_SWIPE_DISLIKED");

    let (_, model) = get(&app, "/users/alice/model").await;
    assert_eq!(model["categoryScores"]["athletic"], 4.0);
    assert_eq!(model["categoryScores"]["professional"], -0.5);

    let (status, prediction) = get(&app, "/users/alice/predict/w1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(prediction["score"].as_f64().unwrap() > 0.5);

    let (_, insights) = get(&app, "/users/alice/insights").await;
    assert_eq!(insights["categories"][0]["category"], "athletic");
    assert_eq!(insights["categories"][0]["strength"], "strong-preference");

    let (_, recs) = get(&app, "/users/alice/recommendations?gender=male").await;
    let recs = recs.as_array().unwrap();
    assert_eq!(recs.len(), 6);
    assert!(recs.iter().all(|r| r["id"] != "m1" && r["id"] != "m2"));
}

#[tokio::test]
async fn test_swipe_inline_profile() {
    let app = create_router();
    let body = r#"{"profile": {"id": "ext-7", "visualType": "outdoorsy", "hairColor": "auburn"}, "liked": true}"#;
    let (status, outcome) = post_json(&app, "/users/bob/swipe", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["profileId"], "ext-7");
    assert_eq!(outcome["topCategories"][0], "outdoorsy");
}

#[tokio::test]
async fn test_swipe_errors() {
    let app = create_router();

    let (status, json) =
        post_json(&app, "/users/bob/swipe", r#"{"profileId": "zz99", "liked": true}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "E103_PROFILE_NOT_FOUND");

    let (status, json) =
        post_json(&app, "/users/bob/swipe", r#"{"profile": {"id": ""}, "liked": true}"#).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "E101_INVALID_PROFILE");

    // Rejected swipes leave the model untouched
    let (_, model) = get(&app, "/users/bob/model").await;
    assert_eq!(model["confidence"], 0);
}

#[tokio::test]
async fn test_predict_unknown_profile() {
    let app = create_router();
    let (status, _) = get(&app, "/users/bob/predict/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
