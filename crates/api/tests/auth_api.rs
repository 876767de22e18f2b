//! Bearer API-key authentication.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, send, TestApp};

#[tokio::test]
async fn missing_authorization_header_is_unauthorized() {
    let app = TestApp::new();
    let response = send(app.router(), Method::GET, "/api/v1/animals", None, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .uri("/api/v1/animals")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router(), request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_secret_is_unauthorized() {
    let app = TestApp::new();
    app.new_tenant().await;

    let response = app.get("/api/v1/animals", "not-a-real-key").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid API key");
}

#[tokio::test]
async fn valid_key_resolves_its_project() {
    let app = TestApp::new();
    let (project, key) = app.new_tenant().await;

    let response = app.get("/api/v1/documents", &key).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Second request is served from the cached key lookup.
    let created = body_json(
        app.post_json(
            "/api/v1/documents",
            &key,
            serde_json::json!({"name": "Vaccination record", "mimeType": "application/pdf"}),
        )
        .await,
    )
    .await;
    assert_eq!(created["projectId"], project.to_string());
}

#[tokio::test]
async fn two_keys_of_one_project_share_records() {
    let app = TestApp::new();
    let (project, first) = app.new_tenant().await;
    let second = app.api_key_for(project).await;

    let created = body_json(
        app.post_json(
            "/api/v1/contacts",
            &first,
            serde_json::json!({"customerId": uuid::Uuid::new_v4(), "name": "Neighbour"}),
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/contacts/{}", created["id"].as_str().unwrap());

    let response = app.get(&uri, &second).await;
    assert_eq!(response.status(), StatusCode::OK);
}
