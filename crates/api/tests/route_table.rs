//! Every advertised route is actually mounted.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_bytes, send, TestApp};
use kennel_api::routes::route_table;

#[tokio::test]
async fn every_listed_route_is_mounted() {
    let app = TestApp::new();
    let (_, key) = app.new_tenant().await;

    for entry in route_table() {
        let uri = entry
            .path
            .replace("{id}", &uuid::Uuid::new_v4().to_string())
            .replace("{parent_id}", &uuid::Uuid::new_v4().to_string())
            .replace("{locale}", "en");
        let method = Method::from_bytes(entry.method.as_bytes()).unwrap();
        let body = matches!(method, Method::POST | Method::PATCH).then(|| serde_json::json!({}));

        let response = send(app.router(), method, &uri, Some(&key), body).await;
        let status = response.status();
        assert_ne!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {uri}", entry.method);

        // Handler 404s carry a JSON error code; the router fallback is empty.
        if status == StatusCode::NOT_FOUND {
            let bytes = body_bytes(response).await;
            let json: serde_json::Value = serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| panic!("{} {uri} is not mounted", entry.method));
            assert_eq!(json["code"], "NOT_FOUND");
        }
    }
}

#[test]
fn table_lists_health_and_translation_routes() {
    let table = route_table();
    assert!(table.iter().any(|r| r.path == "/health"));
    assert!(table
        .iter()
        .any(|r| r.path == "/api/v1/species/{parent_id}/translations/{locale}"));
    assert!(table
        .iter()
        .any(|r| r.method == "DELETE" && r.path == "/api/v1/animals/{id}"));
}
