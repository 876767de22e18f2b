//! The kennel HTTP application: `/health`, the `/api/v1` tree and the
//! middleware every request passes through. `main.rs` and the integration
//! tests both build their router here.

use std::collections::BTreeSet;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Correlates a request with its log lines; generated when the caller
/// sends none and echoed on the response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Preflight results may be cached by browsers for this long.
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

pub fn build_app_router(state: AppState) -> Router {
    let config = state.config.clone();
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes());

    with_middleware(app, &config).with_state(state)
}

/// Outermost first: CORS, request id, tracing, timeout, panic recovery.
/// Layers added later wrap those added earlier, hence the reversed calls.
fn with_middleware(app: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    app.layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
        .layer(build_cors_layer(config))
}

/// One span per request, tagged with the id assigned by [`SetRequestIdLayer`].
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id,
    )
}

/// Browsers may call the API from the configured origins with any method
/// the route table serves. API keys travel in `Authorization`, never in
/// cookies, so credentials mode stays off.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(served_methods())
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(CORS_MAX_AGE)
}

fn served_methods() -> Vec<Method> {
    routes::route_table()
        .iter()
        .map(|entry| entry.method)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_methods_match_the_route_table() {
        let methods = served_methods();
        assert_eq!(
            methods,
            vec![Method::DELETE, Method::GET, Method::PATCH, Method::POST]
        );
    }
}
