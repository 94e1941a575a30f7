use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{healthz, livez},
        items::{create_item, delete_item, list_items, unsupported_method, update_item},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// Every route carries the permissive CORS header set, and known paths hit
/// with an unsupported verb fall back to a structured 405 instead of
/// axum's bare default.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/items", get(list_items).fallback(unsupported_method))
        .route(
            "/items/{id}",
            post(create_item)
                .put(update_item)
                .delete(delete_item)
                .fallback(unsupported_method),
        )
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
