//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring (sheets or in-memory) behind the service
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(services::build_services(&config));

    let trace = TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
        let req_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %req.method(),
            uri = %req.uri(),
            req_id
        )
    });

    let req_id = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id());

    routes::router()
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(Extension(services))
        .layer(cors_layer(&config.allowed_origin))
        .layer(trace)
        .layer(req_id)
}

/// Cross-origin requests are restricted to the one configured origin; all
/// methods and headers are allowed for it.
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!(
                origin = %allowed_origin,
                "invalid ALLOWED_ORIGIN ({e}); cross-origin requests disabled"
            );
            CorsLayer::new()
        }
    }
}
