//! HTTP route handlers.
//!
//! The status page is rendered per request and must not be cached; the
//! stylesheet is immutable for the lifetime of a build. Every request runs
//! inside a span carrying its request ID.

pub mod health;
pub mod home;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{CACHE_CONTROL_PAGE, CACHE_CONTROL_STATIC};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    let page_routes = Router::new().route("/", get(home::index)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PAGE),
        ),
    );

    let static_routes = Router::new()
        .nest_service("/static", ServeDir::new(&state.config.page.static_dir))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC),
        ));

    // Probes - no caching, always fresh
    let probe_routes = Router::new()
        .route("/health", get(health::health))
        .route("/version", get(health::version));

    Router::new()
        .merge(page_routes)
        .merge(probe_routes)
        .merge(static_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
