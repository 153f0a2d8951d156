//! The accessmap HTTP surface: `/health` plus the versioned API, wrapped
//! in the middleware stack. `main.rs` and the integration tests both go
//! through [`build_app_router`].

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes::{feature, health, location};
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Prefix every catalog, location, and vote route is mounted under.
const API_PREFIX: &str = "/api/v1";

/// Build the application [`Router`] for the given state and config.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let app = Router::new()
        .merge(health::router())
        .nest(API_PREFIX, api_v1());

    with_middleware(app, config).with_state(state)
}

/// Versioned API tree.
///
/// ```text
/// /features                                            list (public)
///
/// /locations                                           list (public), create (admin)
/// /locations/{id}                                      get (public), update, delete (admin)
/// /locations/{id}/access-status                        recompute (POST, auth)
/// /locations/{id}/feature-tallies                      aggregate (public)
/// /locations/{id}/features/{feature_id}/confirmation   vote (PUT, auth)
/// /locations/{id}/confirmations/mine                   caller's votes (auth)
/// ```
fn api_v1() -> Router<AppState> {
    Router::new()
        .nest("/features", feature::router())
        .nest("/locations", location::router())
}

/// Wrap `app` in the middleware stack. Requests pass through the layers
/// from the bottom of this chain to the top: CORS, request id, tracing,
/// request id echo, timeout, then panic recovery around the handler.
fn with_middleware(app: Router<AppState>, config: &ServerConfig) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout = Duration::from_secs(config.request_timeout_secs);

    app.layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
}

/// CORS for the configured app origins. Browsers only need the methods
/// the API actually serves and the two headers clients send.
///
/// Panics at startup if an origin does not parse.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
