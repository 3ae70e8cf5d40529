use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::middleware::request_id_layer;
use crate::routes;
use crate::services::uploads::PUBLIC_PREFIX;
use crate::services::{UploadStore, UserStore};

/// Room for the text fields of a multipart submit on top of the photo itself.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub uploads: UploadStore,
    pub settings: Settings,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, uploads: UploadStore, settings: Settings) -> Arc<Self> {
        Arc::new(Self {
            store,
            uploads,
            settings,
        })
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // DEBUG-level spans keep INFO output to handler events
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    let body_limit = state.settings.upload_max_bytes + FORM_OVERHEAD_BYTES;
    let uploads = ServeDir::new(state.uploads.root());

    Router::new()
        .merge(routes::api_router())
        .nest_service(PUBLIC_PREFIX, uploads)
        // Middleware stack (applied bottom-up)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .max_age(max_age)
}
