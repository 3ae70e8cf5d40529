use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub store: String,
    pub uploads: String,
}

/// Health check endpoint
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (store_ok, uploads_ok) = tokio::join!(
        state.store.health_check(),
        tokio::fs::try_exists(state.uploads.root()),
    );
    let uploads_ok = uploads_ok.unwrap_or(false);

    // The store is critical; a missing upload dir only degrades photo submits
    let status = match (store_ok, uploads_ok) {
        (true, true) => "healthy",
        (true, false) => "degraded",
        (false, _) => "unhealthy",
    };
    let status_code = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let describe = |ok: bool| (if ok { "ok" } else { "error" }).to_string();

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                store: describe(store_ok),
                uploads: describe(uploads_ok),
            },
        }),
    )
}
