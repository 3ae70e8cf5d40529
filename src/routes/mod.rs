pub mod geography;
pub mod health;
pub mod users;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Geography
        .route("/api/country", get(geography::list_countries))
        .route("/api/country/:country/states", get(geography::list_states))
        .route(
            "/api/country/:country/states/:state/cities",
            get(geography::list_cities),
        )
        // Users
        .route("/api/user/check-username", get(users::check_username))
        .route("/api/user/submit", post(users::submit_profile))
}
