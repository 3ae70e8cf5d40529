//! Geography lookup routes
//!
//! Unknown countries or states yield an empty list, never an error.

use axum::{extract::Path, Json};

use crate::domain::geography;

fn owned(names: Vec<&'static str>) -> Json<Vec<String>> {
    Json(names.into_iter().map(str::to_string).collect())
}

/// GET /api/country
pub async fn list_countries() -> Json<Vec<String>> {
    owned(geography::countries())
}

/// GET /api/country/:country/states
pub async fn list_states(Path(country): Path<String>) -> Json<Vec<String>> {
    owned(geography::states_of(&country))
}

/// GET /api/country/:country/states/:state/cities
pub async fn list_cities(Path((country, state)): Path<(String, String)>) -> Json<Vec<String>> {
    owned(geography::cities_of(&country, &state))
}
