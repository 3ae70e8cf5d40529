//! Standard API response types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::User;

/// Body of `GET /api/user/check-username`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

impl IntoResponse for AvailabilityResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of a successful `POST /api/user/submit`.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub user: User,
}

impl SubmitResponse {
    pub fn created(user: User) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
