//! User routes
//!
//! Username availability and the multipart profile submit.

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{AvailabilityResponse, SubmitResponse};
use crate::app::AppState;
use crate::domain::photo::{check_photo, PhotoRejection, PHOTO_REJECTED_ALERT};
use crate::domain::validation::check_submission;
use crate::domain::{Field, PhotoFile, Profession, ProfileSubmission, Subscription};
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestIdExt;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

/// GET /api/user/check-username?username=...
pub async fn check_username(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> ApiResult<AvailabilityResponse> {
    let username = query
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("username is required".to_string()))?;

    let available = state.store.find_by_username(&username).await?.is_none();
    tracing::debug!(%username, available, "Username checked");

    Ok(AvailabilityResponse { available })
}

/// POST /api/user/submit
///
/// Re-checks the photo and the form rules before anything is written.
pub async fn submit_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<SubmitResponse> {
    let request_id = headers.request_id().unwrap_or("-").to_string();

    let form = SubmittedForm::read(&mut multipart).await?;
    let submission = form.into_submission()?;

    if let Some(photo) = &submission.photo {
        check_photo(&photo.content_type, photo.size(), state.settings.upload_max_bytes).map_err(
            |rejection| {
                tracing::info!(%request_id, %rejection, file = %photo.file_name, "Photo rejected");
                match rejection {
                    PhotoRejection::TooLarge { .. } => {
                        ApiError::PayloadTooLarge(PHOTO_REJECTED_ALERT.to_string())
                    }
                    PhotoRejection::UnsupportedType(_) => {
                        ApiError::BadRequest(PHOTO_REJECTED_ALERT.to_string())
                    }
                }
            },
        )?;
    }

    let errors = check_submission(&submission);
    if !errors.is_empty() {
        tracing::info!(%request_id, %errors, "Submission failed validation");
        return Err(ApiError::Validation(errors));
    }

    let user = services::submit_profile(state.store.as_ref(), &state.uploads, submission).await?;
    tracing::info!(%request_id, user_id = %user.id, "Profile submitted");

    Ok(SubmitResponse::created(user))
}

/// Raw multipart fields keyed by form field.
#[derive(Default)]
struct SubmittedForm {
    text: HashMap<Field, String>,
    photo: Option<PhotoFile>,
}

impl SubmittedForm {
    async fn read(multipart: &mut Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(part) = multipart.next_field().await.map_err(multipart_error)? {
            let name = part.name().unwrap_or("").to_string();
            let Some(field) = Field::from_name(&name) else {
                tracing::debug!(field = %name, "Ignoring unknown form field");
                continue;
            };

            if field == Field::ProfilePhoto {
                let file_name = part.file_name().unwrap_or("").to_string();
                let content_type = part
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = part.bytes().await.map_err(multipart_error)?;
                // An untouched file input still posts an empty part
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.photo = Some(PhotoFile::new(file_name, content_type, bytes.to_vec()));
            } else {
                let value = part.text().await.map_err(multipart_error)?;
                form.text.insert(field, value);
            }
        }

        Ok(form)
    }

    fn take(&mut self, field: Field) -> String {
        self.text.remove(&field).unwrap_or_default()
    }

    fn into_submission(mut self) -> ApiResult<ProfileSubmission> {
        let profession = match self.take(Field::Profession).as_str() {
            "" => None,
            raw => Some(
                Profession::parse(raw)
                    .ok_or_else(|| ApiError::BadRequest(format!("Unknown profession '{raw}'")))?,
            ),
        };
        let subscription = match self.take(Field::Subscription).as_str() {
            "" => Subscription::default(),
            raw => Subscription::parse(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown subscription '{raw}'")))?,
        };
        let newsletter = matches!(self.take(Field::Newsletter).as_str(), "on" | "true");

        Ok(ProfileSubmission {
            username: self.take(Field::Username),
            current_password: self.take(Field::CurrentPassword),
            new_password: self.take(Field::NewPassword),
            profession,
            company: self.take(Field::Company),
            address_line1: self.take(Field::AddressLine1),
            country: self.take(Field::Country),
            state: self.take(Field::State),
            city: self.take(Field::City),
            subscription,
            newsletter,
            photo: self.photo.take(),
        })
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(PHOTO_REJECTED_ALERT.to_string())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}
