//! HTTP client for the onboarding API.
//!
//! This is the wizard's backend when it runs against a real server: geography
//! lookups, the username availability check, and the multipart profile submit.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

use crate::api::AvailabilityResponse;
use crate::domain::{DraftProfile, Field, User};
use crate::error::ClientError;
use crate::wizard::OnboardingBackend;

/// Client for the onboarding API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct SubmitBody {
    success: bool,
    user: Option<User>,
    error: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        tracing::info!(base_url = %base_url, "API client initialized");

        Ok(Self { client, base_url })
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<R: DeserializeOwned>(&self, url: Url) -> Result<R, ClientError> {
        debug!(url = %url, "API request");
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<R>().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("API error: {status}"));
        error!(status = %status, message = %message, "API request rejected");
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Check API health.
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let url = self.endpoint(&["health"])?;
        self.client
            .get(url)
            .timeout(Duration::from_secs(5))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Build the multipart form the submit endpoint expects.
fn profile_form(draft: &DraftProfile) -> Result<Form, ClientError> {
    let text_fields = [
        (Field::Username, draft.username.clone()),
        (Field::CurrentPassword, draft.current_password.clone()),
        (Field::NewPassword, draft.new_password.clone()),
        (
            Field::Gender,
            draft.gender.map(|g| g.as_str()).unwrap_or_default().to_string(),
        ),
        (Field::CustomGender, draft.custom_gender.clone()),
        (Field::Dob, draft.dob.clone()),
        (
            Field::Profession,
            draft.profession.map(|p| p.as_str()).unwrap_or_default().to_string(),
        ),
        (Field::Company, draft.company.clone()),
        (Field::AddressLine1, draft.address_line1.clone()),
        (Field::Country, draft.country.clone()),
        (Field::State, draft.state.clone()),
        (Field::City, draft.city.clone()),
        (Field::Subscription, draft.subscription.as_str().to_string()),
    ];
    let mut form = text_fields
        .into_iter()
        .fold(Form::new(), |form, (field, value)| form.text(field.name(), value));

    // Checkbox semantics: the field is present only when checked.
    if draft.newsletter {
        form = form.text(Field::Newsletter.name(), "on");
    }

    if let Some(staged) = &draft.profile_photo {
        let part = Part::bytes(staged.file.bytes.clone())
            .file_name(staged.file.file_name.clone())
            .mime_str(&staged.file.content_type)?;
        form = form.part(Field::ProfilePhoto.name(), part);
    }

    Ok(form)
}

#[async_trait]
impl OnboardingBackend for ApiClient {
    async fn countries(&self) -> Result<Vec<String>, ClientError> {
        self.get_json(self.endpoint(&["api", "country"])?).await
    }

    async fn states_of(&self, country: &str) -> Result<Vec<String>, ClientError> {
        self.get_json(self.endpoint(&["api", "country", country, "states"])?)
            .await
    }

    async fn cities_of(&self, country: &str, state: &str) -> Result<Vec<String>, ClientError> {
        self.get_json(self.endpoint(&["api", "country", country, "states", state, "cities"])?)
            .await
    }

    #[instrument(skip(self))]
    async fn is_username_available(&self, username: &str) -> Result<bool, ClientError> {
        let mut url = self.endpoint(&["api", "user", "check-username"])?;
        url.query_pairs_mut().append_pair("username", username);
        let body: AvailabilityResponse = self.get_json(url).await?;
        debug!(available = body.available, "Username checked");
        Ok(body.available)
    }

    #[instrument(skip(self, draft), fields(username = %draft.username))]
    async fn submit_profile(&self, draft: &DraftProfile) -> Result<User, ClientError> {
        let url = self.endpoint(&["api", "user", "submit"])?;
        let response = self
            .client
            .post(url)
            .multipart(profile_form(draft)?)
            .send()
            .await?;

        let body: SubmitBody = Self::read_json(response).await?;
        match (body.success, body.user) {
            (true, Some(user)) => Ok(user),
            (_, _) => Err(ClientError::Rejected {
                status: 200,
                message: body
                    .error
                    .unwrap_or_else(|| "Submission was not accepted".to_string()),
            }),
        }
    }
}
