//! Profile submission: store the photo, hash the password, insert the user.

use thiserror::Error;

use super::uploads::UploadStore;
use super::user_store::{StoreError, UserStore};
use crate::domain::password::hash_password;
use crate::domain::{Field, NewUser, ProfileSubmission, User};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("failed to store photo: {0}")]
    Storage(#[from] std::io::Error),

    #[error("failed to hash password: {0}")]
    Hashing(String),

    #[error("{0} is required")]
    MissingField(Field),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persist an already-checked submission.
///
/// A photo written before a later step fails stays on disk and is logged.
pub async fn submit_profile(
    store: &dyn UserStore,
    uploads: &UploadStore,
    submission: ProfileSubmission,
) -> Result<User, SubmissionError> {
    let ProfileSubmission {
        username,
        current_password: _,
        new_password,
        profession,
        company,
        address_line1,
        country,
        state,
        city,
        subscription,
        newsletter,
        photo,
    } = submission;

    let profession = profession.ok_or(SubmissionError::MissingField(Field::Profession))?;

    let profile_photo = match photo {
        Some(photo) => Some(uploads.save(&photo.file_name, &photo.bytes).await?),
        None => None,
    };

    let result = async {
        let password_hash = if new_password.is_empty() {
            None
        } else {
            let hash = tokio::task::spawn_blocking(move || hash_password(&new_password))
                .await
                .map_err(|e| SubmissionError::Hashing(e.to_string()))?
                .map_err(|e| SubmissionError::Hashing(e.to_string()))?;
            Some(hash)
        };

        let new_user = NewUser {
            username,
            password_hash,
            profession,
            company: Some(company).filter(|c| !c.trim().is_empty()),
            address_line1,
            country,
            state,
            city,
            subscription,
            newsletter,
            profile_photo: profile_photo.clone(),
        };
        Ok::<_, SubmissionError>(store.insert(new_user).await?)
    }
    .await;

    match &result {
        Ok(user) => {
            tracing::info!(user_id = %user.id, username = %user.username, "User created");
        }
        Err(e) => {
            if let Some(path) = &profile_photo {
                tracing::warn!(
                    error = %e,
                    photo = %path,
                    "Orphaned upload after failed submission"
                );
            }
        }
    }
    result
}
