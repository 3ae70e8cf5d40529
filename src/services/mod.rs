//! Service layer: persistence, upload storage, the submission workflow, and
//! the HTTP client the wizard talks to the API with.

pub mod api_client;
pub mod submission;
pub mod uploads;
pub mod user_store;

pub use api_client::ApiClient;
pub use submission::{submit_profile, SubmissionError};
pub use uploads::UploadStore;
pub use user_store::{MemoryUserStore, PgUserStore, StoreError, UserStore};
