//! Response bodies shared by the HTTP handlers and the API client.

pub mod response;

pub use response::{AvailabilityResponse, SubmitResponse};
