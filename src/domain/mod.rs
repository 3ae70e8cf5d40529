//! Domain types and pure logic
//!
//! Everything here is synchronous and free of I/O except password hashing.

pub mod geography;
pub mod password;
pub mod photo;
pub mod profile;
pub mod step;
pub mod validation;

// Re-export commonly used types
pub use photo::{PhotoFile, PreviewId, StagedPhoto};
pub use profile::*;
pub use step::Step;
pub use validation::ValidationErrors;
