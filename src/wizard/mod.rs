//! The four-step onboarding wizard
//!
//! `state` is the pure transition logic, `driver` runs its effects against an
//! [`OnboardingBackend`], and `debounce` delays the username check.

pub mod debounce;
pub mod driver;
pub mod state;

pub use debounce::Debouncer;
pub use driver::{OnboardingBackend, WizardDriver};
pub use state::{Action, Completion, Effect, WizardState, WizardStatus};
