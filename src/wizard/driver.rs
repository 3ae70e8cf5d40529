//! Async runner for the wizard.
//!
//! Owns a [`WizardState`], executes the effects it emits against an
//! [`OnboardingBackend`], and feeds the results back in. Effects meant for the
//! person filling the form (alerts, focus requests, preview releases) are
//! handed back to the caller instead.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::mpsc;

use super::debounce::Debouncer;
use super::state::{Action, Completion, Effect, WizardState, USERNAME_CHECK_DELAY};
use crate::domain::{DraftProfile, Field, User};
use crate::error::ClientError;

/// The server operations the wizard depends on.
#[async_trait]
pub trait OnboardingBackend: Send + Sync {
    async fn countries(&self) -> Result<Vec<String>, ClientError>;

    async fn states_of(&self, country: &str) -> Result<Vec<String>, ClientError>;

    async fn cities_of(&self, country: &str, state: &str) -> Result<Vec<String>, ClientError>;

    async fn is_username_available(&self, username: &str) -> Result<bool, ClientError>;

    async fn submit_profile(&self, draft: &DraftProfile) -> Result<User, ClientError>;
}

pub struct WizardDriver<B> {
    state: WizardState,
    backend: Arc<B>,
    debouncer: Debouncer<Field>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<B: OnboardingBackend + 'static> WizardDriver<B> {
    pub fn new(backend: Arc<B>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: WizardState::new(),
            backend,
            debouncer: Debouncer::new(),
            completions_tx,
            completions_rx,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Start loading the country list for the first select.
    pub fn load_countries(&self) {
        let backend = self.backend.clone();
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let countries = backend.countries().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load countries");
                Vec::new()
            });
            let _ = tx.send(Completion::CountriesLoaded(countries));
        });
    }

    /// Apply a user action using the local calendar date.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let today = chrono::Local::now().date_naive();
        self.dispatch_on(action, today)
    }

    pub fn dispatch_on(&mut self, action: Action, today: NaiveDate) -> Vec<Effect> {
        let effects = self.state.apply(action, today);
        self.run(effects)
    }

    /// Apply every completion that has already arrived.
    pub fn pump(&mut self) -> Vec<Effect> {
        let mut surfaced = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            let effects = self.state.complete(completion);
            surfaced.extend(self.run(effects));
        }
        surfaced
    }

    /// Wait for the next completion and apply it.
    pub async fn next_completion(&mut self) -> Vec<Effect> {
        match self.completions_rx.recv().await {
            Some(completion) => {
                let effects = self.state.complete(completion);
                self.run(effects)
            }
            // Unreachable while `self` holds a sender.
            None => Vec::new(),
        }
    }

    fn run(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut surfaced = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchStates {
                    country,
                    generation,
                } => {
                    let backend = self.backend.clone();
                    let tx = self.completions_tx.clone();
                    tokio::spawn(async move {
                        let states = backend.states_of(&country).await.unwrap_or_else(|e| {
                            tracing::warn!(error = %e, %country, "Failed to load states");
                            Vec::new()
                        });
                        let _ = tx.send(Completion::StatesLoaded { generation, states });
                    });
                }
                Effect::FetchCities {
                    country,
                    state,
                    generation,
                } => {
                    let backend = self.backend.clone();
                    let tx = self.completions_tx.clone();
                    tokio::spawn(async move {
                        let cities = match backend.cities_of(&country, &state).await {
                            Ok(cities) => cities,
                            Err(e) => {
                                tracing::warn!(
                                    error = %e,
                                    %country,
                                    %state,
                                    "Failed to load cities"
                                );
                                Vec::new()
                            }
                        };
                        let _ = tx.send(Completion::CitiesLoaded { generation, cities });
                    });
                }
                Effect::ScheduleUsernameCheck { username } => {
                    let backend = self.backend.clone();
                    let tx = self.completions_tx.clone();
                    self.debouncer
                        .schedule(Field::Username, USERNAME_CHECK_DELAY, async move {
                            let available = match backend.is_username_available(&username).await {
                                Ok(available) => Some(available),
                                Err(e) => {
                                    tracing::warn!(error = %e, "Username check failed");
                                    None
                                }
                            };
                            let _ = tx.send(Completion::UsernameChecked {
                                username,
                                available,
                            });
                        });
                }
                Effect::CancelUsernameCheck => {
                    self.debouncer.cancel(&Field::Username);
                }
                Effect::SubmitProfile(draft) => {
                    let backend = self.backend.clone();
                    let tx = self.completions_tx.clone();
                    tokio::spawn(async move {
                        let result = backend
                            .submit_profile(&draft)
                            .await
                            .map_err(|e| e.to_string());
                        let _ = tx.send(Completion::SubmissionFinished(result));
                    });
                }
                Effect::ReleasePreview(_) | Effect::Focus(_) | Effect::Alert(_) => {
                    surfaced.push(effect)
                }
            }
        }
        surfaced
    }
}
