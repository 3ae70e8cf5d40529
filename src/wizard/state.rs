//! Wizard state machine: the draft, the current step, and the transition
//! function that drives both.
//!
//! `WizardState::apply` is the only way user input changes the state. It never
//! performs I/O; anything that has to happen outside the state (fetches, the
//! debounced username check, alerts, focus) is returned as an [`Effect`].
//! Results of those fetches come back through [`WizardState::complete`].

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::NaiveDate;

use crate::domain::photo::{check_photo, MAX_PHOTO_BYTES, PHOTO_REJECTED_ALERT};
use crate::domain::validation::{validate_step, ValidationErrors};
use crate::domain::{
    DraftProfile, Field, Gender, PhotoFile, PreviewId, Profession, StagedPhoto, Step, Subscription,
    User, UsernameAvailability,
};

/// Quiet period before a username availability check fires.
pub const USERNAME_CHECK_DELAY: Duration = Duration::from_millis(500);

/// Usernames shorter than this are never checked.
pub const MIN_USERNAME_CHECK_LEN: usize = 4;

pub const FIX_ERRORS_ALERT: &str = "Please fix all errors before submitting";
pub const SUBMIT_SUCCESS_ALERT: &str = "Profile submitted successfully";
pub const SUBMIT_FAILED_ALERT: &str = "Submission failed";

/// User input accepted by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Next,
    Back,
    /// Jump to a 1-based step number.
    JumpTo(u8),
    FieldChanged(Field, String),
    /// A file was picked; `None` when the picker was dismissed.
    FileChanged(Option<PhotoFile>),
    Submit,
}

/// Work the wizard needs done outside the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchStates {
        country: String,
        generation: u64,
    },
    FetchCities {
        country: String,
        state: String,
        generation: u64,
    },
    /// (Re)start the debounced availability check for this username.
    ScheduleUsernameCheck { username: String },
    CancelUsernameCheck,
    /// The preview handle of a superseded photo selection.
    ReleasePreview(PreviewId),
    Focus(Field),
    Alert(String),
    SubmitProfile(Box<DraftProfile>),
}

/// Results of effects, fed back into the state.
#[derive(Debug, Clone)]
pub enum Completion {
    CountriesLoaded(Vec<String>),
    StatesLoaded { generation: u64, states: Vec<String> },
    CitiesLoaded { generation: u64, cities: Vec<String> },
    UsernameChecked {
        username: String,
        available: Option<bool>,
    },
    SubmissionFinished(Result<User, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStatus {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Default)]
pub struct WizardState {
    step: Step,
    status: WizardStatus,
    draft: DraftProfile,
    errors: ValidationErrors,
    touched: BTreeSet<Field>,
    countries: Vec<String>,
    states: Vec<String>,
    cities: Vec<String>,
    states_generation: u64,
    cities_generation: u64,
    last_preview: u64,
    submitted_user: Option<User>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    pub fn draft(&self) -> &DraftProfile {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn preview(&self) -> Option<PreviewId> {
        self.draft.profile_photo.as_ref().map(|p| p.preview)
    }

    pub fn submitted_user(&self) -> Option<&User> {
        self.submitted_user.as_ref()
    }

    /// Apply one user action. `today` bounds the date of birth.
    pub fn apply(&mut self, action: Action, today: NaiveDate) -> Vec<Effect> {
        if self.status != WizardStatus::Editing {
            tracing::debug!(status = ?self.status, ?action, "Ignoring action outside editing");
            return Vec::new();
        }

        match action {
            Action::Next => self.next(today),
            Action::Back => {
                if let Some(previous) = self.step.previous() {
                    self.step = previous;
                }
                Vec::new()
            }
            Action::JumpTo(n) => self.jump_to(n, today),
            Action::FieldChanged(field, value) => self.field_changed(field, value),
            Action::FileChanged(file) => self.file_changed(file),
            Action::Submit => self.submit(today),
        }
    }

    /// Apply the result of an effect.
    pub fn complete(&mut self, completion: Completion) -> Vec<Effect> {
        match completion {
            Completion::CountriesLoaded(countries) => self.countries = countries,
            Completion::StatesLoaded { generation, states } => {
                if generation == self.states_generation {
                    self.states = states;
                } else {
                    tracing::debug!(
                        generation,
                        current = self.states_generation,
                        "Dropping stale states"
                    );
                }
            }
            Completion::CitiesLoaded { generation, cities } => {
                if generation == self.cities_generation {
                    self.cities = cities;
                } else {
                    tracing::debug!(
                        generation,
                        current = self.cities_generation,
                        "Dropping stale cities"
                    );
                }
            }
            Completion::UsernameChecked {
                username,
                available,
            } => {
                if username == self.draft.username {
                    self.draft.username_available = available.into();
                }
            }
            Completion::SubmissionFinished(Ok(user)) => {
                self.status = WizardStatus::Submitted;
                self.submitted_user = Some(user);
                return vec![Effect::Alert(SUBMIT_SUCCESS_ALERT.to_string())];
            }
            Completion::SubmissionFinished(Err(error)) => {
                tracing::warn!(%error, "Profile submission failed");
                self.status = WizardStatus::Editing;
                return vec![Effect::Alert(SUBMIT_FAILED_ALERT.to_string())];
            }
        }
        Vec::new()
    }

    /// Validate `step`, replacing the current error set.
    fn check_step(&mut self, step: Step, today: NaiveDate) -> Result<(), Vec<Effect>> {
        self.errors = validate_step(&self.draft, step, today);
        match self.errors.first_field() {
            None => Ok(()),
            Some(field) => Err(vec![Effect::Focus(field)]),
        }
    }

    fn next(&mut self, today: NaiveDate) -> Vec<Effect> {
        let Some(next) = self.step.next() else {
            return Vec::new();
        };
        match self.check_step(self.step, today) {
            Ok(()) => {
                self.step = next;
                Vec::new()
            }
            Err(effects) => effects,
        }
    }

    fn jump_to(&mut self, n: u8, today: NaiveDate) -> Vec<Effect> {
        let Some(target) = Step::from_number(n) else {
            return Vec::new();
        };
        if target < self.step {
            self.step = target;
            return Vec::new();
        }
        match self.check_step(self.step, today) {
            Ok(()) => {
                self.step = target;
                Vec::new()
            }
            Err(effects) => effects,
        }
    }

    fn submit(&mut self, today: NaiveDate) -> Vec<Effect> {
        if self.step != Step::Preferences {
            return Vec::new();
        }
        for step in Step::ALL {
            if let Err(mut effects) = self.check_step(step, today) {
                self.step = step;
                effects.insert(0, Effect::Alert(FIX_ERRORS_ALERT.to_string()));
                return effects;
            }
        }
        self.status = WizardStatus::Submitting;
        vec![Effect::SubmitProfile(Box::new(self.draft.clone()))]
    }

    fn field_changed(&mut self, field: Field, value: String) -> Vec<Effect> {
        self.errors.remove(field);
        self.touched.insert(field);

        let draft = &mut self.draft;
        match field {
            // Photos arrive through `Action::FileChanged`.
            Field::ProfilePhoto => {}
            Field::Username => {
                if value == draft.username {
                    return Vec::new();
                }
                draft.username = value;
                draft.username_available = UsernameAvailability::Unknown;
                if draft.username.chars().count() >= MIN_USERNAME_CHECK_LEN {
                    return vec![Effect::ScheduleUsernameCheck {
                        username: draft.username.clone(),
                    }];
                }
                return vec![Effect::CancelUsernameCheck];
            }
            Field::Gender => draft.gender = Gender::parse(&value),
            Field::CustomGender => draft.custom_gender = value,
            Field::Dob => draft.dob = value,
            Field::CurrentPassword => draft.current_password = value,
            Field::NewPassword => draft.new_password = value,
            Field::Profession => draft.profession = Profession::parse(&value),
            Field::Company => draft.company = value,
            Field::AddressLine1 => draft.address_line1 = value,
            Field::Country => {
                if value == draft.country {
                    return Vec::new();
                }
                draft.country = value;
                draft.state.clear();
                draft.city.clear();
                self.states.clear();
                self.cities.clear();
                self.states_generation += 1;
                self.cities_generation += 1;
                if !self.draft.country.is_empty() {
                    return vec![Effect::FetchStates {
                        country: self.draft.country.clone(),
                        generation: self.states_generation,
                    }];
                }
            }
            Field::State => {
                if value == draft.state {
                    return Vec::new();
                }
                draft.state = value;
                draft.city.clear();
                self.cities.clear();
                self.cities_generation += 1;
                if !self.draft.state.is_empty() {
                    return vec![Effect::FetchCities {
                        country: self.draft.country.clone(),
                        state: self.draft.state.clone(),
                        generation: self.cities_generation,
                    }];
                }
            }
            Field::City => draft.city = value,
            Field::Subscription => {
                if let Some(subscription) = Subscription::parse(&value) {
                    draft.subscription = subscription;
                }
            }
            Field::Newsletter => draft.newsletter = matches!(value.as_str(), "on" | "true"),
        }
        Vec::new()
    }

    fn file_changed(&mut self, file: Option<PhotoFile>) -> Vec<Effect> {
        let Some(file) = file else {
            return Vec::new();
        };
        self.touched.insert(Field::ProfilePhoto);

        if let Err(rejection) = check_photo(&file.content_type, file.size(), MAX_PHOTO_BYTES) {
            tracing::debug!(%rejection, file = %file.file_name, "Rejected photo selection");
            self.errors
                .insert(Field::ProfilePhoto, "Invalid file format or size");
            return vec![Effect::Alert(PHOTO_REJECTED_ALERT.to_string())];
        }

        self.errors.remove(Field::ProfilePhoto);
        self.last_preview += 1;
        let staged = StagedPhoto {
            file,
            preview: PreviewId(self.last_preview),
        };
        match self.draft.profile_photo.replace(staged) {
            Some(old) => vec![Effect::ReleasePreview(old.preview)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn png(size: usize) -> PhotoFile {
        PhotoFile::new("me.png", "image/png", vec![0; size])
    }

    fn change(state: &mut WizardState, field: Field, value: &str) -> Vec<Effect> {
        state.apply(Action::FieldChanged(field, value.to_string()), today())
    }

    fn fill_personal(state: &mut WizardState) {
        state.apply(Action::FileChanged(Some(png(1024 * 1024))), today());
        change(state, Field::Username, "abcd");
        change(state, Field::Gender, "Male");
        change(state, Field::Dob, "2000-01-01");
    }

    fn fill_professional(state: &mut WizardState) {
        change(state, Field::Profession, "Developer");
        change(state, Field::AddressLine1, "1 Infinite Loop");
        change(state, Field::Country, "USA");
        change(state, Field::State, "California");
        change(state, Field::City, "San Francisco");
    }

    fn at_preferences() -> WizardState {
        let mut state = WizardState::new();
        fill_personal(&mut state);
        fill_professional(&mut state);
        assert!(state.apply(Action::JumpTo(4), today()).is_empty());
        assert_eq!(state.step(), Step::Preferences);
        state
    }

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "abcd".to_string(),
            password_hash: None,
            profession: Profession::Developer,
            company: None,
            address_line1: "1 Infinite Loop".to_string(),
            country: "USA".to_string(),
            state: "California".to_string(),
            city: "San Francisco".to_string(),
            subscription: Subscription::Basic,
            newsletter: true,
            profile_photo: Some("/uploads/x-me.png".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn next_on_an_empty_draft_stays_and_focuses_the_first_error() {
        let mut state = WizardState::new();
        let effects = state.apply(Action::Next, today());

        assert_eq!(state.step(), Step::Personal);
        assert_eq!(effects, vec![Effect::Focus(Field::ProfilePhoto)]);
        assert!(state.errors().contains(Field::Username));
    }

    #[test]
    fn next_advances_once_the_step_is_valid() {
        let mut state = WizardState::new();
        fill_personal(&mut state);

        assert!(state.apply(Action::Next, today()).is_empty());
        assert_eq!(state.step(), Step::Security);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn back_never_validates() {
        let mut state = WizardState::new();
        state.apply(Action::Back, today());
        assert_eq!(state.step(), Step::Personal);

        fill_personal(&mut state);
        state.apply(Action::Next, today());
        change(&mut state, Field::NewPassword, "weak");
        state.apply(Action::Back, today());
        assert_eq!(state.step(), Step::Personal);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn jumping_backwards_skips_validation() {
        let mut state = at_preferences();
        change(&mut state, Field::Username, "x");

        assert!(state.apply(Action::JumpTo(1), today()).is_empty());
        assert_eq!(state.step(), Step::Personal);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn jumping_forward_is_blocked_by_current_step_errors() {
        let mut state = WizardState::new();
        let effects = state.apply(Action::JumpTo(3), today());
        assert_eq!(state.step(), Step::Personal);
        assert!(!effects.is_empty());
        assert!(!state.errors().is_empty());

        fill_personal(&mut state);
        assert!(state.apply(Action::JumpTo(3), today()).is_empty());
        assert_eq!(state.step(), Step::Professional);
    }

    #[test]
    fn jump_to_an_unknown_step_is_ignored() {
        let mut state = WizardState::new();
        assert!(state.apply(Action::JumpTo(0), today()).is_empty());
        assert!(state.apply(Action::JumpTo(9), today()).is_empty());
        assert_eq!(state.step(), Step::Personal);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut state = WizardState::new();
        state.apply(Action::Next, today());
        assert!(state.errors().contains(Field::Gender));

        change(&mut state, Field::Gender, "Female");
        assert!(!state.errors().contains(Field::Gender));
        assert!(state.errors().contains(Field::Dob));
        assert!(state.is_touched(Field::Gender));
        assert!(!state.is_touched(Field::Dob));
    }

    #[test]
    fn country_change_resets_children_and_fetches_states_once() {
        let mut state = WizardState::new();
        change(&mut state, Field::Country, "India");
        change(&mut state, Field::State, "Delhi");
        change(&mut state, Field::City, "New Delhi");

        let effects = change(&mut state, Field::Country, "USA");
        assert_eq!(state.draft().state, "");
        assert_eq!(state.draft().city, "");
        let fetches: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::FetchStates { .. }))
            .collect();
        assert_eq!(fetches.len(), 1);
        assert!(matches!(
            fetches[0],
            Effect::FetchStates { country, .. } if country == "USA"
        ));
    }

    #[test]
    fn state_change_resets_city_and_fetches_cities_once() {
        let mut state = WizardState::new();
        change(&mut state, Field::Country, "India");
        change(&mut state, Field::State, "Delhi");
        change(&mut state, Field::City, "New Delhi");

        let effects = change(&mut state, Field::State, "Maharashtra");
        assert_eq!(state.draft().city, "");
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::FetchCities { country, state, .. } => {
                assert_eq!(country, "India");
                assert_eq!(state, "Maharashtra");
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn reselecting_the_same_country_does_nothing() {
        let mut state = WizardState::new();
        change(&mut state, Field::Country, "India");
        change(&mut state, Field::State, "Delhi");
        assert!(change(&mut state, Field::Country, "India").is_empty());
        assert_eq!(state.draft().state, "Delhi");
    }

    #[test]
    fn stale_states_responses_are_dropped() {
        let mut state = WizardState::new();
        let first = change(&mut state, Field::Country, "India");
        let second = change(&mut state, Field::Country, "USA");

        let generation_of = |effects: &[Effect]| match &effects[0] {
            Effect::FetchStates { generation, .. } => *generation,
            other => panic!("unexpected effect {other:?}"),
        };

        state.complete(Completion::StatesLoaded {
            generation: generation_of(&second),
            states: vec!["California".into(), "Texas".into()],
        });
        state.complete(Completion::StatesLoaded {
            generation: generation_of(&first),
            states: vec!["Maharashtra".into(), "Delhi".into()],
        });

        assert_eq!(state.states(), ["California", "Texas"]);
    }

    #[test]
    fn country_change_invalidates_in_flight_cities() {
        let mut state = WizardState::new();
        change(&mut state, Field::Country, "India");
        let effects = change(&mut state, Field::State, "Delhi");
        let Effect::FetchCities { generation, .. } = effects[0].clone() else {
            panic!("expected a cities fetch");
        };

        change(&mut state, Field::Country, "USA");
        state.complete(Completion::CitiesLoaded {
            generation,
            cities: vec!["New Delhi".into()],
        });
        assert!(state.cities().is_empty());
    }

    #[test]
    fn short_usernames_cancel_instead_of_scheduling() {
        let mut state = WizardState::new();
        assert_eq!(
            change(&mut state, Field::Username, "abc"),
            vec![Effect::CancelUsernameCheck]
        );
        assert_eq!(
            change(&mut state, Field::Username, "abcd"),
            vec![Effect::ScheduleUsernameCheck {
                username: "abcd".to_string()
            }]
        );
    }

    #[test]
    fn username_results_apply_only_to_the_current_username() {
        let mut state = WizardState::new();
        change(&mut state, Field::Username, "taken");
        change(&mut state, Field::Username, "fresh");

        state.complete(Completion::UsernameChecked {
            username: "taken".to_string(),
            available: Some(false),
        });
        assert_eq!(state.draft().username_available, UsernameAvailability::Unknown);

        state.complete(Completion::UsernameChecked {
            username: "fresh".to_string(),
            available: Some(false),
        });
        assert_eq!(state.draft().username_available, UsernameAvailability::Taken);

        change(&mut state, Field::Username, "fresher");
        assert_eq!(state.draft().username_available, UsernameAvailability::Unknown);
    }

    #[test]
    fn rejected_file_is_not_staged() {
        let mut state = WizardState::new();
        let gif = PhotoFile::new("cat.gif", "image/gif", vec![0; 10]);
        let effects = state.apply(Action::FileChanged(Some(gif)), today());

        assert_eq!(effects, vec![Effect::Alert(PHOTO_REJECTED_ALERT.to_string())]);
        assert!(state.draft().profile_photo.is_none());
        assert_eq!(
            state.errors().get(Field::ProfilePhoto),
            Some("Invalid file format or size")
        );

        let huge = png(MAX_PHOTO_BYTES + 1);
        state.apply(Action::FileChanged(Some(huge)), today());
        assert!(state.draft().profile_photo.is_none());
    }

    #[test]
    fn replacing_a_photo_releases_the_old_preview() {
        let mut state = WizardState::new();
        assert!(state
            .apply(Action::FileChanged(Some(png(10))), today())
            .is_empty());
        let first = state.preview().unwrap();

        let effects = state.apply(Action::FileChanged(Some(png(20))), today());
        let second = state.preview().unwrap();
        assert_ne!(first, second);
        assert_eq!(effects, vec![Effect::ReleasePreview(first)]);
    }

    #[test]
    fn dismissed_picker_changes_nothing() {
        let mut state = WizardState::new();
        state.apply(Action::FileChanged(Some(png(10))), today());
        let preview = state.preview();
        assert!(state.apply(Action::FileChanged(None), today()).is_empty());
        assert_eq!(state.preview(), preview);
    }

    #[test]
    fn submit_is_only_reachable_from_the_last_step() {
        let mut state = WizardState::new();
        fill_personal(&mut state);
        assert!(state.apply(Action::Submit, today()).is_empty());
        assert_eq!(state.status(), WizardStatus::Editing);
    }

    #[test]
    fn state_and_city_from_another_country_block_step_three() {
        let mut state = WizardState::new();
        fill_personal(&mut state);
        let effects = change(&mut state, Field::Country, "India");
        let Effect::FetchStates { generation, .. } = effects[0].clone() else {
            panic!("expected a states fetch");
        };
        state.complete(Completion::StatesLoaded {
            generation,
            states: vec!["Maharashtra".into(), "Delhi".into()],
        });
        change(&mut state, Field::Profession, "Student");
        change(&mut state, Field::AddressLine1, "12 MG Road");
        change(&mut state, Field::State, "Texas");
        change(&mut state, Field::City, "Austin");

        assert!(state.apply(Action::JumpTo(3), today()).is_empty());
        let effects = state.apply(Action::JumpTo(4), today());
        assert_eq!(effects, vec![Effect::Focus(Field::State)]);
        assert_eq!(state.step(), Step::Professional);

        // Submit from the last step is caught at step three as well
        change(&mut state, Field::State, "Maharashtra");
        change(&mut state, Field::City, "Pune");
        assert!(state.apply(Action::JumpTo(4), today()).is_empty());
        change(&mut state, Field::City, "Austin");
        let effects = state.apply(Action::Submit, today());
        assert_eq!(
            effects,
            vec![
                Effect::Alert(FIX_ERRORS_ALERT.to_string()),
                Effect::Focus(Field::City)
            ]
        );
        assert_eq!(state.step(), Step::Professional);
        assert_eq!(state.status(), WizardStatus::Editing);
    }

    #[test]
    fn submit_stops_at_the_first_invalid_step() {
        let mut state = at_preferences();
        change(&mut state, Field::NewPassword, "abc");
        change(&mut state, Field::City, "");

        let effects = state.apply(Action::Submit, today());
        assert_eq!(effects[0], Effect::Alert(FIX_ERRORS_ALERT.to_string()));
        assert_eq!(effects[1], Effect::Focus(Field::CurrentPassword));
        assert_eq!(state.step(), Step::Security);
        assert!(!state.errors().contains(Field::City));
        assert_eq!(state.status(), WizardStatus::Editing);
    }

    #[test]
    fn valid_submit_requests_exactly_one_submission() {
        let mut state = at_preferences();
        change(&mut state, Field::Subscription, "Pro");

        let effects = state.apply(Action::Submit, today());
        assert_eq!(effects.len(), 1);
        let Effect::SubmitProfile(draft) = &effects[0] else {
            panic!("expected a submission");
        };
        assert_eq!(draft.username, "abcd");
        assert_eq!(draft.subscription, Subscription::Pro);
        assert_eq!(state.status(), WizardStatus::Submitting);

        // A second click while the first is in flight is ignored.
        assert!(state.apply(Action::Submit, today()).is_empty());
    }

    #[test]
    fn submission_outcomes() {
        let mut state = at_preferences();
        state.apply(Action::Submit, today());
        let effects = state.complete(Completion::SubmissionFinished(Err("boom".into())));
        assert_eq!(effects, vec![Effect::Alert(SUBMIT_FAILED_ALERT.to_string())]);
        assert_eq!(state.status(), WizardStatus::Editing);

        state.apply(Action::Submit, today());
        let effects = state.complete(Completion::SubmissionFinished(Ok(sample_user())));
        assert_eq!(effects, vec![Effect::Alert(SUBMIT_SUCCESS_ALERT.to_string())]);
        assert_eq!(state.status(), WizardStatus::Submitted);
        assert_eq!(state.submitted_user().map(|u| u.username.as_str()), Some("abcd"));
        assert!(state.apply(Action::Back, today()).is_empty());
        assert_eq!(state.step(), Step::Preferences);
    }

    #[test]
    fn newsletter_and_subscription_inputs() {
        let mut state = WizardState::new();
        change(&mut state, Field::Newsletter, "false");
        assert!(!state.draft().newsletter);
        change(&mut state, Field::Newsletter, "on");
        assert!(state.draft().newsletter);

        change(&mut state, Field::Subscription, "Platinum");
        assert_eq!(state.draft().subscription, Subscription::Basic);
        change(&mut state, Field::Subscription, "Enterprise");
        assert_eq!(state.draft().subscription, Subscription::Enterprise);
    }
}
