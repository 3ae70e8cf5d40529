//! Field-level validation for wizard steps and API submissions.
//!
//! Validation is pure: the same input always yields the same error set, and
//! "today" is passed in rather than read from the clock.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::geography;
use super::password::policy_violations;
use super::profile::{
    DraftProfile, Field, Gender, Profession, ProfileSubmission, UsernameAvailability,
};
use super::step::Step;

pub const USERNAME_MIN_LEN: usize = 4;
pub const USERNAME_MAX_LEN: usize = 20;

/// Field → message map, iterated in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The invalid field that appears first on screen.
    pub fn first_field(&self) -> Option<Field> {
        self.0.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Validate the fields owned by `step`.
pub fn validate_step(draft: &DraftProfile, step: Step, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    match step {
        Step::Personal => check_personal(draft, today, &mut errors),
        Step::Security => {
            check_password_change(&draft.current_password, &draft.new_password, &mut errors)
        }
        Step::Professional => check_professional(&ProfessionalFields::from(draft), &mut errors),
        Step::Preferences => {}
    }
    errors
}

/// Server-side checks for a submitted profile.
///
/// Mirrors the wizard's rules for the fields the form posts.
pub fn check_submission(submission: &ProfileSubmission) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(message) = username_error(&submission.username) {
        errors.insert(Field::Username, message);
    }
    check_password_change(
        &submission.current_password,
        &submission.new_password,
        &mut errors,
    );

    check_professional(&ProfessionalFields::from(submission), &mut errors);

    errors
}

/// Format check shared by the wizard and the API.
pub fn username_error(username: &str) -> Option<&'static str> {
    let len = username.chars().count();
    if username.is_empty() {
        Some("Username is required")
    } else if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len)
        || username.chars().any(char::is_whitespace)
    {
        Some("Username must be 4-20 characters without spaces")
    } else {
        None
    }
}

fn check_personal(draft: &DraftProfile, today: NaiveDate, errors: &mut ValidationErrors) {
    if draft.profile_photo.is_none() {
        errors.insert(Field::ProfilePhoto, "Profile photo is required");
    }

    if let Some(message) = username_error(&draft.username) {
        errors.insert(Field::Username, message);
    } else if draft.username_available == UsernameAvailability::Taken {
        errors.insert(Field::Username, "Username is already taken");
    }

    match draft.gender {
        None => errors.insert(Field::Gender, "Gender is required"),
        Some(Gender::Other) if draft.custom_gender.trim().is_empty() => {
            errors.insert(Field::CustomGender, "Please specify your gender")
        }
        Some(_) => {}
    }

    if draft.dob.is_empty() {
        errors.insert(Field::Dob, "Date of birth is required");
    } else {
        match NaiveDate::parse_from_str(&draft.dob, "%Y-%m-%d") {
            Ok(dob) if dob > today => {
                errors.insert(Field::Dob, "Date of birth cannot be in the future")
            }
            Ok(_) => {}
            Err(_) => errors.insert(Field::Dob, "Date of birth must be a valid date"),
        }
    }
}

fn check_password_change(current: &str, new: &str, errors: &mut ValidationErrors) {
    if new.is_empty() {
        return;
    }
    if current.is_empty() {
        errors.insert(
            Field::CurrentPassword,
            "Current password required to change password",
        );
    }
    let violations = policy_violations(new);
    if !violations.is_empty() {
        errors.insert(Field::NewPassword, violations.join(", "));
    }
}

struct ProfessionalFields<'a> {
    profession: Option<Profession>,
    company: &'a str,
    address_line1: &'a str,
    country: &'a str,
    state: &'a str,
    city: &'a str,
}

impl<'a> From<&'a DraftProfile> for ProfessionalFields<'a> {
    fn from(d: &'a DraftProfile) -> Self {
        Self {
            profession: d.profession,
            company: &d.company,
            address_line1: &d.address_line1,
            country: &d.country,
            state: &d.state,
            city: &d.city,
        }
    }
}

impl<'a> From<&'a ProfileSubmission> for ProfessionalFields<'a> {
    fn from(s: &'a ProfileSubmission) -> Self {
        Self {
            profession: s.profession,
            company: &s.company,
            address_line1: &s.address_line1,
            country: &s.country,
            state: &s.state,
            city: &s.city,
        }
    }
}

fn check_professional(fields: &ProfessionalFields<'_>, errors: &mut ValidationErrors) {
    match fields.profession {
        None => errors.insert(Field::Profession, "Profession is required"),
        Some(Profession::Entrepreneur) if fields.company.trim().is_empty() => {
            errors.insert(Field::Company, "Company name is required")
        }
        Some(_) => {}
    }

    let required = [
        (Field::AddressLine1, fields.address_line1, "Address Line 1 is required"),
        (Field::Country, fields.country, "Country is required"),
        (Field::State, fields.state, "State is required"),
        (Field::City, fields.city, "City is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.insert(field, message);
        }
    }

    if !errors.contains(Field::State)
        && !geography::states_of(fields.country)
            .iter()
            .any(|s| *s == fields.state)
    {
        errors.insert(Field::State, "State is not valid for the selected country");
    }
    if !errors.contains(Field::City)
        && !geography::cities_of(fields.country, fields.state)
            .iter()
            .any(|c| *c == fields.city)
    {
        errors.insert(Field::City, "City is not valid for the selected state");
    }
}
