//! Profile domain types
//!
//! The draft held by the wizard, the submission received by the API, and the
//! user record created from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::photo::{PhotoFile, StagedPhoto};

/// Form fields, declared in the order they appear on screen.
///
/// The ordering is what makes "the first invalid field" well defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    ProfilePhoto,
    Username,
    Gender,
    CustomGender,
    Dob,
    CurrentPassword,
    NewPassword,
    Profession,
    Company,
    AddressLine1,
    Country,
    State,
    City,
    Subscription,
    Newsletter,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::ProfilePhoto,
        Field::Username,
        Field::Gender,
        Field::CustomGender,
        Field::Dob,
        Field::CurrentPassword,
        Field::NewPassword,
        Field::Profession,
        Field::Company,
        Field::AddressLine1,
        Field::Country,
        Field::State,
        Field::City,
        Field::Subscription,
        Field::Newsletter,
    ];

    /// Form field name, as used in multipart bodies and error maps.
    pub fn name(self) -> &'static str {
        match self {
            Self::ProfilePhoto => "profilePhoto",
            Self::Username => "username",
            Self::Gender => "gender",
            Self::CustomGender => "customGender",
            Self::Dob => "dob",
            Self::CurrentPassword => "currentPassword",
            Self::NewPassword => "newPassword",
            Self::Profession => "profession",
            Self::Company => "company",
            Self::AddressLine1 => "addressLine1",
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::Subscription => "subscription",
            Self::Newsletter => "newsletter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profession {
    Student,
    Developer,
    Entrepreneur,
}

impl Profession {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Student" => Some(Self::Student),
            "Developer" => Some(Self::Developer),
            "Entrepreneur" => Some(Self::Entrepreneur),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Developer => "Developer",
            Self::Entrepreneur => "Entrepreneur",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Subscription {
    #[default]
    Basic,
    Pro,
    Enterprise,
}

impl Subscription {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Basic" => Some(Self::Basic),
            "Pro" => Some(Self::Pro),
            "Enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Pro => "Pro",
            Self::Enterprise => "Enterprise",
        }
    }
}

/// Result of the most recent username availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsernameAvailability {
    #[default]
    Unknown,
    Available,
    Taken,
}

impl From<Option<bool>> for UsernameAvailability {
    fn from(available: Option<bool>) -> Self {
        match available {
            Some(true) => Self::Available,
            Some(false) => Self::Taken,
            None => Self::Unknown,
        }
    }
}

/// The in-progress profile held by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftProfile {
    pub profile_photo: Option<StagedPhoto>,
    pub username: String,
    pub username_available: UsernameAvailability,
    pub current_password: String,
    pub new_password: String,
    pub gender: Option<Gender>,
    pub custom_gender: String,
    /// Date of birth as entered (`YYYY-MM-DD`).
    pub dob: String,
    pub profession: Option<Profession>,
    pub company: String,
    pub address_line1: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub subscription: Subscription,
    pub newsletter: bool,
}

impl Default for DraftProfile {
    fn default() -> Self {
        Self {
            profile_photo: None,
            username: String::new(),
            username_available: UsernameAvailability::Unknown,
            current_password: String::new(),
            new_password: String::new(),
            gender: None,
            custom_gender: String::new(),
            dob: String::new(),
            profession: None,
            company: String::new(),
            address_line1: String::new(),
            country: String::new(),
            state: String::new(),
            city: String::new(),
            subscription: Subscription::Basic,
            newsletter: true,
        }
    }
}

/// A profile as received by the submit endpoint.
#[derive(Debug, Clone, Default)]
pub struct ProfileSubmission {
    pub username: String,
    pub current_password: String,
    pub new_password: String,
    pub profession: Option<Profession>,
    pub company: String,
    pub address_line1: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub subscription: Subscription,
    pub newsletter: bool,
    pub photo: Option<PhotoFile>,
}

/// Persisted user record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub profession: Profession,
    pub company: Option<String>,
    pub address_line1: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub subscription: Subscription,
    pub newsletter: bool,
    /// Public path of the stored photo, e.g. `/uploads/<uuid>-me.png`.
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Values for a user record about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: Option<String>,
    pub profession: Profession,
    pub company: Option<String>,
    pub address_line1: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub subscription: Subscription,
    pub newsletter: bool,
    pub profile_photo: Option<String>,
}
