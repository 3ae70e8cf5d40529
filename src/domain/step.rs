//! Wizard step definitions.

use serde::{Deserialize, Serialize};

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 4;

/// The four screens of the onboarding wizard, in the order they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Personal,
    Security,
    Professional,
    Preferences,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::Personal,
        Step::Security,
        Step::Professional,
        Step::Preferences,
    ];

    /// Convert a 1-based step number.
    pub fn from_number(n: u8) -> Option<Self> {
        if !(MIN_STEP..=MAX_STEP).contains(&n) {
            return None;
        }
        Some(Self::ALL[usize::from(n - MIN_STEP)])
    }

    pub fn number(self) -> u8 {
        match self {
            Self::Personal => 1,
            Self::Security => 2,
            Self::Professional => 3,
            Self::Preferences => 4,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    /// Heading shown above the step's fields.
    pub fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal Information",
            Self::Security => "Security",
            Self::Professional => "Professional Details",
            Self::Preferences => "Preferences",
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::Personal
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}
