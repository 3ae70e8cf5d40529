//! Password strength scoring, the new-password policy, and Argon2id hashing.
//!
//! Two character sets are in play: the strength meter credits any of a wide
//! punctuation set, while the policy enforced at validation time only accepts
//! `!@#$%^&*`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::Serialize;

/// Minimum length for a new password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Punctuation credited by the strength meter.
pub const STRENGTH_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Special characters accepted by the password policy.
pub const POLICY_SPECIAL_CHARS: &str = "!@#$%^&*";

/// Display tier for a strength score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTier {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Good,
            _ => Self::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Weak => "red",
            Self::Fair => "yellow",
            Self::Good => "blue",
            Self::Strong => "green",
        }
    }
}

/// One line of the requirement checklist under the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub label: &'static str,
    pub met: bool,
}

/// Strength of a password: a 0-4 score plus the individual requirement flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub has_min_length: bool,
    pub has_special: bool,
    pub has_digit: bool,
    pub has_uppercase: bool,
}

impl PasswordStrength {
    pub fn evaluate(password: &str) -> Self {
        let has_min_length = password.chars().count() >= MIN_PASSWORD_LEN;
        let has_special = password.chars().any(|c| STRENGTH_SPECIAL_CHARS.contains(c));
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());

        let score = [has_min_length, has_special, has_digit, has_uppercase]
            .into_iter()
            .filter(|met| *met)
            .count() as u8;

        Self {
            score,
            has_min_length,
            has_special,
            has_digit,
            has_uppercase,
        }
    }

    pub fn tier(&self) -> StrengthTier {
        StrengthTier::from_score(self.score)
    }

    pub fn requirements(&self) -> [Requirement; 4] {
        [
            Requirement {
                label: "8+ characters",
                met: self.has_min_length,
            },
            Requirement {
                label: "1+ special character",
                met: self.has_special,
            },
            Requirement {
                label: "1+ number",
                met: self.has_digit,
            },
            Requirement {
                label: "1+ uppercase letter",
                met: self.has_uppercase,
            },
        ]
    }
}

/// Policy violations for a new password, in display order.
pub fn policy_violations(password: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        violations.push("Min 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Must include number");
    }
    if !password.chars().any(|c| POLICY_SPECIAL_CHARS.contains(c)) {
        violations.push("Must include special character");
    }
    violations
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_scores_zero() {
        let strength = PasswordStrength::evaluate("");
        assert_eq!(strength.score, 0);
        assert_eq!(strength.tier(), StrengthTier::Weak);
        assert!(strength.requirements().iter().all(|r| !r.met));
    }

    #[test]
    fn each_requirement_adds_exactly_one_point() {
        // Build every combination of the four requirements and check that
        // switching one on never lowers the score and raises it by one.
        let piece = |bit: usize| match bit {
            0 => "aaaaaaaa",
            1 => "?",
            2 => "7",
            _ => "Q",
        };
        let build = |mask: usize| -> String {
            let mut s = String::from("x");
            for bit in 0..4 {
                if mask & (1 << bit) != 0 {
                    s.push_str(piece(bit));
                }
            }
            s
        };

        for mask in 0..16usize {
            let base = PasswordStrength::evaluate(&build(mask));
            assert_eq!(base.score as u32, mask.count_ones(), "mask {mask:04b}");
            for bit in 0..4 {
                if mask & (1 << bit) == 0 {
                    let more = PasswordStrength::evaluate(&build(mask | (1 << bit)));
                    assert_eq!(more.score, base.score + 1, "mask {mask:04b} + bit {bit}");
                }
            }
        }
    }

    #[test]
    fn tiers_follow_the_score() {
        assert_eq!(StrengthTier::from_score(1).label(), "Weak");
        assert_eq!(StrengthTier::from_score(1).color(), "red");
        assert_eq!(StrengthTier::from_score(2).label(), "Fair");
        assert_eq!(StrengthTier::from_score(3).color(), "blue");
        assert_eq!(PasswordStrength::evaluate("Secret#123").tier(), StrengthTier::Strong);
    }

    #[test]
    fn meter_credits_punctuation_the_policy_does_not() {
        let strength = PasswordStrength::evaluate("abcdefg1?");
        assert!(strength.has_special);
        assert_eq!(policy_violations("abcdefg1?"), vec!["Must include special character"]);
    }

    #[test]
    fn policy_lists_every_violation() {
        assert_eq!(
            policy_violations("abc"),
            vec!["Min 8 characters", "Must include number", "Must include special character"]
        );
        assert!(policy_violations("abcdefg1!").is_empty());
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret#123").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert_ne!(hash, "Secret#123");
        assert!(verify_password("Secret#123", &hash).expect("verify should succeed"));
        assert!(!verify_password("Secret#124", &hash).expect("verify should succeed"));
    }
}
