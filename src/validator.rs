//! Input validation for the onboarding form.
//!
//! Both validators are pure: they return the input unchanged on success and a
//! [`ValidationError`] whose message is shown next to the field on failure.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Minimum length in UTF-16 code units, the unit the mobile clients count in.
const MIN_NAME_LENGTH: usize = 2;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern is valid")
});

/// Which name input a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    First,
    Last,
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameField::First => f.write_str("First name"),
            NameField::Last => f.write_str("Last name"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    NameRequired(NameField),
    #[error("{0} must be at least 2 characters long")]
    NameTooShort(NameField),
    #[error("{0} can only contain letters")]
    NameInvalidCharacters(NameField),
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    InvalidEmail,
}

pub fn validate_first_name(name: &str) -> Result<&str, ValidationError> {
    validate_name(NameField::First, name)
}

pub fn validate_last_name(name: &str) -> Result<&str, ValidationError> {
    validate_name(NameField::Last, name)
}

/// Letters are general category L*, checked per UTF-16 code unit, so
/// characters outside the Basic Multilingual Plane never qualify.
pub fn validate_name(field: NameField, name: &str) -> Result<&str, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired(field));
    }
    if name.encode_utf16().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::NameTooShort(field));
    }
    if !name.chars().all(|c| is_bmp_letter(c) || c.is_whitespace()) {
        return Err(ValidationError::NameInvalidCharacters(field));
    }
    Ok(name)
}

fn is_bmp_letter(c: char) -> bool {
    c.len_utf16() == 1
        && matches!(
            get_general_category(c),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
        )
}

pub fn validate_email(email: &str) -> Result<&str, ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules_apply_in_order() {
        use NameField::*;
        assert_eq!(validate_name(First, ""), Err(ValidationError::NameRequired(First)));
        assert_eq!(validate_name(Last, "A"), Err(ValidationError::NameTooShort(Last)));
        assert_eq!(validate_name(First, "4"), Err(ValidationError::NameTooShort(First)));
        assert_eq!(validate_name(First, "R2D2"), Err(ValidationError::NameInvalidCharacters(First)));
        assert_eq!(validate_name(Last, "Anne-Marie"), Err(ValidationError::NameInvalidCharacters(Last)));
    }

    #[test]
    fn test_name_accepts_letters_and_spaces() {
        assert_eq!(validate_first_name("Jo"), Ok("Jo"));
        assert_eq!(validate_first_name("Mary Ann"), Ok("Mary Ann"));
        assert_eq!(validate_last_name("Zoë"), Ok("Zoë"));
        assert_eq!(validate_last_name("  "), Ok("  "));
        assert_eq!(validate_first_name("李明"), Ok("李明"));
    }

    #[test]
    fn test_name_letters_follow_utf16_categories() {
        // Combining marks and letter numbers are not letters
        assert_eq!(
            validate_first_name("Zoe\u{0308}"),
            Err(ValidationError::NameInvalidCharacters(NameField::First))
        );
        assert_eq!(
            validate_first_name("Ⅻab"),
            Err(ValidationError::NameInvalidCharacters(NameField::First))
        );
        // One astral letter is two UTF-16 units: long enough, but not a BMP letter
        assert_eq!(
            validate_first_name("𐐀"),
            Err(ValidationError::NameInvalidCharacters(NameField::First))
        );
    }

    #[test]
    fn test_email_accepts_common_addresses() {
        for email in ["a@b.co", "first.last@mail.example.com", "x_y-z@host-1.org"] {
            assert_eq!(validate_email(email), Ok(email), "{email}");
        }
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
        for email in ["plain", "a@b", "a@b.c", "a@b.c0", "a b@c.com", "a+tag@b.com", "@b.com", " a@b.co"] {
            assert_eq!(validate_email(email), Err(ValidationError::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ValidationError::NameTooShort(NameField::First).to_string(),
            "First name must be at least 2 characters long"
        );
        assert_eq!(validate_last_name("").unwrap_err().to_string(), "Last name is required");
        assert_eq!(ValidationError::InvalidEmail.to_string(), "Invalid email format");
    }
}
