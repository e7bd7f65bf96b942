//! Input validation for account registration.
//!
//! Each check records messages on a [`FieldErrors`] keyed by field name, so a
//! caller can report every problem at once.

use crate::auth::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::error::FieldErrors;

/// Maximum display name length (characters).
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum email length (bytes).
pub const MAX_EMAIL_LENGTH: usize = 254;

pub const BLANK: &str = "can't be blank";
pub const INVALID: &str = "is invalid";
pub const TAKEN: &str = "has already been taken";
pub const CONFIRMATION_MISMATCH: &str = "doesn't match password";

/// Message for a value longer than `max` characters.
pub fn too_long(max: usize) -> String {
    format!("is too long (maximum is {max} characters)")
}

/// Message for a value shorter than `min` characters.
pub fn too_short(min: usize) -> String {
    format!("is too short (minimum is {min} characters)")
}

/// Validate a display name: non-blank and at most 50 characters.
pub fn validate_name(name: &str, errors: &mut FieldErrors) {
    let name = name.trim();
    if name.is_empty() {
        errors.add("name", BLANK);
    } else if name.chars().count() > MAX_NAME_LENGTH {
        errors.add("name", too_long(MAX_NAME_LENGTH));
    }
}

/// Returns true if `email` looks like `local@domain.tld`.
///
/// This is intentionally simple; deliverability is not checked.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LENGTH || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|part| !part.is_empty())
}

/// Validate an email address.
pub fn validate_email(email: &str, errors: &mut FieldErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", BLANK);
    } else if !is_valid_email(email) {
        errors.add("email", INVALID);
    }
}

/// Validate an account password and its confirmation.
pub fn validate_password_pair(password: &str, confirmation: &str, errors: &mut FieldErrors) {
    let len = password.chars().count();
    if len == 0 {
        errors.add("password", BLANK);
    } else if len < MIN_PASSWORD_LENGTH {
        errors.add("password", too_short(MIN_PASSWORD_LENGTH));
    } else if len > MAX_PASSWORD_LENGTH {
        errors.add("password", too_long(MAX_PASSWORD_LENGTH));
    }

    if password != confirmation {
        errors.add("password_confirmation", CONFIRMATION_MISMATCH);
    }
}

/// Validate all registration fields at once.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    password_confirmation: &str,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validate_name(name, &mut errors);
    validate_email(email, &mut errors);
    validate_password_pair(password, password_confirmation, &mut errors);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration() {
        let errors = validate_registration("Alice", "alice@example.com", "password1", "password1");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_fields() {
        let errors = validate_registration("  ", "", "", "");
        assert_eq!(errors.get("name").unwrap(), [BLANK]);
        assert_eq!(errors.get("email").unwrap(), [BLANK]);
        assert_eq!(errors.get("password").unwrap(), [BLANK]);
        assert!(errors.get("password_confirmation").is_none());
    }

    #[test]
    fn test_name_too_long() {
        let mut errors = FieldErrors::new();
        validate_name(&"n".repeat(51), &mut errors);
        assert_eq!(errors.get("name").unwrap(), [too_long(50)]);

        let mut errors = FieldErrors::new();
        validate_name(&"日".repeat(50), &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_password_rules() {
        let mut errors = FieldErrors::new();
        validate_password_pair("short", "short", &mut errors);
        assert_eq!(errors.get("password").unwrap(), [too_short(8)]);

        let mut errors = FieldErrors::new();
        validate_password_pair("password1", "password2", &mut errors);
        assert!(errors.get("password").is_none());
        assert_eq!(
            errors.get("password_confirmation").unwrap(),
            [CONFIRMATION_MISMATCH]
        );
    }
}
