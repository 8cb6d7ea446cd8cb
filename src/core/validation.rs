//! Field validation rules shared by guest and account forms.
//!
//! Empty values are always accepted because the fields are optional; callers
//! normalise blank input to `None` before persisting. Patterns are compiled once.

use crate::errors::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Gmail-only address rule. Case-sensitive on the domain.
#[allow(clippy::expect_used)] // Literal pattern, checked by tests
static GMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@gmail\.com$").expect("Gmail pattern is a valid regex")
});

/// Exactly ten ASCII digits, no separators or country code.
#[allow(clippy::expect_used)] // Literal pattern, checked by tests
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Phone pattern is a valid regex"));

/// Returns true when `value` is empty or a `@gmail.com` address.
#[must_use]
pub fn validate_email(value: &str) -> bool {
    value.is_empty() || GMAIL_PATTERN.is_match(value)
}

/// Returns true when `value` is empty or exactly ten digits.
#[must_use]
pub fn validate_phone(value: &str) -> bool {
    value.is_empty() || PHONE_PATTERN.is_match(value)
}

/// Checks an optional email field.
///
/// # Errors
/// Returns `ValidationError::InvalidEmail` when a value is present and fails the Gmail rule.
pub fn check_email(value: Option<&str>) -> Result<(), ValidationError> {
    if value.is_none_or(validate_email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Checks an optional phone field.
///
/// # Errors
/// Returns `ValidationError::InvalidPhone` when a value is present and is not ten digits.
pub fn check_phone(value: Option<&str>) -> Result<(), ValidationError> {
    if value.is_none_or(validate_phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// Rejects names that are empty after trimming.
///
/// # Errors
/// Returns `ValidationError::MissingField` for blank input.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

/// Rejects negative and non-finite money amounts.
///
/// # Errors
/// Returns `ValidationError::InvalidAmount` for such values.
pub fn check_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount { amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@gmail.com"));
        assert!(validate_email("first.last+events_2025%x-y@gmail.com"));
        assert!(validate_email(""));

        assert!(!validate_email("user@yahoo.com"));
        assert!(!validate_email("user@gmail.co"));
        assert!(!validate_email("@gmail.com"));
        assert!(!validate_email("user name@gmail.com"));
        assert!(!validate_email("user@gmail.com.evil.org"));
    }

    #[test]
    fn test_validate_email_is_case_sensitive() {
        assert!(!validate_email("USER@GMAIL.COM"));
        assert!(!validate_email("user@Gmail.com"));
        assert!(validate_email("USER@gmail.com"));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210"));
        assert!(validate_phone(""));

        assert!(!validate_phone("+91-9876543210"));
        assert!(!validate_phone("98765"));
        assert!(!validate_phone("98765432100"));
        assert!(!validate_phone("98765 43210"));
        assert!(!validate_phone("987654321a"));
        // Non-ASCII digits are not accepted
        assert!(!validate_phone("٩٨٧٦٥٤٣٢١٠"));
    }

    #[test]
    fn test_check_optional_fields() {
        assert_eq!(check_email(None), Ok(()));
        assert_eq!(check_email(Some("a@gmail.com")), Ok(()));
        assert_eq!(
            check_email(Some("a@outlook.com")),
            Err(ValidationError::InvalidEmail)
        );

        assert_eq!(check_phone(None), Ok(()));
        assert_eq!(check_phone(Some("0123456789")), Ok(()));
        assert_eq!(check_phone(Some("12345")), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_require_text_and_amounts() {
        assert_eq!(require_text("Name", "  Gala  "), Ok("Gala".to_string()));
        assert_eq!(
            require_text("Name", "   "),
            Err(ValidationError::MissingField { field: "Name" })
        );

        assert!(check_amount(0.0).is_ok());
        assert!(check_amount(1500.5).is_ok());
        assert!(check_amount(-1.0).is_err());
        assert!(check_amount(f64::NAN).is_err());
        assert!(check_amount(f64::INFINITY).is_err());
    }
}
