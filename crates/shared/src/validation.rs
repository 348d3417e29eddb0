//! Common validation utilities for form fields.

use validator::ValidationError;

/// Minimum password length accepted by the user form.
pub const MIN_PASSWORD_LENGTH: usize = 6;

lazy_static::lazy_static! {
    /// Email pattern used by the user drawer.
    pub static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Phone numbers: optional leading +, digits, spaces, dashes and parentheses.
    pub static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9][0-9 ()-]{5,18}[0-9]$").unwrap();
}

/// Validates an email address against [`EMAIL_REGEX`].
pub fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_format");
        err.message = Some("Enter a valid email address".into());
        Err(err)
    }
}

/// Validates a phone number. Empty values are accepted (the field is optional).
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() || PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Enter a valid phone number".into());
        Err(err)
    }
}

/// Validates a supplied password. Empty values are handled by the caller,
/// which knows whether a password is required.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() || password.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_length");
        err.message = Some(
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters").into(),
        );
        Err(err)
    }
}

/// Validates that a numeric threshold is finite and non-negative.
pub fn validate_threshold(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("threshold_range");
        err.message = Some("Threshold must be a non-negative number".into());
        Err(err)
    }
}

/// Builds a `required` error with the given message.
pub fn required(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("required");
    err.message = Some(message.into());
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    #[test]
    fn test_validate_email_format() {
        assert!(validate_email_format("john@example.com").is_ok());
        assert!(validate_email_format("a.b+c@fleet.co.uk").is_ok());
        assert!(validate_email_format("john@").is_err());
        assert!(validate_email_format("john example.com").is_err());
        assert!(validate_email_format("").is_err());
    }

    #[test]
    fn test_validate_email_generated_addresses() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert!(validate_email_format(&email).is_ok(), "{email}");
        }
    }

    #[test]
    fn test_validate_email_error_message() {
        let err = validate_email_format("nope").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Enter a valid email address"
        );
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("0812345678").is_ok());
        assert!(validate_phone("12").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("").is_ok());
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("abc").is_err());
    }

    #[test]
    fn test_validate_password_error_message() {
        let err = validate_password("abc").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(120.5).is_ok());
        assert!(validate_threshold(-1.0).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
        assert!(validate_threshold(f64::INFINITY).is_err());
    }

    #[test]
    fn test_required_error() {
        let err = required("Name is required");
        assert_eq!(err.code, "required");
        assert_eq!(err.message.unwrap().to_string(), "Name is required");
    }
}
