//! Recognition of duplicate-value conflicts in backend error messages.

use std::fmt;

/// A uniqueness rule the backend rejected a save for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Username,
    Email,
}

impl Conflict {
    pub fn message(&self) -> &'static str {
        match self {
            Conflict::Username => "Username already exists",
            Conflict::Email => "Email already exists",
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Words that mark a message as a uniqueness violation.
const DUPLICATE_MARKERS: [&str; 5] = ["already", "exists", "duplicate", "unique", "taken"];

/// HTTP status the backend uses for uniqueness violations.
pub const CONFLICT_STATUS: u16 = 409;

/// Matches a backend error against the known duplicate rules.
///
/// The message must name the field and either carry a duplicate marker or
/// come with a 409 status. Username wins when both fields appear.
pub fn detect_conflict(message: &str, status: u16) -> Option<Conflict> {
    let message = message.to_lowercase();
    let duplicate =
        status == CONFLICT_STATUS || DUPLICATE_MARKERS.iter().any(|m| message.contains(m));
    if !duplicate {
        None
    } else if message.contains("username") {
        Some(Conflict::Username)
    } else if message.contains("email") {
        Some(Conflict::Email)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_username() {
        assert_eq!(
            detect_conflict(
                "duplicate key value violates unique constraint \"users_username_key\"",
                500
            ),
            Some(Conflict::Username)
        );
        assert_eq!(detect_conflict("Username is taken", 400), Some(Conflict::Username));
        assert_eq!(detect_conflict("username", 409), Some(Conflict::Username));
    }

    #[test]
    fn test_detects_email() {
        assert_eq!(detect_conflict("EMAIL must be unique", 400), Some(Conflict::Email));
    }

    #[test]
    fn test_unrelated_message() {
        assert_eq!(detect_conflict("internal server error", 409), None);
    }

    #[test]
    fn test_field_errors_are_not_conflicts() {
        assert_eq!(detect_conflict("Email format is invalid", 400), None);
        assert_eq!(
            detect_conflict("Username must be at least 3 characters", 422),
            None
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(Conflict::Username.to_string(), "Username already exists");
        assert_eq!(Conflict::Email.message(), "Email already exists");
    }
}
