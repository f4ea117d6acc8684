//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The signup source is empty.
    EmptySource,

    /// The persona key is not one of the demo personas.
    UnknownPersona(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::EmptySource => write!(f, "Signup source cannot be empty"),
            Self::UnknownPersona(key) => write!(
                f,
                "Unknown persona '{}' (expected researcher, consultant or creator)",
                key
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
