//! Error types for the access crate.

use std::fmt;

/// Errors from sign-in and guest-access attempts.
///
/// These are retryable denials: the stored session, if any, is left
/// untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Identity key did not resolve, or the one-time password was
    /// wrong. The two cases are deliberately indistinguishable.
    InvalidCredentials,
    /// The guest security question was answered incorrectly.
    ChallengeFailed,
    /// No result sets exist for the requested registration id.
    ResultsNotFound { key: String },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => {
                write!(f, "invalid credentials or OTP")
            }
            Self::ChallengeFailed => {
                write!(f, "security question answered incorrectly")
            }
            Self::ResultsNotFound { key } => {
                write!(f, "no results found for {key}")
            }
        }
    }
}

impl std::error::Error for AuthError {}
