//! Error handling foundation for the Flemzin portal.
//!
//! This module provides the `Result` type alias using rootcause. Each
//! crate defines its own domain-specific error types in its own error
//! module, using rootcause's `.context()` to add layer-appropriate
//! context as errors propagate up the stack.
//!
//! `ParseKeyError` lives here because every key-shaped domain type
//! (registration ids, class levels, term keys) parses from strings and
//! fails the same way.

use rootcause::Report;
use std::fmt;

/// A Result type alias using rootcause's Report for error handling.
///
/// Each layer adds its own context via `.context()` as errors propagate.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Error returned when parsing a domain key from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError {
    /// The type of key that failed to parse.
    pub key_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl ParseKeyError {
    /// Creates a parse error for the given key type.
    #[must_use]
    pub fn new(key_type: &'static str, reason: impl Into<String>) -> Self {
        Self {
            key_type,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.key_type, self.reason)
    }
}

impl std::error::Error for ParseKeyError {}
