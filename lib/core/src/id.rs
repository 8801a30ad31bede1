//! Identity keys for portal principals.
//!
//! Registration ids are school-assigned, human-visible keys such as
//! `FZP-12345` (students), `PAR-001` (parents), `STF-002` (staff) and
//! `ADM-001` (administrators). They arrive from login forms and route
//! parameters in arbitrary case, so construction normalizes to upper
//! case; two ids that differ only in case are the same principal.

use crate::error::ParseKeyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A school-assigned registration id identifying a portal principal or
/// a result-set subject.
///
/// Construction trims surrounding whitespace and upper-cases the value,
/// matching how the portal has always compared ids at its boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
#[serde(into = "String")]
pub struct RegistrationId(String);

impl RegistrationId {
    /// Creates a registration id, normalizing case and whitespace.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_ascii_uppercase())
    }

    /// Returns the normalized id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is empty after normalization.
    ///
    /// Empty ids never resolve in the directory; they arise from blank
    /// form fields and tampered storage, both of which must degrade to
    /// "not found" rather than fail.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RegistrationId {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self::new(s);
        if id.is_empty() {
            return Err(ParseKeyError::new("RegistrationId", "empty id"));
        }
        Ok(id)
    }
}

impl From<String> for RegistrationId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for RegistrationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<RegistrationId> for String {
    fn from(id: RegistrationId) -> Self {
        id.0
    }
}
