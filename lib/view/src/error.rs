//! Error types for the view crate.

use flemzin_core::{RegistrationId, TermId};
use std::fmt;

/// Rejections from subject and term resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A guardian asked for a record outside their guardian links, or
    /// a non-guardian asked for a record other than their own.
    GuardianMismatch {
        acting: RegistrationId,
        requested: RegistrationId,
    },
    /// No record or report set exists for the resolved key.
    NotFound { key: String },
    /// The requested term is outside the session's term visibility.
    TermRestricted { term: TermId },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GuardianMismatch { acting, requested } => {
                write!(f, "{acting} holds no guardian link to {requested}")
            }
            Self::NotFound { key } => {
                write!(f, "no results found for {key}")
            }
            Self::TermRestricted { term } => {
                write!(f, "viewing {term} requires a signed-in session")
            }
        }
    }
}

impl std::error::Error for ViewError {}

#[cfg(test)]
mod tests {
    use super::*;
    use flemzin_core::{ClassLevel, Stage, Term, TermId};

    #[test]
    fn guardian_mismatch_names_both_parties() {
        let err = ViewError::GuardianMismatch {
            acting: RegistrationId::new("PAR-001"),
            requested: RegistrationId::new("FZP-99999"),
        };
        let text = err.to_string();
        assert!(text.contains("PAR-001"));
        assert!(text.contains("FZP-99999"));
    }

    #[test]
    fn term_restricted_names_the_term() {
        let err = ViewError::TermRestricted {
            term: TermId::new(
                ClassLevel::new(Stage::Junior, 1),
                Term::Third,
                flemzin_core::AcademicYear::starting(2023),
            ),
        };
        assert!(err.to_string().contains("js1-3-2324"));
    }
}
