//! Error types for the directory crate.

use flemzin_core::RegistrationId;
use std::fmt;

/// Errors from directory lookups and integrity checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// No record matches the given identity key.
    NotFound { key: String },
    /// A guardian link points at a registration id with no record, or
    /// at a record that is not a student.
    DanglingGuardianLink {
        parent: RegistrationId,
        dependent: RegistrationId,
    },
    /// Two records share the same registration id.
    DuplicateRecord { id: RegistrationId },
    /// Two records share the same login e-mail.
    DuplicateEmail { email: String },
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { key } => {
                write!(f, "no directory record for {key}")
            }
            Self::DanglingGuardianLink { parent, dependent } => {
                write!(
                    f,
                    "guardian link from {parent} to {dependent} does not resolve to a student"
                )
            }
            Self::DuplicateRecord { id } => {
                write!(f, "duplicate directory record for {id}")
            }
            Self::DuplicateEmail { email } => {
                write!(f, "duplicate login e-mail {email}")
            }
        }
    }
}

impl std::error::Error for DirectoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = DirectoryError::NotFound {
            key: "FZP-99999".to_string(),
        };
        assert!(err.to_string().contains("no directory record"));
        assert!(err.to_string().contains("FZP-99999"));
    }

    #[test]
    fn dangling_guardian_link_display() {
        let err = DirectoryError::DanglingGuardianLink {
            parent: RegistrationId::new("PAR-001"),
            dependent: RegistrationId::new("FZP-00000"),
        };
        assert!(err.to_string().contains("PAR-001"));
        assert!(err.to_string().contains("FZP-00000"));
    }

    #[test]
    fn duplicate_record_display() {
        let err = DirectoryError::DuplicateRecord {
            id: RegistrationId::new("ADM-001"),
        };
        assert!(err.to_string().contains("duplicate"));
        assert!(err.to_string().contains("ADM-001"));
    }

    #[test]
    fn duplicate_email_display() {
        let err = DirectoryError::DuplicateEmail {
            email: "student@flemzin.com".to_string(),
        };
        assert!(err.to_string().contains("duplicate"));
        assert!(err.to_string().contains("student@flemzin.com"));
    }
}
