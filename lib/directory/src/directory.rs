//! The user directory.
//!
//! The directory is an immutable, fully loaded snapshot of every
//! record the portal knows. Construction validates referential
//! integrity, so policy code never observes a partially loaded or
//! self-inconsistent directory.

use crate::error::DirectoryError;
use crate::record::UserRecord;
use flemzin_core::{ClassLevel, RegistrationId, Result, Role};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// An immutable directory of user records.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    records: Vec<UserRecord>,
    by_reg_id: HashMap<RegistrationId, usize>,
}

impl UserDirectory {
    /// Builds a directory from records, validating integrity.
    ///
    /// Fails on duplicate registration ids, on e-mails shared by two
    /// records, and on guardian links that do not resolve to a student
    /// record. A directory value therefore never contains a dangling
    /// link or a shadowed login key.
    pub fn new(records: Vec<UserRecord>) -> Result<Self, DirectoryError> {
        let mut by_reg_id = HashMap::with_capacity(records.len());
        let mut emails = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_reg_id.insert(record.reg_id().clone(), index).is_some() {
                return Err(DirectoryError::DuplicateRecord {
                    id: record.reg_id().clone(),
                }
                .into());
            }
            // E-mails resolve case-insensitively, so uniqueness has to
            // hold under the same folding.
            if !emails.insert(record.email().to_ascii_lowercase()) {
                return Err(DirectoryError::DuplicateEmail {
                    email: record.email().to_string(),
                }
                .into());
            }
        }
        for record in &records {
            for link in record.guardian_links() {
                let resolves_to_student = by_reg_id
                    .get(link)
                    .map(|&index| records[index].role() == Role::Student)
                    .unwrap_or(false);
                if !resolves_to_student {
                    return Err(DirectoryError::DanglingGuardianLink {
                        parent: record.reg_id().clone(),
                        dependent: link.clone(),
                    }
                    .into());
                }
            }
        }
        debug!(records = records.len(), "user directory loaded");
        Ok(Self { records, by_reg_id })
    }

    /// Looks up a record by registration id or e-mail.
    ///
    /// Registration ids match after case normalization; e-mails match
    /// case-insensitively. This is the sign-in form's lookup.
    #[must_use]
    pub fn find_by_identity_key(&self, key: &str) -> Option<&UserRecord> {
        self.records
            .iter()
            .find(|record| record.matches_identity_key(key))
    }

    /// Looks up a record by registration id.
    #[must_use]
    pub fn find_by_reg_id(&self, id: &RegistrationId) -> Option<&UserRecord> {
        self.by_reg_id.get(id).map(|&index| &self.records[index])
    }

    /// Resolves a parent's dependents, most senior cohort first.
    ///
    /// Ordering is by class-cohort rank descending; records of equal
    /// rank keep their guardian-link order. Fails `NotFound` when the
    /// parent key does not resolve, and `DanglingGuardianLink` if a
    /// link is broken (construction prevents this, but the per-call
    /// path still refuses to hand out a partial answer).
    pub fn resolve_dependents(&self, parent: &RegistrationId) -> Result<Vec<&UserRecord>, DirectoryError> {
        let Some(record) = self.find_by_reg_id(parent) else {
            return Err(DirectoryError::NotFound {
                key: parent.to_string(),
            }
            .into());
        };
        let mut dependents = Vec::with_capacity(record.guardian_links().len());
        for link in record.guardian_links() {
            let Some(dependent) = self.find_by_reg_id(link) else {
                warn!(%parent, dependent = %link, "guardian link does not resolve");
                return Err(DirectoryError::DanglingGuardianLink {
                    parent: parent.clone(),
                    dependent: link.clone(),
                }
                .into());
            };
            dependents.push(dependent);
        }
        dependents.sort_by(|a, b| b.class_level().cmp(&a.class_level()));
        Ok(dependents)
    }

    /// Returns the staff record that is form teacher of `level`, if
    /// any.
    #[must_use]
    pub fn form_teacher_for(&self, level: ClassLevel) -> Option<&UserRecord> {
        self.records
            .iter()
            .find(|record| record.role() == Role::Staff && record.form_teacher_of() == Some(level))
    }

    /// Iterates all records in load order.
    pub fn records(&self) -> impl Iterator<Item = &UserRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(id: &str) -> RegistrationId {
        RegistrationId::new(id)
    }

    fn level(code: &str) -> ClassLevel {
        code.parse().expect("class level")
    }

    fn sample_records() -> Vec<UserRecord> {
        vec![
            UserRecord::new("Mr. & Mrs. Doe", "parent@flemzin.com", Role::Parent, reg("PAR-001"))
                .with_guardian_links(vec![reg("FZP-12345"), reg("FZP-54321")]),
            UserRecord::new("Alex Doe", "student@flemzin.com", Role::Student, reg("FZP-12345"))
                .with_class_level(level("JS2")),
            UserRecord::new("Jane Doe", "jane.doe@flemzin.com", Role::Student, reg("FZP-54321"))
                .with_class_level(level("JS1")),
            UserRecord::new("Mrs. Davis", "davis@flemzin.com", Role::Staff, reg("STF-003"))
                .with_form_teacher_of(level("JS1")),
        ]
    }

    #[test]
    fn find_by_identity_key_matches_reg_id_any_case() {
        let directory = UserDirectory::new(sample_records()).expect("load");
        let record = directory.find_by_identity_key("fzp-12345").expect("found");
        assert_eq!(record.display_name(), "Alex Doe");
    }

    #[test]
    fn find_by_identity_key_matches_email_any_case() {
        let directory = UserDirectory::new(sample_records()).expect("load");
        let record = directory
            .find_by_identity_key("Jane.Doe@Flemzin.com")
            .expect("found");
        assert_eq!(record.reg_id(), &reg("FZP-54321"));
    }

    #[test]
    fn find_by_identity_key_misses_unknown_key() {
        let directory = UserDirectory::new(sample_records()).expect("load");
        assert!(directory.find_by_identity_key("FZP-99999").is_none());
        assert!(directory.find_by_identity_key("nobody@flemzin.com").is_none());
    }

    #[test]
    fn dependents_come_most_senior_first() {
        let directory = UserDirectory::new(sample_records()).expect("load");
        let dependents = directory
            .resolve_dependents(&reg("PAR-001"))
            .expect("resolve");
        let ids: Vec<&str> = dependents.iter().map(|d| d.reg_id().as_str()).collect();
        // JS2 outranks JS1 regardless of link order.
        assert_eq!(ids, ["FZP-12345", "FZP-54321"]);
    }

    #[test]
    fn dependents_of_unknown_parent_is_not_found() {
        let directory = UserDirectory::new(sample_records()).expect("load");
        let err = directory
            .resolve_dependents(&reg("PAR-999"))
            .expect_err("should fail");
        assert!(err.to_string().contains("no directory record"));
    }

    #[test]
    fn construction_rejects_dangling_guardian_link() {
        let records = vec![
            UserRecord::new("Mr. & Mrs. Doe", "parent@flemzin.com", Role::Parent, reg("PAR-001"))
                .with_guardian_links(vec![reg("FZP-00000")]),
        ];
        let err = UserDirectory::new(records).expect_err("should fail");
        assert!(err.to_string().contains("FZP-00000"));
    }

    #[test]
    fn construction_rejects_link_to_non_student() {
        let records = vec![
            UserRecord::new("Mr. & Mrs. Doe", "parent@flemzin.com", Role::Parent, reg("PAR-001"))
                .with_guardian_links(vec![reg("STF-003")]),
            UserRecord::new("Mrs. Davis", "davis@flemzin.com", Role::Staff, reg("STF-003")),
        ];
        assert!(UserDirectory::new(records).is_err());
    }

    #[test]
    fn construction_rejects_duplicate_reg_id() {
        let records = vec![
            UserRecord::new("Alex Doe", "student@flemzin.com", Role::Student, reg("FZP-12345")),
            UserRecord::new("Alex Clone", "clone@flemzin.com", Role::Student, reg("fzp-12345")),
        ];
        let err = UserDirectory::new(records).expect_err("should fail");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn construction_rejects_duplicate_email() {
        // Lookup by e-mail is first-match-wins, so a shared e-mail
        // would silently shadow the later record.
        let records = vec![
            UserRecord::new("Alex Doe", "student@flemzin.com", Role::Student, reg("FZP-12345")),
            UserRecord::new("Alex Shadow", "Student@Flemzin.com", Role::Student, reg("FZP-67890")),
        ];
        let err = UserDirectory::new(records).expect_err("should fail");
        assert!(err.to_string().contains("duplicate login e-mail"));
    }

    #[test]
    fn form_teacher_lookup_matches_staff_scope() {
        let directory = UserDirectory::new(sample_records()).expect("load");
        let teacher = directory.form_teacher_for(level("JS1")).expect("found");
        assert_eq!(teacher.display_name(), "Mrs. Davis");
        assert!(directory.form_teacher_for(level("SS3")).is_none());
    }
}
