//! User records.
//!
//! A record is one row of the directory: a person the school knows
//! about, keyed by registration id. Records are immutable once the
//! directory is loaded.

use flemzin_core::{ClassLevel, RegistrationId, Role};
use serde::{Deserialize, Serialize};

/// One directory record.
///
/// The role is fixed per record. Parents carry guardian links to their
/// dependents' registration ids; students carry a class level; staff
/// may carry a form-teacher scope for at most one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Display name shown in menus and report headers.
    display_name: String,
    /// Login e-mail, matched case-insensitively.
    email: String,
    /// The record's single role.
    role: Role,
    /// School-assigned registration id, the record's primary key.
    reg_id: RegistrationId,
    /// Class level, present for students.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_level: Option<ClassLevel>,
    /// Dependents' registration ids, in enrolment order. Parents only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    guardian_links: Vec<RegistrationId>,
    /// The class a staff member is form teacher of, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    form_teacher_of: Option<ClassLevel>,
}

impl UserRecord {
    /// Creates a record with no class level, guardian links, or staff
    /// scope. Use the `with_*` builders for role-specific fields.
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        reg_id: RegistrationId,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            role,
            reg_id,
            class_level: None,
            guardian_links: Vec::new(),
            form_teacher_of: None,
        }
    }

    /// Sets the student's class level.
    #[must_use]
    pub fn with_class_level(mut self, level: ClassLevel) -> Self {
        self.class_level = Some(level);
        self
    }

    /// Sets the parent's guardian links, preserving order.
    #[must_use]
    pub fn with_guardian_links(mut self, links: Vec<RegistrationId>) -> Self {
        self.guardian_links = links;
        self
    }

    /// Sets the staff member's form-teacher scope.
    #[must_use]
    pub fn with_form_teacher_of(mut self, level: ClassLevel) -> Self {
        self.form_teacher_of = Some(level);
        self
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn reg_id(&self) -> &RegistrationId {
        &self.reg_id
    }

    #[must_use]
    pub fn class_level(&self) -> Option<ClassLevel> {
        self.class_level
    }

    /// Dependents' registration ids in enrolment order. Empty for
    /// non-parents.
    #[must_use]
    pub fn guardian_links(&self) -> &[RegistrationId] {
        &self.guardian_links
    }

    #[must_use]
    pub fn form_teacher_of(&self) -> Option<ClassLevel> {
        self.form_teacher_of
    }

    /// Returns true if `key` matches this record's registration id or
    /// e-mail. Registration ids compare after normalization; e-mails
    /// compare case-insensitively.
    #[must_use]
    pub fn matches_identity_key(&self, key: &str) -> bool {
        if self.reg_id == RegistrationId::new(key) {
            return true;
        }
        self.email.eq_ignore_ascii_case(key.trim())
    }
}
