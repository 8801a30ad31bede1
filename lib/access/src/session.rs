//! Session records and their validity.
//!
//! A session is a small immutable record of who signed in and when.
//! Expiry windows are code constants per session kind and are never
//! persisted; whether a session is valid is a pure function of the
//! current time and the creation time, so re-checking an old record
//! always gives the same answer for the same `now`.

use chrono::{DateTime, Duration, Utc};
use flemzin_core::RegistrationId;
use serde::{Deserialize, Serialize};

/// The kind of session a principal holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// A full sign-in by a directory user.
    Authenticated,
    /// Time-boxed access to one student's results, no role attached.
    Guest,
}

impl SessionKind {
    /// How long a session of this kind stays valid after creation.
    ///
    /// Authenticated sessions last 7 days, guest sessions 5 hours.
    #[must_use]
    pub fn expires_after(&self) -> Duration {
        match self {
            SessionKind::Authenticated => Duration::days(7),
            SessionKind::Guest => Duration::hours(5),
        }
    }
}

/// Validity of a session at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Valid,
    Expired,
}

/// An immutable session record.
///
/// For authenticated sessions the subject key is the signed-in user's
/// registration id; for guest sessions it is the single result-set key
/// the guest is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    kind: SessionKind,
    subject_key: RegistrationId,
    created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Creates an authenticated session for a directory user.
    #[must_use]
    pub fn authenticated(subject_key: RegistrationId, now: DateTime<Utc>) -> Self {
        Self {
            kind: SessionKind::Authenticated,
            subject_key,
            created_at: now,
        }
    }

    /// Creates a guest session bound to one result-set key.
    #[must_use]
    pub fn guest(subject_key: RegistrationId, now: DateTime<Utc>) -> Self {
        Self {
            kind: SessionKind::Guest,
            subject_key,
            created_at: now,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn subject_key(&self) -> &RegistrationId {
        &self.subject_key
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The instant this session stops being valid.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + self.kind.expires_after()
    }

    /// Returns the session's validity at `now`.
    ///
    /// Pure in `now`: a session is valid while `now - created_at` is
    /// strictly less than the kind's expiry window.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        if now < self.expires_at() {
            SessionStatus::Valid
        } else {
            SessionStatus::Expired
        }
    }

    /// Shorthand for `status_at(now) == Valid`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == SessionStatus::Valid
    }
}
