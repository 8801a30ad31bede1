//! Session creation and lifecycle operations.
//!
//! The manager owns the two ways into the portal: a full sign-in
//! against the directory, and guest access bound to one result set.
//! Credential and challenge checks are collaborators behind traits so
//! the delivery mechanism can change without touching the lifecycle.

use crate::error::AuthError;
use crate::session::{SessionRecord, SessionStatus};
use crate::store::SessionStore;
use chrono::{DateTime, Utc};
use flemzin_core::{RegistrationId, Result};
use flemzin_directory::{Gradebook, UserDirectory, UserRecord};
use tracing::debug;

/// Checks the one-time password presented at sign-in.
pub trait CredentialVerifier {
    fn verify(&self, record: &UserRecord, otp: &str) -> bool;
}

/// Checks the out-of-band security question guarding guest access.
pub trait ChallengeVerifier {
    /// The question shown on the guest results form.
    fn question(&self) -> &str;

    fn verify(&self, answer: &str) -> bool;
}

/// OTP verification against a single configured code.
///
/// Stands in for a real delivery channel: the portal simulates the
/// send and accepts one code for every user.
#[derive(Debug, Clone)]
pub struct StaticOtp {
    code: String,
}

impl StaticOtp {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl CredentialVerifier for StaticOtp {
    fn verify(&self, _record: &UserRecord, otp: &str) -> bool {
        otp.trim() == self.code
    }
}

/// A single static question/answer pair, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct StaticChallenge {
    question: String,
    answer: String,
}

impl StaticChallenge {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl ChallengeVerifier for StaticChallenge {
    fn question(&self) -> &str {
        &self.question
    }

    fn verify(&self, answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case(&self.answer)
    }
}

/// Creates, validates, and ends sessions.
#[derive(Debug, Clone)]
pub struct SessionManager<C, Q> {
    credentials: C,
    challenge: Q,
}

impl<C: CredentialVerifier, Q: ChallengeVerifier> SessionManager<C, Q> {
    #[must_use]
    pub fn new(credentials: C, challenge: Q) -> Self {
        Self {
            credentials,
            challenge,
        }
    }

    /// The security question to show on the guest form.
    #[must_use]
    pub fn challenge_question(&self) -> &str {
        self.challenge.question()
    }

    /// Signs a directory user in.
    ///
    /// The identity key may be a registration id or an e-mail. A miss
    /// and a wrong OTP fail with the same error so the response does
    /// not reveal which accounts exist.
    pub fn create_authenticated(
        &self,
        directory: &UserDirectory,
        identity_key: &str,
        otp: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionRecord, AuthError> {
        let Some(record) = directory.find_by_identity_key(identity_key) else {
            debug!("sign-in identity did not resolve");
            return Err(AuthError::InvalidCredentials.into());
        };
        if !self.credentials.verify(record, otp) {
            debug!(subject = %record.reg_id(), "sign-in OTP rejected");
            return Err(AuthError::InvalidCredentials.into());
        }
        debug!(subject = %record.reg_id(), role = %record.role(), "authenticated session created");
        Ok(SessionRecord::authenticated(record.reg_id().clone(), now))
    }

    /// Grants a guest session bound to one result-set key.
    ///
    /// The challenge is checked before the gradebook is consulted, so
    /// a wrong answer learns nothing about which ids hold results.
    pub fn create_guest(
        &self,
        gradebook: &Gradebook,
        reg_id: &str,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionRecord, AuthError> {
        if !self.challenge.verify(answer) {
            debug!("guest challenge answer rejected");
            return Err(AuthError::ChallengeFailed.into());
        }
        let key = RegistrationId::new(reg_id);
        if !gradebook.has_results_for(&key) {
            return Err(AuthError::ResultsNotFound {
                key: key.to_string(),
            }
            .into());
        }
        debug!(subject = %key, "guest session created");
        Ok(SessionRecord::guest(key, now))
    }

    /// Re-derives a session's validity at `now`.
    #[must_use]
    pub fn validate(&self, session: &SessionRecord, now: DateTime<Utc>) -> SessionStatus {
        session.status_at(now)
    }

    /// Ends whatever session the store holds. Idempotent: an absent
    /// session is a no-op.
    pub fn invalidate<S: SessionStore>(&self, store: &S) {
        store.clear();
        debug!("stored session invalidated");
    }
}
