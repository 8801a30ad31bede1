//! The access policy.
//!
//! `decide` is the portal's one authorization question: may the
//! principal described by this session context reach this route? It
//! is a pure function of the context, the route, and the directory
//! snapshot; there is no ambient state to consult and no caching of
//! past answers.

use crate::routes::{self, Actor, Route};
use crate::session::{SessionKind, SessionRecord};
use chrono::{DateTime, Utc};
use flemzin_core::Role;
use flemzin_directory::UserDirectory;
use serde::Serialize;
use tracing::{debug, warn};

/// The explicit session context threaded through every decision.
///
/// Carries the stored session (if any) together with the instant the
/// interaction happens at. Validity is always re-derived from these
/// two; nothing remembers a session as "still good".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session: Option<SessionRecord>,
    now: DateTime<Utc>,
}

impl SessionContext {
    #[must_use]
    pub fn new(session: Option<SessionRecord>, now: DateTime<Utc>) -> Self {
        Self { session, now }
    }

    /// A context with no stored session.
    #[must_use]
    pub fn anonymous(now: DateTime<Utc>) -> Self {
        Self::new(None, now)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// The stored session as loaded, valid or not.
    #[must_use]
    pub fn session(&self) -> Option<&SessionRecord> {
        self.session.as_ref()
    }

    /// The stored session, only if still valid at this context's
    /// instant.
    #[must_use]
    pub fn active_session(&self) -> Option<&SessionRecord> {
        self.session
            .as_ref()
            .filter(|session| session.is_valid_at(self.now))
    }

    /// True when a session is stored but no longer valid. The caller
    /// owning the store clears it before redirecting.
    #[must_use]
    pub fn has_expired_session(&self) -> bool {
        self.session.is_some() && self.active_session().is_none()
    }
}

/// Which terms of a result set the principal may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TermVisibility {
    /// Every recorded term is selectable.
    All,
    /// Only the most recent term is visible; the rest require a full
    /// sign-in.
    CurrentOnly,
}

/// The outcome of an access decision. Derived per interaction, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow { visibility: TermVisibility },
    DenyRedirectToLogin,
}

impl AccessDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow { .. })
    }

    #[must_use]
    pub fn visibility(&self) -> Option<TermVisibility> {
        match self {
            AccessDecision::Allow { visibility } => Some(*visibility),
            AccessDecision::DenyRedirectToLogin => None,
        }
    }
}

/// Role-scoped route authorization over a directory snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy<'a> {
    directory: &'a UserDirectory,
}

impl<'a> AccessPolicy<'a> {
    #[must_use]
    pub fn new(directory: &'a UserDirectory) -> Self {
        Self { directory }
    }

    /// Resolves the acting principal from the session context.
    ///
    /// Returns `None` for anonymous and expired contexts, and for
    /// authenticated sessions whose subject no longer resolves in the
    /// directory (a stale session is unusable, not a crash).
    #[must_use]
    pub fn actor(&self, context: &SessionContext) -> Option<Actor> {
        let session = context.active_session()?;
        match session.kind() {
            SessionKind::Guest => Some(Actor::Guest),
            SessionKind::Authenticated => {
                let Some(record) = self.directory.find_by_reg_id(session.subject_key()) else {
                    warn!(subject = %session.subject_key(), "session subject not in directory");
                    return None;
                };
                Some(Actor::Authenticated(record.role()))
            }
        }
    }

    /// Decides whether the context may reach the route.
    ///
    /// Without a usable session only the login surface is reachable.
    /// Guests are confined to their table with current-term
    /// visibility; authenticated principals get their role's table
    /// with full visibility. Anything else redirects to login.
    #[must_use]
    pub fn decide(&self, context: &SessionContext, route: Route) -> AccessDecision {
        let decision = match self.actor(context) {
            None => {
                if route == Route::Login {
                    AccessDecision::Allow {
                        visibility: TermVisibility::All,
                    }
                } else {
                    AccessDecision::DenyRedirectToLogin
                }
            }
            Some(actor) => {
                if routes::is_allowed(actor, route) {
                    let visibility = match actor {
                        Actor::Guest => TermVisibility::CurrentOnly,
                        Actor::Authenticated(_) => TermVisibility::All,
                    };
                    AccessDecision::Allow { visibility }
                } else {
                    AccessDecision::DenyRedirectToLogin
                }
            }
        };
        debug!(%route, allowed = decision.is_allowed(), "access decision");
        decision
    }
}

/// Returns true if the role may create and edit announcements rather
/// than just read them.
#[must_use]
pub fn can_manage_announcements(role: Role) -> bool {
    matches!(role, Role::Admin)
}
