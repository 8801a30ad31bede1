//! The composed portal facade.
//!
//! One value owns the directory and gradebook snapshots, the session
//! manager, and the session store, and exposes the four interactions
//! the portal surface drives: sign in, guest access, sign out, and
//! navigate. Every operation takes the current instant explicitly;
//! nothing in here reads a wall clock.

use crate::config::PortalConfig;
use crate::outcome::{
    GuestAccess, NavigationOutcome, NavigationRequest, PageView, PortalView, SignedIn, Viewer,
};
use chrono::{DateTime, Utc};
use flemzin_access::{
    AccessDecision, AccessPolicy, Actor, AuthError, MemoryStore, Route, SessionContext,
    SessionManager, SessionStore, StaticChallenge, StaticOtp, TermVisibility, compose_menu,
    landing,
};
use flemzin_core::Result;
use flemzin_directory::{DirectoryError, Gradebook, UserDirectory, seed_directory, seed_gradebook};
use flemzin_view::{ViewBinder, ViewError};
use tracing::{debug, warn};

/// The composed portal.
///
/// Holds the immutable data snapshots and the session store, and
/// answers every interaction as a pure function of its inputs plus
/// whatever the store currently holds.
#[derive(Debug)]
pub struct Portal<S = MemoryStore> {
    directory: UserDirectory,
    gradebook: Gradebook,
    manager: SessionManager<StaticOtp, StaticChallenge>,
    store: S,
}

impl Portal<MemoryStore> {
    /// A portal over the seeded dataset with an in-memory store, as
    /// the development build ships.
    pub fn seeded(config: &PortalConfig) -> Result<Self, DirectoryError> {
        let directory = seed_directory()?;
        Ok(Self::new(
            directory,
            seed_gradebook(),
            config,
            MemoryStore::new(),
        ))
    }
}

impl<S: SessionStore> Portal<S> {
    #[must_use]
    pub fn new(
        directory: UserDirectory,
        gradebook: Gradebook,
        config: &PortalConfig,
        store: S,
    ) -> Self {
        let manager = SessionManager::new(
            StaticOtp::new(config.auth.otp_code.clone()),
            StaticChallenge::new(
                config.auth.challenge_question.clone(),
                config.auth.challenge_answer.clone(),
            ),
        );
        Self {
            directory,
            gradebook,
            manager,
            store,
        }
    }

    /// The security question to show on the guest results form.
    #[must_use]
    pub fn challenge_question(&self) -> &str {
        self.manager.challenge_question()
    }

    /// The session store, for surfaces that persist it elsewhere.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Signs a directory user in and persists the session.
    ///
    /// Whatever session the store held is replaced, so a guest moving
    /// to a full sign-in goes through here like anyone else. On
    /// failure the store is left untouched.
    pub fn sign_in(
        &self,
        identity_key: &str,
        otp: &str,
        now: DateTime<Utc>,
    ) -> Result<SignedIn, AuthError> {
        let session = self
            .manager
            .create_authenticated(&self.directory, identity_key, otp, now)?;
        let Some(record) = self.directory.find_by_reg_id(session.subject_key()) else {
            // The manager only issues subjects it resolved.
            warn!(subject = %session.subject_key(), "issued subject missing from directory");
            return Err(AuthError::InvalidCredentials.into());
        };
        self.store.save(&session);
        let destination = landing(Actor::Authenticated(record.role()));
        debug!(subject = %record.reg_id(), destination = destination.href(), "signed in");
        Ok(SignedIn::new(
            record.display_name().to_string(),
            record.role(),
            destination,
        ))
    }

    /// Grants a guest pass bound to one result set and persists it.
    ///
    /// On failure the store is left untouched.
    pub fn view_results_as_guest(
        &self,
        registration_id: &str,
        challenge_answer: &str,
        now: DateTime<Utc>,
    ) -> Result<GuestAccess, AuthError> {
        let session = self
            .manager
            .create_guest(&self.gradebook, registration_id, challenge_answer, now)?;
        self.store.save(&session);
        debug!(subject = %session.subject_key(), "guest access granted");
        Ok(GuestAccess::new(
            session.subject_key().clone(),
            landing(Actor::Guest),
            session.expires_at(),
        ))
    }

    /// Ends the stored session, valid or not. Idempotent: signing out
    /// with nothing stored still lands at login.
    pub fn sign_out(&self, now: DateTime<Utc>) -> NavigationOutcome {
        if let Some(session) = self.store.load() {
            debug!(
                kind = ?session.kind(),
                still_valid = session.is_valid_at(now),
                "signing out stored session"
            );
        }
        self.manager.invalidate(&self.store);
        NavigationOutcome::RedirectToLogin
    }

    /// Handles one navigation interaction.
    ///
    /// Loads the stored session, re-derives its validity at `now`,
    /// decides access, and composes the page for allowed routes. An
    /// expired stored session is cleared before the redirect outcome
    /// is returned, so the login surface never sees it again.
    pub fn navigate(&self, request: &NavigationRequest, now: DateTime<Utc>) -> NavigationOutcome {
        let context = SessionContext::new(self.store.load(), now);
        if context.has_expired_session() {
            debug!("clearing expired session before redirect");
            self.store.clear();
        }

        let policy = AccessPolicy::new(&self.directory);
        let AccessDecision::Allow { visibility } = policy.decide(&context, request.route()) else {
            return NavigationOutcome::RedirectToLogin;
        };

        let (viewer, menu) = match policy.actor(&context) {
            Some(actor) => (self.viewer_for(actor, &context), compose_menu(actor)),
            None => (Viewer::Anonymous, Vec::new()),
        };
        let page = self.bind_page(&context, request, visibility);
        NavigationOutcome::View(PortalView::new(viewer, menu, page))
    }

    fn viewer_for(&self, actor: Actor, context: &SessionContext) -> Viewer {
        match actor {
            Actor::Guest => Viewer::Guest,
            Actor::Authenticated(role) => {
                // actor() only resolves subjects present in the
                // directory, so the lookup repeats its answer.
                let display_name = context
                    .active_session()
                    .and_then(|session| self.directory.find_by_reg_id(session.subject_key()))
                    .map(|record| record.display_name().to_string())
                    .unwrap_or_default();
                Viewer::User { display_name, role }
            }
        }
    }

    fn bind_page(
        &self,
        context: &SessionContext,
        request: &NavigationRequest,
        visibility: TermVisibility,
    ) -> PageView {
        let Some(session) = context.active_session() else {
            // Only the login surface is reachable without a session.
            return PageView::Plain(request.route());
        };
        let binder = ViewBinder::new(&self.directory, &self.gradebook);
        match request.route() {
            Route::Results => {
                match binder.bind_results(session, visibility, request.subject(), request.term()) {
                    Ok(view) => PageView::Results(view),
                    Err(error) => Self::results_fallback(&error),
                }
            }
            Route::Support => match binder.bind_support(session) {
                Ok(view) => PageView::Support(view),
                Err(error) => {
                    warn!(%error, "support binding failed");
                    PageView::NotFound
                }
            },
            route => PageView::Plain(route),
        }
    }

    /// Maps a results-binding failure to what the page shows.
    ///
    /// Guardian mismatches read as not-found so crafted requests
    /// cannot probe which registration ids exist.
    fn results_fallback(error: &ViewError) -> PageView {
        match error {
            ViewError::GuardianMismatch { .. } | ViewError::NotFound { .. } => {
                debug!(%error, "results request resolved to not-found");
                PageView::NotFound
            }
            ViewError::TermRestricted { .. } => {
                debug!(%error, "restricted term needs a full sign-in");
                PageView::SignInRequired
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use flemzin_access::{NavItem, SessionKind};
    use flemzin_core::{RegistrationId, Role, TermId};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 4, 9, 0, 0).single().expect("valid time")
    }

    fn term(key: &str) -> TermId {
        key.parse().expect("term key")
    }

    fn portal() -> Portal {
        Portal::seeded(&PortalConfig::default()).expect("seeded portal")
    }

    fn results_page(outcome: &NavigationOutcome) -> &flemzin_view::ResultsView {
        match outcome.view().map(PortalView::page) {
            Some(PageView::Results(view)) => view,
            other => panic!("expected a results page, got {other:?}"),
        }
    }

    #[test]
    fn sign_in_lands_each_role_on_its_table() {
        let portal = portal();
        let cases = [
            ("admin@flemzin.com", Role::Admin, "/admin"),
            ("staff@flemzin.com", Role::Staff, "/staff"),
            ("parent@flemzin.com", Role::Parent, "/parstud"),
            ("student@flemzin.com", Role::Student, "/parstud"),
        ];
        for (identity, role, href) in cases {
            let signed_in = portal.sign_in(identity, "555", t0()).expect("sign in");
            assert_eq!(signed_in.role(), role);
            assert_eq!(signed_in.destination().href(), href);
        }
    }

    #[test]
    fn sign_in_persists_an_authenticated_session() {
        let portal = portal();
        let signed_in = portal
            .sign_in("admin@flemzin.com", "555", t0())
            .expect("sign in");
        assert_eq!(signed_in.display_name(), "Dr. Evelyn Reed");

        let stored = portal.store().load().expect("stored session");
        assert_eq!(stored.kind(), SessionKind::Authenticated);
        assert_eq!(stored.subject_key().as_str(), "ADM-001");
        assert_eq!(stored.created_at(), t0());
    }

    #[test]
    fn failed_sign_in_leaves_the_stored_session_alone() {
        let portal = portal();
        portal
            .view_results_as_guest("FZP-12345", "Computer Science", t0())
            .expect("guest access");

        let err = portal
            .sign_in("parent@flemzin.com", "556", t0())
            .expect_err("wrong OTP");
        assert!(err.to_string().contains("credentials"));

        let stored = portal.store().load().expect("stored session");
        assert_eq!(stored.kind(), SessionKind::Guest);
    }

    #[test]
    fn guest_flow_shows_the_current_term_and_nothing_else() {
        let portal = portal();
        let access = portal
            .view_results_as_guest("fzp-12345", "computer science", t0())
            .expect("guest access");
        assert_eq!(access.subject_key().as_str(), "FZP-12345");
        assert_eq!(access.destination().href(), "/parstud/results");
        assert_eq!(access.expires_at(), t0() + Duration::hours(5));

        let outcome = portal.navigate(&NavigationRequest::to(Route::Results), t0());
        let view = outcome.view().expect("results view");
        assert_eq!(view.viewer(), &Viewer::Guest);
        let labels: Vec<&str> = view.menu().iter().map(NavItem::label).collect();
        assert_eq!(labels, ["Results", "Sign In"]);
        let results = results_page(&outcome);
        assert_eq!(results.selected_term(), term("js2-1-2425"));
        assert_eq!(results.selectable_terms(), [term("js2-1-2425")]);

        // The older recorded term needs a full sign-in.
        let restricted = portal.navigate(
            &NavigationRequest::to(Route::Results).with_term(term("js1-3-2324")),
            t0(),
        );
        assert_eq!(
            restricted.view().map(PortalView::page),
            Some(&PageView::SignInRequired)
        );

        // Everything outside the guest table redirects.
        assert!(portal.navigate(&NavigationRequest::to(Route::Home), t0()).is_redirect());
        assert!(portal.navigate(&NavigationRequest::to(Route::Fees), t0()).is_redirect());
    }

    #[test]
    fn guest_upgrading_to_full_sign_in_unlocks_past_terms() {
        let portal = portal();
        portal
            .view_results_as_guest("FZP-12345", "Computer Science", t0())
            .expect("guest access");
        portal
            .sign_in("parent@flemzin.com", "555", t0())
            .expect("sign in");

        let stored = portal.store().load().expect("stored session");
        assert_eq!(stored.kind(), SessionKind::Authenticated);

        let outcome = portal.navigate(
            &NavigationRequest::to(Route::Results).with_term(term("js1-3-2324")),
            t0(),
        );
        assert_eq!(results_page(&outcome).selected_term(), term("js1-3-2324"));
    }

    #[test]
    fn expired_guest_session_is_cleared_before_the_redirect() {
        let portal = portal();
        portal
            .view_results_as_guest("FZP-12345", "Computer Science", t0())
            .expect("guest access");

        let later = t0() + Duration::hours(5) + Duration::minutes(1);
        let outcome = portal.navigate(&NavigationRequest::to(Route::Results), later);
        assert!(outcome.is_redirect());
        assert!(portal.store().load().is_none());
        assert!(portal.store().raw().is_none());

        // The login surface afterwards composes as anonymous.
        let login = portal.navigate(&NavigationRequest::to(Route::Login), later);
        assert_eq!(login.view().map(PortalView::viewer), Some(&Viewer::Anonymous));
    }

    #[test]
    fn authenticated_sessions_live_seven_days() {
        let portal = portal();
        portal
            .sign_in("student@flemzin.com", "555", t0())
            .expect("sign in");

        let almost = t0() + Duration::days(6) + Duration::hours(23);
        assert!(portal.navigate(&NavigationRequest::to(Route::Home), almost).view().is_some());

        let past = t0() + Duration::days(7) + Duration::hours(1);
        assert!(portal.navigate(&NavigationRequest::to(Route::Home), past).is_redirect());
        assert!(portal.store().load().is_none());
    }

    #[test]
    fn sign_out_clears_the_session_and_is_idempotent() {
        let portal = portal();
        portal
            .sign_in("staff@flemzin.com", "555", t0())
            .expect("sign in");

        assert!(portal.sign_out(t0()).is_redirect());
        assert!(portal.store().load().is_none());
        assert!(portal.sign_out(t0()).is_redirect());
        assert!(portal.navigate(&NavigationRequest::to(Route::Dashboard), t0()).is_redirect());
    }

    #[test]
    fn anonymous_navigation_reaches_only_the_login_surface() {
        let portal = portal();
        assert!(portal.navigate(&NavigationRequest::to(Route::Home), t0()).is_redirect());

        let outcome = portal.navigate(&NavigationRequest::to(Route::Login), t0());
        let view = outcome.view().expect("login view");
        assert_eq!(view.viewer(), &Viewer::Anonymous);
        assert!(view.menu().is_empty());
        assert_eq!(view.page(), &PageView::Plain(Route::Login));
    }

    #[test]
    fn tampered_store_payload_reads_as_anonymous() {
        let portal = portal();
        portal.store().set_raw("{\"kind\":\"guest\",\"subjectKey\":");
        assert!(portal.navigate(&NavigationRequest::to(Route::Results), t0()).is_redirect());

        let login = portal.navigate(&NavigationRequest::to(Route::Login), t0());
        assert_eq!(login.view().map(PortalView::viewer), Some(&Viewer::Anonymous));
    }

    #[test]
    fn parent_switches_between_linked_dependents_only() {
        let portal = portal();
        portal
            .sign_in("parent@flemzin.com", "555", t0())
            .expect("sign in");

        let default = portal.navigate(&NavigationRequest::to(Route::Results), t0());
        assert_eq!(results_page(&default).subject_key().as_str(), "FZP-12345");

        let jane = portal.navigate(
            &NavigationRequest::to(Route::Results)
                .with_subject(RegistrationId::new("FZP-54321")),
            t0(),
        );
        assert_eq!(results_page(&jane).subject_name(), "Jane Doe");

        // An unlinked key reads as not-found, not as a denial that
        // would confirm the key exists.
        let unlinked = portal.navigate(
            &NavigationRequest::to(Route::Results)
                .with_subject(RegistrationId::new("FZP-99999")),
            t0(),
        );
        assert_eq!(unlinked.view().map(PortalView::page), Some(&PageView::NotFound));
    }

    #[test]
    fn every_menu_entry_navigates_to_a_view() {
        let portal = portal();
        portal
            .sign_in("student@flemzin.com", "555", t0())
            .expect("sign in");

        let home = portal.navigate(&NavigationRequest::to(Route::Home), t0());
        let menu: Vec<NavItem> = home.view().expect("home view").menu().to_vec();
        assert!(!menu.is_empty());
        for item in menu {
            let outcome = portal.navigate(&NavigationRequest::to(item.route()), t0());
            assert!(outcome.view().is_some(), "menu entry {} should compose", item.label());
        }
    }

    #[test]
    fn routes_outside_the_role_table_redirect_even_when_signed_in() {
        let portal = portal();
        portal
            .sign_in("parent@flemzin.com", "555", t0())
            .expect("sign in");
        assert!(portal.navigate(&NavigationRequest::to(Route::Dashboard), t0()).is_redirect());

        portal.sign_in("admin@flemzin.com", "555", t0()).expect("sign in");
        assert!(portal.navigate(&NavigationRequest::to(Route::Fees), t0()).is_redirect());
    }

    #[test]
    fn support_page_binds_channels_for_the_acting_role() {
        let portal = portal();
        portal
            .sign_in("adekunle@flemzin.com", "555", t0())
            .expect("sign in");

        let outcome = portal.navigate(&NavigationRequest::to(Route::Support), t0());
        let Some(PageView::Support(support)) = outcome.view().map(PortalView::page) else {
            panic!("expected a support page");
        };
        let ids: Vec<u8> = support.channels().iter().map(|c| c.id()).collect();
        // Base channels, the staff room, and the JS2 class chat.
        assert_eq!(ids, [1, 2, 7, 5]);
    }

    #[test]
    fn navigation_replays_are_pure_functions_of_the_instant() {
        let portal = portal();
        portal
            .view_results_as_guest("FZP-54321", "Computer Science", t0())
            .expect("guest access");

        let fresh = portal.navigate(&NavigationRequest::to(Route::Results), t0() + Duration::hours(4));
        assert!(fresh.view().is_some());

        let stale = portal.navigate(&NavigationRequest::to(Route::Results), t0() + Duration::hours(6));
        assert!(stale.is_redirect());
    }
}
