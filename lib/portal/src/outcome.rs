//! Requests into the portal and the outcomes it hands back.
//!
//! The facade never renders anything; it returns these values and the
//! embedding surface decides what a redirect or a bound page looks
//! like on screen.

use chrono::{DateTime, Utc};
use flemzin_access::{NavItem, Route};
use flemzin_core::{RegistrationId, Role, TermId};
use flemzin_view::{ResultsView, SupportView};
use serde::Serialize;

/// A successful sign-in: who signed in and where they land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedIn {
    display_name: String,
    role: Role,
    destination: NavItem,
}

impl SignedIn {
    pub(crate) fn new(display_name: String, role: Role, destination: NavItem) -> Self {
        Self {
            display_name,
            role,
            destination,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn destination(&self) -> NavItem {
        self.destination
    }
}

/// A granted guest pass: the result set it is bound to and when it
/// lapses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestAccess {
    subject_key: RegistrationId,
    destination: NavItem,
    expires_at: DateTime<Utc>,
}

impl GuestAccess {
    pub(crate) fn new(
        subject_key: RegistrationId,
        destination: NavItem,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject_key,
            destination,
            expires_at,
        }
    }

    #[must_use]
    pub fn subject_key(&self) -> &RegistrationId {
        &self.subject_key
    }

    #[must_use]
    pub fn destination(&self) -> NavItem {
        self.destination
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// One navigation interaction: the route asked for, plus the subject
/// and term selections the results page carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    route: Route,
    subject: Option<RegistrationId>,
    term: Option<TermId>,
}

impl NavigationRequest {
    /// A plain request for a route, with no selections.
    #[must_use]
    pub fn to(route: Route) -> Self {
        Self {
            route,
            subject: None,
            term: None,
        }
    }

    /// Asks for a specific subject's data (guardian switcher links).
    #[must_use]
    pub fn with_subject(mut self, subject: RegistrationId) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Asks for a specific recorded term.
    #[must_use]
    pub fn with_term(mut self, term: TermId) -> Self {
        self.term = Some(term);
        self
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn subject(&self) -> Option<&RegistrationId> {
        self.subject.as_ref()
    }

    #[must_use]
    pub fn term(&self) -> Option<TermId> {
        self.term
    }
}

/// The outcome of one navigation interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// The principal may not reach the route. Any expired stored
    /// session has already been cleared by the time this is returned.
    RedirectToLogin,
    /// The route is reachable; the composed page.
    View(PortalView),
}

impl NavigationOutcome {
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, NavigationOutcome::RedirectToLogin)
    }

    #[must_use]
    pub fn view(&self) -> Option<&PortalView> {
        match self {
            NavigationOutcome::View(view) => Some(view),
            NavigationOutcome::RedirectToLogin => None,
        }
    }
}

/// A composed page: who is viewing, their menu, and the bound content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalView {
    viewer: Viewer,
    menu: Vec<NavItem>,
    page: PageView,
}

impl PortalView {
    pub(crate) fn new(viewer: Viewer, menu: Vec<NavItem>, page: PageView) -> Self {
        Self { viewer, menu, page }
    }

    #[must_use]
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    #[must_use]
    pub fn menu(&self) -> &[NavItem] {
        &self.menu
    }

    #[must_use]
    pub fn page(&self) -> &PageView {
        &self.page
    }
}

/// The viewing principal as the page chrome shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Viewer {
    /// A signed-in directory user.
    #[serde(rename_all = "camelCase")]
    User { display_name: String, role: Role },
    /// A guest pass holder; no directory record behind it.
    Guest,
    /// Nobody signed in. Only the login surface composes this.
    Anonymous,
}

/// The bound content of a reachable route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "page", content = "data")]
pub enum PageView {
    /// The results page with its bound report.
    Results(ResultsView),
    /// The support page with its visible channels.
    Support(SupportView),
    /// A reachable route with no bound data beyond the menu.
    Plain(Route),
    /// The requested subject or term has nothing to show. Guardian
    /// mismatches land here too, so requests cannot probe which
    /// registration ids exist.
    NotFound,
    /// The requested term is only visible to a signed-in session.
    SignInRequired,
}

#[cfg(test)]
mod tests {
    use super::*;
    use flemzin_access::{Actor, landing};

    #[test]
    fn request_builder_carries_the_selections() {
        let request = NavigationRequest::to(Route::Results)
            .with_subject(RegistrationId::new("fzp-54321"))
            .with_term("js1-1-2425".parse().expect("term key"));
        assert_eq!(request.route(), Route::Results);
        assert_eq!(request.subject().map(|key| key.as_str()), Some("FZP-54321"));
        assert_eq!(request.term().map(|term| term.to_string()), Some("js1-1-2425".to_string()));
    }

    #[test]
    fn signed_in_serializes_camel_case() {
        let outcome = SignedIn::new(
            "Alex Doe".to_string(),
            Role::Student,
            landing(Actor::Authenticated(Role::Student)),
        );
        let json = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(json["displayName"], "Alex Doe");
        assert_eq!(json["role"], "student");
        assert_eq!(json["destination"]["href"], "/parstud");
    }

    #[test]
    fn page_view_tags_its_variant() {
        let json = serde_json::to_value(PageView::SignInRequired).expect("serialize");
        assert_eq!(json["page"], "signInRequired");

        let json = serde_json::to_value(PageView::Plain(Route::Calendar)).expect("serialize");
        assert_eq!(json["page"], "plain");
        assert_eq!(json["data"], "calendar");
    }

    #[test]
    fn viewer_serializes_its_kind() {
        let json = serde_json::to_value(Viewer::User {
            display_name: "Pat Doe".to_string(),
            role: Role::Parent,
        })
        .expect("serialize");
        assert_eq!(json["kind"], "user");
        assert_eq!(json["displayName"], "Pat Doe");

        let json = serde_json::to_value(Viewer::Guest).expect("serialize");
        assert_eq!(json["kind"], "guest");
    }
}
