//! Routes and the static role route table.
//!
//! One table drives everything: the access policy consults it to
//! decide whether a route is reachable, and the navigation composer
//! reads the same rows to build the menu. A menu entry can therefore
//! never point at a route the policy would deny.

use flemzin_core::Role;
use serde::Serialize;
use std::fmt;

/// A navigable destination in the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// The public sign-in surface.
    Login,
    Home,
    Dashboard,
    Results,
    Calendar,
    Support,
    Announcements,
    Fees,
    Profile,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::Login => "login",
            Route::Home => "home",
            Route::Dashboard => "dashboard",
            Route::Results => "results",
            Route::Calendar => "calendar",
            Route::Support => "support",
            Route::Announcements => "announcements",
            Route::Fees => "fees",
            Route::Profile => "profile",
        };
        f.write_str(name)
    }
}

/// The acting principal a table row applies to.
///
/// Guests are not a role: they carry no directory record and exist
/// only as a session kind, so the table keys on this pairing rather
/// than on `Role` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Authenticated(Role),
    Guest,
}

/// One row of the static route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGrant {
    route: Route,
    label: &'static str,
    href: &'static str,
    in_menu: bool,
}

impl RouteGrant {
    const fn new(route: Route, label: &'static str, href: &'static str, in_menu: bool) -> Self {
        Self {
            route,
            label,
            href,
            in_menu,
        }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn href(&self) -> &'static str {
        self.href
    }

    /// Whether the row appears in the composed menu. Rows reachable
    /// but not listed (the profile page) set this false.
    #[must_use]
    pub fn in_menu(&self) -> bool {
        self.in_menu
    }

    fn nav_item(&self) -> NavItem {
        NavItem {
            route: self.route,
            label: self.label,
            href: self.href,
        }
    }
}

/// A composed menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    route: Route,
    label: &'static str,
    href: &'static str,
}

impl NavItem {
    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn href(&self) -> &'static str {
        self.href
    }
}

const ADMIN_DASHBOARD: RouteGrant = RouteGrant::new(Route::Dashboard, "Dashboard", "/admin", true);
const STAFF_DASHBOARD: RouteGrant = RouteGrant::new(Route::Dashboard, "Dashboard", "/staff", true);
const PARSTUD_HOME: RouteGrant = RouteGrant::new(Route::Home, "Home", "/parstud", true);
const GUEST_RESULTS: RouteGrant =
    RouteGrant::new(Route::Results, "Results", "/parstud/results", true);

const ADMIN_GRANTS: &[RouteGrant] = &[
    ADMIN_DASHBOARD,
    RouteGrant::new(Route::Announcements, "Announcements", "/admin/announcements", true),
    RouteGrant::new(Route::Support, "Support", "/admin/support", true),
    RouteGrant::new(Route::Profile, "Profile", "/admin/profile", false),
    RouteGrant::new(Route::Login, "Sign In", "/", false),
];

const STAFF_GRANTS: &[RouteGrant] = &[
    STAFF_DASHBOARD,
    RouteGrant::new(Route::Announcements, "Announcements", "/staff/announcements", true),
    RouteGrant::new(Route::Support, "Support", "/staff/support", true),
    RouteGrant::new(Route::Profile, "Profile", "/staff/profile", false),
    RouteGrant::new(Route::Login, "Sign In", "/", false),
];

const PARSTUD_GRANTS: &[RouteGrant] = &[
    PARSTUD_HOME,
    RouteGrant::new(Route::Results, "Results", "/parstud/results", true),
    RouteGrant::new(Route::Calendar, "Calendar", "/parstud/calendar", true),
    RouteGrant::new(Route::Support, "Support", "/parstud/support", true),
    RouteGrant::new(Route::Announcements, "Announcements", "/parstud/announcements", true),
    RouteGrant::new(Route::Fees, "Fees", "/parstud/fees", true),
    RouteGrant::new(Route::Profile, "Profile", "/parstud/profile", false),
    RouteGrant::new(Route::Login, "Sign In", "/", false),
];

const GUEST_GRANTS: &[RouteGrant] = &[
    GUEST_RESULTS,
    RouteGrant::new(Route::Login, "Sign In", "/", true),
];

/// Returns the actor's rows of the route table.
#[must_use]
pub fn grants_for(actor: Actor) -> &'static [RouteGrant] {
    match actor {
        Actor::Authenticated(Role::Admin) => ADMIN_GRANTS,
        Actor::Authenticated(Role::Staff) => STAFF_GRANTS,
        Actor::Authenticated(Role::Parent | Role::Student) => PARSTUD_GRANTS,
        Actor::Guest => GUEST_GRANTS,
    }
}

/// Returns true if the actor's table contains the route.
#[must_use]
pub fn is_allowed(actor: Actor, route: Route) -> bool {
    grants_for(actor).iter().any(|grant| grant.route == route)
}

/// Composes the actor's menu, in table order.
#[must_use]
pub fn compose_menu(actor: Actor) -> Vec<NavItem> {
    grants_for(actor)
        .iter()
        .filter(|grant| grant.in_menu)
        .map(RouteGrant::nav_item)
        .collect()
}

/// The destination a fresh sign-in lands on.
#[must_use]
pub fn landing(actor: Actor) -> NavItem {
    let grant = match actor {
        Actor::Authenticated(Role::Admin) => &ADMIN_DASHBOARD,
        Actor::Authenticated(Role::Staff) => &STAFF_DASHBOARD,
        Actor::Authenticated(Role::Parent | Role::Student) => &PARSTUD_HOME,
        Actor::Guest => &GUEST_RESULTS,
    };
    grant.nav_item()
}
