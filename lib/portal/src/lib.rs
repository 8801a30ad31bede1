//! The composed Flemzin school portal.
//!
//! This crate wires the directory, gradebook, session manager, access
//! policy, and view binder into one facade. The embedding surface
//! drives it with four operations (`sign_in`, `view_results_as_guest`,
//! `sign_out`, `navigate`) and renders whatever outcome comes back;
//! nothing here renders or reads a wall clock.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use flemzin_access::Route;
//! use flemzin_portal::{NavigationRequest, Portal, PortalConfig};
//!
//! let portal = Portal::seeded(&PortalConfig::default()).expect("seeded portal");
//! let now = Utc.with_ymd_and_hms(2024, 11, 4, 9, 0, 0).single().unwrap();
//!
//! portal.sign_in("student@flemzin.com", "555", now).expect("sign in");
//! let outcome = portal.navigate(&NavigationRequest::to(Route::Results), now);
//! assert!(outcome.view().is_some());
//! ```

pub mod config;
pub mod outcome;
pub mod portal;

// Re-export main types at crate root
pub use config::{AuthConfig, PortalConfig};
pub use outcome::{
    GuestAccess, NavigationOutcome, NavigationRequest, PageView, PortalView, SignedIn, Viewer,
};
pub use portal::Portal;
