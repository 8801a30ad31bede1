//! Session lifecycle and role-scoped access control for the Flemzin
//! school portal.
//!
//! This crate provides:
//! - Session records whose validity is a pure function of a supplied
//!   instant (`SessionRecord`, `SessionStatus`)
//! - Sign-in and guest-access flows (`SessionManager`)
//! - The single role-to-route table, menu composer, and landing
//!   destinations (`routes`)
//! - Access decisions taken from an explicit `SessionContext`
//!   (`AccessPolicy`)
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use flemzin_access::{SessionRecord, SessionStatus};
//! use flemzin_core::RegistrationId;
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).single().unwrap();
//! let session = SessionRecord::guest(RegistrationId::new("FZP-12345"), t0);
//!
//! // Validity depends only on the instant passed in, never on a
//! // wall clock read inside the crate.
//! assert_eq!(session.status_at(t0 + Duration::hours(4)), SessionStatus::Valid);
//! assert_eq!(session.status_at(t0 + Duration::hours(6)), SessionStatus::Expired);
//! ```

pub mod error;
pub mod manager;
pub mod policy;
pub mod routes;
pub mod session;
pub mod store;

// Re-export main types at crate root
pub use error::AuthError;
pub use manager::{
    ChallengeVerifier, CredentialVerifier, SessionManager, StaticChallenge, StaticOtp,
};
pub use policy::{
    AccessDecision, AccessPolicy, SessionContext, TermVisibility, can_manage_announcements,
};
pub use routes::{Actor, NavItem, Route, RouteGrant, compose_menu, grants_for, is_allowed, landing};
pub use session::{SessionKind, SessionRecord, SessionStatus};
pub use store::{MemoryStore, STORAGE_KEY, SessionStore};
