//! View binding for the Flemzin school portal.
//!
//! This crate provides:
//! - The single subject-resolution choke point (`ViewBinder::resolve_subject`)
//! - Term selection under a session's term visibility (`ViewBinder::resolve_term`)
//! - Fully bound results and support views (`ResultsView`, `SupportView`)
//! - Support-channel scoping by role and class (`visible_channels`)

pub mod binder;
pub mod channels;
pub mod error;

// Re-export main types at crate root
pub use binder::{ResultsView, SubjectOption, SupportView, ViewBinder};
pub use channels::{SupportChannel, visible_channels};
pub use error::ViewError;
