//! Core domain types and utilities for the Flemzin school portal.
//!
//! This crate provides the foundational identity keys, role and cohort
//! types, term keys, and shared error handling used throughout the
//! portal.

pub mod error;
pub mod id;
pub mod level;
pub mod role;
pub mod term;

pub use error::{ParseKeyError, Result};
pub use id::RegistrationId;
pub use level::{ClassLevel, Stage};
pub use role::Role;
pub use term::{AcademicYear, Term, TermId};
