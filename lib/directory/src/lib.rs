//! User directory and gradebook data for the Flemzin school portal.
//!
//! This crate owns the portal's read-only data: the directory of user
//! records (with guardian links and staff scopes, validated at load
//! time) and the gradebook of per-student term reports. Both are
//! immutable snapshots; nothing here mutates after construction.

pub mod directory;
pub mod error;
pub mod gradebook;
pub mod record;
pub mod seed;

pub use directory::UserDirectory;
pub use error::DirectoryError;
pub use gradebook::{Gradebook, LetterGrade, SubjectRow, TermReport};
pub use record::UserRecord;
pub use seed::{seed_directory, seed_gradebook};
