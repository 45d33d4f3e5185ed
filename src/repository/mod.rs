//! Repository module
//!
//! SQL persistence for users and entries.

pub mod entry;
pub mod user;

pub use entry::EntryRepository;
pub use user::UserRepository;

use crate::domain::ParseEntryError;

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored enum column holds a value the domain does not know.
    #[error("Stored entry could not be decoded: {0}")]
    Corrupt(#[from] ParseEntryError),
}
