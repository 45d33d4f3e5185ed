//! Domain module
//!
//! Core domain types and business logic.

pub mod entry;
pub mod error;
pub mod user;

pub use entry::{Entry, EntryDraft, EntryFilter, EntryStatus, EntryType, ValidatedEntry};
pub use error::{ParseEntryError, ValidationError};
pub use user::User;
