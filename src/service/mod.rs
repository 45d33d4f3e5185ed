//! Service module
//!
//! Business operations over the repositories.

pub mod entry;
pub mod user;

pub use entry::EntryService;
pub use user::UserService;
