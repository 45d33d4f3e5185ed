//! fintrack Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repository;
pub mod service;

pub use config::Config;
pub use domain::{Entry, EntryDraft, EntryFilter, EntryStatus, EntryType, User};
pub use domain::{ParseEntryError, ValidatedEntry, ValidationError};
pub use error::{AppError, AppResult, ErrorResponse};
