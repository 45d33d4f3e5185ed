//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Field-validation failures for an entry draft.
///
/// Checks run in a fixed order and the first failing field wins, so a
/// draft with several bad fields always reports the same error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Description absent or blank
    #[error("A valid description is required")]
    MissingDescription,

    /// Month absent or outside 1..=12
    #[error("A valid month is required")]
    InvalidMonth,

    /// Year absent or not a four-digit number
    #[error("A valid year is required")]
    InvalidYear,

    /// Owning user absent
    #[error("An owning user is required")]
    MissingUser,

    /// Amount absent, zero or negative
    #[error("A valid amount is required")]
    InvalidAmount,

    /// Entry type absent
    #[error("An entry type is required")]
    MissingType,
}

/// Errors from parsing the wire form of an entry field. Each message
/// names the offending value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseEntryError {
    #[error("Unknown entry type '{0}', expected 'income' or 'expense'")]
    Type(String),

    #[error("Unknown entry status '{0}', expected 'pending', 'settled' or 'cancelled'")]
    Status(String),

    #[error("Invalid amount '{0}', expected a decimal number")]
    Amount(String),
}
