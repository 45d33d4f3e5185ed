//! Finance entry model
//!
//! An entry books a single income or expense against a user for a given
//! month and year. Field checks live on [`EntryDraft`], which validates
//! at the boundary so an invalid `Entry` cannot exist in the system.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::error::{ParseEntryError, ValidationError};

/// Whether an entry adds to or subtracts from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = ParseEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(EntryType::Income),
            "expense" => Ok(EntryType::Expense),
            other => Err(ParseEntryError::Type(other.to_string())),
        }
    }
}

/// Lifecycle state of an entry
///
/// New entries always start out `Pending`; only `Settled` entries count
/// towards a user's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Pending,
    Settled,
    Cancelled,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "pending",
            EntryStatus::Settled => "settled",
            EntryStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = ParseEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EntryStatus::Pending),
            "settled" => Ok(EntryStatus::Settled),
            "cancelled" => Ok(EntryStatus::Cancelled),
            other => Err(ParseEntryError::Status(other.to_string())),
        }
    }
}

/// A persisted finance entry
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub description: String,
    pub month: i32,
    pub year: i32,
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub status: EntryStatus,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Build a fresh entry from validated fields.
    ///
    /// The identifier and registration timestamp are assigned here, and
    /// the status is forced to `Pending` regardless of what the draft
    /// carried.
    pub fn create(fields: ValidatedEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: fields.description,
            month: fields.month,
            year: fields.year,
            amount: fields.amount,
            entry_type: fields.entry_type,
            status: EntryStatus::Pending,
            user_id: fields.user_id,
            created_at: Utc::now(),
        }
    }

    /// Overlay validated fields onto this entry, keeping its identifier
    /// and registration timestamp. A draft without a status keeps the
    /// stored one.
    pub fn apply(mut self, fields: ValidatedEntry) -> Self {
        self.description = fields.description;
        self.month = fields.month;
        self.year = fields.year;
        self.amount = fields.amount;
        self.entry_type = fields.entry_type;
        self.user_id = fields.user_id;
        if let Some(status) = fields.status {
            self.status = status;
        }
        self
    }
}

/// Field set that passed validation, ready to become an [`Entry`]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    pub description: String,
    pub month: i32,
    pub year: i32,
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub status: Option<EntryStatus>,
    pub user_id: Uuid,
}

/// Unchecked entry fields as received from the outside
///
/// # Invariants
/// - `validate` checks fields in a fixed order: description, month,
///   year, user, amount, type. The first failure is reported.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub description: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub amount: Option<Decimal>,
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
    pub user_id: Option<Uuid>,
}

impl EntryDraft {
    /// Run the field checks and yield the validated field set.
    pub fn validate(self) -> Result<ValidatedEntry, ValidationError> {
        // Rule 1: Description present and non-blank
        let description = match self.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => return Err(ValidationError::MissingDescription),
        };

        // Rule 2: Month within the calendar
        let month = match self.month {
            Some(m) if (1..=12).contains(&m) => m,
            _ => return Err(ValidationError::InvalidMonth),
        };

        // Rule 3: Year has four digits
        let year = match self.year {
            Some(y) if (1000..=9999).contains(&y) => y,
            _ => return Err(ValidationError::InvalidYear),
        };

        // Rule 4: Owning user present
        let user_id = match self.user_id {
            Some(id) => id,
            None => return Err(ValidationError::MissingUser),
        };

        // Rule 5: Amount strictly positive
        let amount = match self.amount {
            Some(a) if a > Decimal::ZERO => a,
            _ => return Err(ValidationError::InvalidAmount),
        };

        // Rule 6: Entry type present
        let entry_type = match self.entry_type {
            Some(t) => t,
            None => return Err(ValidationError::MissingType),
        };

        Ok(ValidatedEntry {
            description,
            month,
            year,
            amount,
            entry_type,
            status: self.status,
            user_id,
        })
    }
}

/// Filter-by-example for the entry search.
///
/// Only `user_id` is mandatory; every other field narrows the result
/// when present.
#[derive(Debug, Clone)]
pub struct EntryFilter {
    pub user_id: Uuid,
    pub description: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
}
