//! Entry Service
//!
//! Orchestrates entry persistence: draft validation, owning-user checks
//! and the pending-status rule for new entries.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Entry, EntryDraft, EntryFilter, EntryStatus};
use crate::error::{AppError, AppResult};
use crate::repository::{EntryRepository, UserRepository};

/// Service for finance entries
pub struct EntryService {
    entries: EntryRepository,
    users: UserRepository,
}

impl EntryService {
    /// Create a new EntryService
    pub fn new(pool: PgPool) -> Self {
        Self {
            entries: EntryRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Create a new entry. New entries always start out pending, even
    /// when the draft carries a status.
    pub async fn create(&self, draft: EntryDraft) -> AppResult<Entry> {
        let fields = draft.validate()?;
        self.ensure_user_exists(fields.user_id).await?;

        let entry = Entry::create(fields);
        self.entries.insert(&entry).await?;

        tracing::info!(entry_id = %entry.id, user_id = %entry.user_id, "Entry created");

        Ok(entry)
    }

    /// Replace the fields of a stored entry. The identifier and the
    /// registration timestamp survive the update.
    pub async fn update(&self, id: Uuid, draft: EntryDraft) -> AppResult<Entry> {
        let current = self.load(id).await?;

        let fields = draft.validate()?;
        self.ensure_user_exists(fields.user_id).await?;

        let entry = current.apply(fields);
        self.entries.update(&entry).await?;

        tracing::info!(entry_id = %entry.id, "Entry updated");

        Ok(entry)
    }

    /// Delete an entry by id
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.entries.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::BusinessRule(
                "Entry not found in the database".to_string(),
            ));
        }

        tracing::info!(entry_id = %id, "Entry deleted");

        Ok(())
    }

    /// Search a user's entries by example
    pub async fn search(&self, filter: EntryFilter) -> AppResult<Vec<Entry>> {
        self.ensure_user_exists(filter.user_id).await?;

        Ok(self.entries.search(&filter).await?)
    }

    /// Replace the status of a stored entry. No transition rules apply,
    /// any known status can follow any other.
    pub async fn update_status(&self, id: Uuid, status: EntryStatus) -> AppResult<Entry> {
        let mut entry = self.load(id).await?;
        entry.status = status;
        self.entries.update(&entry).await?;

        tracing::info!(entry_id = %id, status = %status, "Entry status updated");

        Ok(entry)
    }

    /// Fetch an entry by id
    pub async fn get(&self, id: Uuid) -> AppResult<Option<Entry>> {
        Ok(self.entries.find_by_id(id).await?)
    }

    /// Balance of a user's settled entries: income minus expense
    pub async fn balance(&self, user_id: Uuid) -> AppResult<Decimal> {
        Ok(self.entries.settled_balance(user_id).await?)
    }

    /// Load an entry that must exist for a mutation
    async fn load(&self, id: Uuid) -> AppResult<Entry> {
        self.entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BusinessRule("Entry not found in the database".to_string()))
    }

    /// An entry can only reference a user that exists
    async fn ensure_user_exists(&self, user_id: Uuid) -> AppResult<()> {
        if !self.users.exists(user_id).await? {
            return Err(AppError::BusinessRule(
                "User not found for the given id".to_string(),
            ));
        }

        Ok(())
    }
}
