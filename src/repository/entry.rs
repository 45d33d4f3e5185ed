//! Entry Repository
//!
//! Row-level access to the entries table. Enum columns are stored as
//! text and decoded through the domain parsers, so a value outside the
//! known set surfaces as a corruption error instead of a silent default.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Entry, EntryFilter, EntryStatus, EntryType};
use crate::repository::RepositoryError;

/// Column tuple for a full entries row
type EntryRow = (
    Uuid,
    String,
    i32,
    i32,
    Decimal,
    String,
    String,
    Uuid,
    DateTime<Utc>,
);

const ENTRY_COLUMNS: &str =
    "id, description, month, year, amount, entry_type, status, user_id, created_at";

fn entry_from_row(row: EntryRow) -> Result<Entry, RepositoryError> {
    let (id, description, month, year, amount, entry_type, status, user_id, created_at) = row;

    Ok(Entry {
        id,
        description,
        month,
        year,
        amount,
        entry_type: entry_type.parse::<EntryType>()?,
        status: status.parse::<EntryStatus>()?,
        user_id,
        created_at,
    })
}

/// Escape LIKE metacharacters so filter text always matches literally
fn escape_like_pattern(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Repository for entry rows
#[derive(Debug, Clone)]
pub struct EntryRepository {
    pool: PgPool,
}

impl EntryRepository {
    /// Create a new EntryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new entry
    pub async fn insert(&self, entry: &Entry) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO entries
                (id, description, month, year, amount, entry_type, status, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.description)
        .bind(entry.month)
        .bind(entry.year)
        .bind(entry.amount)
        .bind(entry.entry_type.as_str())
        .bind(entry.status.as_str())
        .bind(entry.user_id)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrite a stored entry with the given state
    pub async fn update(&self, entry: &Entry) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE entries
            SET description = $2, month = $3, year = $4, amount = $5,
                entry_type = $6, status = $7, user_id = $8
            WHERE id = $1
            "#,
        )
        .bind(entry.id)
        .bind(&entry.description)
        .bind(entry.month)
        .bind(entry.year)
        .bind(entry.amount)
        .bind(entry.entry_type.as_str())
        .bind(entry.status.as_str())
        .bind(entry.user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete an entry, returning how many rows went away
    pub async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Fetch an entry by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, RepositoryError> {
        let row: Option<EntryRow> = sqlx::query_as(
            r#"
            SELECT id, description, month, year, amount, entry_type, status, user_id, created_at
            FROM entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(entry_from_row).transpose()
    }

    // =========================================================================
    // search
    // =========================================================================

    /// Filter-by-example search over a user's entries.
    ///
    /// The statement is assembled with numbered placeholders and every
    /// value goes through a bind, never into the SQL text itself.
    pub async fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, RepositoryError> {
        let mut sql = format!("SELECT {} FROM entries WHERE user_id = $1", ENTRY_COLUMNS);
        let mut placeholder = 2;

        if filter.description.is_some() {
            sql.push_str(&format!(" AND description ILIKE ${}", placeholder));
            placeholder += 1;
        }
        if filter.month.is_some() {
            sql.push_str(&format!(" AND month = ${}", placeholder));
            placeholder += 1;
        }
        if filter.year.is_some() {
            sql.push_str(&format!(" AND year = ${}", placeholder));
            placeholder += 1;
        }
        if filter.entry_type.is_some() {
            sql.push_str(&format!(" AND entry_type = ${}", placeholder));
            placeholder += 1;
        }
        if filter.status.is_some() {
            sql.push_str(&format!(" AND status = ${}", placeholder));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, EntryRow>(&sql).bind(filter.user_id);
        if let Some(description) = &filter.description {
            query = query.bind(format!("%{}%", escape_like_pattern(description)));
        }
        if let Some(month) = filter.month {
            query = query.bind(month);
        }
        if let Some(year) = filter.year {
            query = query.bind(year);
        }
        if let Some(entry_type) = filter.entry_type {
            query = query.bind(entry_type.as_str());
        }
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(entry_from_row).collect()
    }

    // =========================================================================
    // settled_balance
    // =========================================================================

    /// Balance of a user's settled entries: income minus expense.
    /// Users with no settled entries get zero.
    pub async fn settled_balance(&self, user_id: Uuid) -> Result<Decimal, RepositoryError> {
        let balance: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(CASE WHEN entry_type = 'income' THEN amount ELSE -amount END), 0)
            FROM entries
            WHERE user_id = $1 AND status = 'settled'
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(entry_type: &str, status: &str) -> EntryRow {
        (
            Uuid::new_v4(),
            "Rent".to_string(),
            5,
            2026,
            Decimal::new(120000, 2),
            entry_type.to_string(),
            status.to_string(),
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    #[test]
    fn test_entry_from_row_maps_enum_columns() {
        let entry = entry_from_row(sample_row("expense", "settled")).unwrap();

        assert_eq!(entry.entry_type, EntryType::Expense);
        assert_eq!(entry.status, EntryStatus::Settled);
        assert_eq!(entry.amount, Decimal::new(120000, 2));
    }

    #[test]
    fn test_entry_from_row_rejects_unknown_values() {
        let result = entry_from_row(sample_row("income", "archived"));
        assert!(matches!(result, Err(RepositoryError::Corrupt(_))));

        let result = entry_from_row(sample_row("credit", "pending"));
        assert!(matches!(result, Err(RepositoryError::Corrupt(_))));
    }

    #[test]
    fn test_escape_like_pattern_keeps_wildcards_literal() {
        assert_eq!(escape_like_pattern("100%"), r"100\%");
        assert_eq!(escape_like_pattern("a_b"), r"a\_b");
        assert_eq!(escape_like_pattern(r"back\slash"), r"back\\slash");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
