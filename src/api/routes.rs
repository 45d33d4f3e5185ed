//! API Routes
//!
//! HTTP endpoint definitions. Request bodies carry entry amounts and
//! enum values as strings; they are parsed here so the services only
//! ever see typed drafts.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Entry, EntryDraft, EntryFilter, EntryStatus, EntryType, ParseEntryError, User};
use crate::error::AppError;
use crate::service::{EntryService, UserService};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub month: Option<i32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

impl EntryRequest {
    /// Parse the stringly typed fields into a draft. Absent fields stay
    /// absent so the draft validator can report them in its own order.
    fn into_draft(self) -> Result<EntryDraft, AppError> {
        let amount = match self.amount {
            Some(raw) => Some(
                raw.parse::<Decimal>()
                    .map_err(|_| ParseEntryError::Amount(raw))?,
            ),
            None => None,
        };

        let entry_type = match self.entry_type {
            Some(raw) => Some(raw.parse::<EntryType>()?),
            None => None,
        };

        let status = match self.status {
            Some(raw) => Some(raw.parse::<EntryStatus>()?),
            None => None,
        };

        Ok(EntryDraft {
            description: self.description,
            month: self.month,
            year: self.year,
            amount,
            entry_type,
            status,
            user_id: self.user_id,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
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

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            description: entry.description,
            month: entry.month,
            year: entry.year,
            amount: entry.amount,
            entry_type: entry.entry_type,
            status: entry.status,
            user_id: entry.user_id,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EntrySearchQuery {
    pub user_id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub month: Option<i32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl EntrySearchQuery {
    fn into_filter(self) -> Result<EntryFilter, AppError> {
        let entry_type = match self.entry_type {
            Some(raw) => Some(raw.parse::<EntryType>()?),
            None => None,
        };

        let status = match self.status {
            Some(raw) => Some(raw.parse::<EntryStatus>()?),
            None => None,
        };

        Ok(EntryFilter {
            user_id: self.user_id,
            description: self.description,
            month: self.month,
            year: self.year,
            entry_type,
            status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub user_id: Uuid,
    pub balance: Decimal,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        // User endpoints
        .route("/users", post(register_user))
        .route("/users/authenticate", post(authenticate_user))
        .route("/users/:user_id/balance", get(user_balance))
        // Entry endpoints
        .route("/entries", post(create_entry))
        .route("/entries", get(search_entries))
        .route("/entries/:entry_id", get(get_entry))
        .route("/entries/:entry_id", put(update_entry))
        .route("/entries/:entry_id", delete(delete_entry))
        .route("/entries/:entry_id/status", patch(update_entry_status))
}

// =========================================================================
// POST /users
// =========================================================================

/// Register a new user
async fn register_user(
    State(pool): State<PgPool>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let service = UserService::new(pool);

    let user = service
        .register(request.name, request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// =========================================================================
// POST /users/authenticate
// =========================================================================

/// Authenticate a user by email and password
async fn authenticate_user(
    State(pool): State<PgPool>,
    Json(request): Json<AuthenticateRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let service = UserService::new(pool);

    let user = service
        .authenticate(&request.email, &request.password)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

// =========================================================================
// GET /users/:user_id/balance
// =========================================================================

/// Get the settled balance for a user
async fn user_balance(
    State(pool): State<PgPool>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<BalanceResponse>, AppError> {
    let users = UserService::new(pool.clone());

    users
        .get(user_id)
        .await?
        .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

    let balance = EntryService::new(pool).balance(user_id).await?;

    Ok(Json(BalanceResponse { user_id, balance }))
}

// =========================================================================
// POST /entries
// =========================================================================

/// Create a new entry
async fn create_entry(
    State(pool): State<PgPool>,
    Json(request): Json<EntryRequest>,
) -> Result<(StatusCode, Json<EntryResponse>), AppError> {
    let service = EntryService::new(pool);

    let entry = service.create(request.into_draft()?).await?;

    Ok((StatusCode::CREATED, Json(EntryResponse::from(entry))))
}

// =========================================================================
// GET /entries
// =========================================================================

/// Search entries by example
async fn search_entries(
    State(pool): State<PgPool>,
    Query(query): Query<EntrySearchQuery>,
) -> Result<Json<Vec<EntryResponse>>, AppError> {
    let service = EntryService::new(pool);

    let entries = service.search(query.into_filter()?).await?;

    Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
}

// =========================================================================
// GET /entries/:entry_id
// =========================================================================

/// Get an entry by id
async fn get_entry(
    State(pool): State<PgPool>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<EntryResponse>, AppError> {
    let service = EntryService::new(pool);

    let entry = service
        .get(entry_id)
        .await?
        .ok_or_else(|| AppError::EntryNotFound(entry_id.to_string()))?;

    Ok(Json(EntryResponse::from(entry)))
}

// =========================================================================
// PUT /entries/:entry_id
// =========================================================================

/// Replace the fields of an entry
async fn update_entry(
    State(pool): State<PgPool>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<EntryRequest>,
) -> Result<Json<EntryResponse>, AppError> {
    let service = EntryService::new(pool);

    let entry = service.update(entry_id, request.into_draft()?).await?;

    Ok(Json(EntryResponse::from(entry)))
}

// =========================================================================
// DELETE /entries/:entry_id
// =========================================================================

/// Delete an entry
async fn delete_entry(
    State(pool): State<PgPool>,
    Path(entry_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let service = EntryService::new(pool);

    service.delete(entry_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// PATCH /entries/:entry_id/status
// =========================================================================

/// Replace the status of an entry
async fn update_entry_status(
    State(pool): State<PgPool>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<EntryResponse>, AppError> {
    let status = request
        .status
        .ok_or_else(|| AppError::BusinessRule("A status value is required".to_string()))?
        .parse::<EntryStatus>()?;

    let service = EntryService::new(pool);

    let entry = service.update_status(entry_id, status).await?;

    Ok(Json(EntryResponse::from(entry)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_user_request_deserialize() {
        let json = r#"{
            "name": "Alice Green",
            "email": "alice@example.com",
            "password": "hunter2"
        }"#;

        let request: RegisterUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Alice Green");
        assert_eq!(request.email, "alice@example.com");
    }

    #[test]
    fn test_entry_request_missing_fields_stay_absent() {
        let request: EntryRequest = serde_json::from_str("{}").unwrap();
        let draft = request.into_draft().unwrap();

        assert!(draft.description.is_none());
        assert!(draft.month.is_none());
        assert!(draft.amount.is_none());
        assert!(draft.entry_type.is_none());
        assert!(draft.status.is_none());
        assert!(draft.user_id.is_none());
    }

    #[test]
    fn test_entry_request_parses_typed_fields() {
        let json = r#"{
            "description": "Groceries",
            "month": 7,
            "year": 2026,
            "amount": "250.75",
            "entry_type": "expense",
            "status": "settled",
            "user_id": "550e8400-e29b-41d4-a716-446655440000"
        }"#;

        let request: EntryRequest = serde_json::from_str(json).unwrap();
        let draft = request.into_draft().unwrap();

        assert_eq!(draft.amount, Some(Decimal::new(25075, 2)));
        assert_eq!(draft.entry_type, Some(EntryType::Expense));
        assert_eq!(draft.status, Some(EntryStatus::Settled));
    }

    #[test]
    fn test_entry_request_rejects_malformed_amount() {
        let request: EntryRequest =
            serde_json::from_str(r#"{"amount": "a lot"}"#).unwrap();

        let err = request.into_draft().unwrap_err();
        assert!(matches!(
            err,
            AppError::Parse(ParseEntryError::Amount(ref value)) if value == "a lot"
        ));
    }

    #[test]
    fn test_entry_request_rejects_unknown_type() {
        let request: EntryRequest =
            serde_json::from_str(r#"{"entry_type": "credit"}"#).unwrap();

        let err = request.into_draft().unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_search_query_optional_filters_default() {
        let query: EntrySearchQuery = serde_json::from_str(
            r#"{"user_id": "550e8400-e29b-41d4-a716-446655440000"}"#,
        )
        .unwrap();

        let filter = query.into_filter().unwrap();
        assert!(filter.description.is_none());
        assert!(filter.month.is_none());
        assert!(filter.entry_type.is_none());
        assert!(filter.status.is_none());
    }

    #[test]
    fn test_entry_response_serializes_amount_as_string() {
        let response = EntryResponse {
            id: Uuid::nil(),
            description: "Rent".to_string(),
            month: 1,
            year: 2026,
            amount: Decimal::new(120000, 2),
            entry_type: EntryType::Expense,
            status: EntryStatus::Pending,
            user_id: Uuid::nil(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["amount"], "1200.00");
        assert_eq!(json["entry_type"], "expense");
        assert_eq!(json["status"], "pending");
    }
}
