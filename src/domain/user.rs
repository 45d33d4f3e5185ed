//! User model
//!
//! Account owner for finance entries. The password never leaves the
//! service layer as anything but a bcrypt hash.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user ready for persistence. The identifier and the
    /// registration timestamp are assigned here.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
