//! User Service
//!
//! Registration and authentication. Passwords are bcrypt-hashed on the
//! way in and verified against the stored hash, never compared raw.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::User;
use crate::error::{AppError, AppResult};
use crate::repository::UserRepository;

/// Service for user registration and authentication
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    /// Create a new UserService
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user. The email must not be taken yet.
    pub async fn register(&self, name: String, email: String, password: &str) -> AppResult<User> {
        if self.users.exists_by_email(&email).await? {
            return Err(AppError::BusinessRule(
                "A user with this email is already registered".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing error: {}", e)))?;

        let user = User::new(name, email, password_hash);
        self.users.insert(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Authenticate by email and password.
    ///
    /// Both an unknown email and a wrong password come back as an
    /// authentication error; only the messages differ.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self.users.find_by_email(email).await?.ok_or_else(|| {
            AppError::Authentication("No user found for the given email".to_string())
        })?;

        let verified = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;

        if !verified {
            return Err(AppError::Authentication("Invalid password".to_string()));
        }

        Ok(user)
    }

    /// Fetch a user by id
    pub async fn get(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }
}
