use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::error;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 PHC string, never exposed
    pub created_at: OffsetDateTime,
}

impl User {
    /// Validates the input and hashes the password; the plaintext is dropped
    /// here and never reaches storage.
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AppError::Validation("invalid email".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email,
            password_hash: hash_password(password)?,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    pub fn validate_password(&self, candidate: &str) -> bool {
        match verify_password(candidate, &self.password_hash) {
            Ok(ok) => ok,
            Err(e) => {
                error!(error = %e, user_id = %self.id, "stored password hash is unreadable");
                false
            }
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}
