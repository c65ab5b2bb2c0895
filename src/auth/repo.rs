use sqlx::SqlitePool;

use crate::auth::repo_types::User;
use crate::error::AppError;

#[derive(Clone)]
pub struct UserRepo {
    db: SqlitePool,
}

impl UserRepo {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a new user. A taken email is a validation failure, not a
    /// storage failure.
    pub async fn create(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Validation("email already registered".into())
            }
            other => AppError::Storage(other),
        })?;
        Ok(())
    }

    /// Find a user by (already normalized) email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}
