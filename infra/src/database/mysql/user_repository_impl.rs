//! MySQL implementation of the UserRepository trait.
//!
//! Lookups and partial updates are assembled with `QueryBuilder`, so every
//! value is bound rather than interpolated. Duplicate-key errors from the
//! unique indexes on `email` and `username` surface as
//! `DomainError::UniqueViolation`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use af_core::domain::entities::user::{User, UserChanges, UserLookup};
use af_core::errors::DomainError;
use af_core::repositories::UserRepository;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_active, email_verified, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Append the `WHERE` predicate for a lookup
    fn push_lookup(builder: &mut QueryBuilder<'_, MySql>, lookup: &UserLookup) {
        builder.push(" WHERE ");
        match lookup {
            UserLookup::Id(id) => {
                builder.push("id = ").push_bind(id.to_string());
            }
            UserLookup::Username(username) => {
                builder.push("username = ").push_bind(username.clone());
            }
            UserLookup::Email(email) => {
                builder.push("email = ").push_bind(email.clone());
            }
        }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::database(format!("Failed to get id: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::database(format!("Failed to get username: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::database(format!("Failed to get email: {}", e)))?,
            password_hash: row.try_get("password_hash").map_err(|e| {
                DomainError::database(format!("Failed to get password_hash: {}", e))
            })?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::database(format!("Failed to get is_active: {}", e)))?,
            email_verified: row.try_get("email_verified").map_err(|e| {
                DomainError::database(format!("Failed to get email_verified: {}", e))
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::database(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::database(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

/// Map a write error, recognising duplicate keys
fn map_write_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = if db_err.message().contains("username") {
                "username"
            } else {
                "email"
            };
            return DomainError::UniqueViolation {
                field: field.to_string(),
            };
        }
    }
    DomainError::database(format!("Database write failed: {}", err))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find(&self, lookup: &UserLookup) -> Result<Option<User>, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new("SELECT ");
        builder.push(USER_COLUMNS).push(" FROM users");
        Self::push_lookup(&mut builder, lookup);
        builder.push(" LIMIT 1");

        let result = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, email, password_hash,
                is_active, email_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.email_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(user)
    }

    async fn update(&self, lookup: &UserLookup, changes: UserChanges) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new("UPDATE users SET updated_at = ");
        builder.push_bind(Utc::now());

        if let Some(username) = changes.username {
            builder.push(", username = ").push_bind(username);
        }
        if let Some(password_hash) = changes.password_hash {
            builder.push(", password_hash = ").push_bind(password_hash);
        }
        if let Some(email_verified) = changes.email_verified {
            builder.push(", email_verified = ").push_bind(email_verified);
        }
        if let Some(is_active) = changes.is_active {
            builder.push(", is_active = ").push_bind(is_active);
        }
        Self::push_lookup(&mut builder, lookup);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(result.rows_affected())
    }
}
