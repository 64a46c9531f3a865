//! # User Repository
//!
//! Staff accounts. Users are created out of band (see the `seed` binary)
//! and only read by the login flow.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use cafe_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Looks up the single user with the given login name.
    ///
    /// Names are unique, so at most one row matches.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<User>> {
        debug!(name = %name, "Looking up user by name");

        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, password_hash FROM users WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a user and returns the new id.
    ///
    /// `password_hash` must already be a PHC string
    /// (see `cafe_core::credentials::hash_password`).
    pub async fn insert(&self, name: &str, password_hash: &str) -> DbResult<i64> {
        debug!(name = %name, "Inserting user");

        let result = sqlx::query("INSERT INTO users (name, password_hash) VALUES (?1, ?2)")
            .bind(name)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Counts users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_by_name() {
        let db = test_db().await;
        let id = db.users().insert("barista", "$argon2id$fake").await.unwrap();

        let user = db.users().get_by_name("barista").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.name, "barista");
        assert_eq!(user.password_hash, "$argon2id$fake");
    }

    #[tokio::test]
    async fn test_unknown_name_is_none() {
        let db = test_db().await;
        assert!(db.users().get_by_name("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = test_db().await;
        db.users().insert("barista", "h1").await.unwrap();

        let err = db.users().insert("barista", "h2").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(db.users().count().await.unwrap(), 1);
    }
}
