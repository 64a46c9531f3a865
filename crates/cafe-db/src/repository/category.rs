//! # Category Repository

use sqlx::SqlitePool;

use crate::error::DbResult;
use cafe_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists every category ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    /// Inserts a category and returns the new id.
    pub async fn insert(&self, name: &str) -> DbResult<i64> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Counts categories.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_list_all_ordered_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let milk = db.categories().insert("Milk").await.unwrap();
        let beans = db.categories().insert("Beans").await.unwrap();

        let categories = db.categories().list_all().await.unwrap();
        let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![milk, beans]);
        assert_eq!(categories[0].name, "Milk");
    }
}
