//! # Product Repository
//!
//! Read access to products and their stock levels.
//!
//! ## Key Operations
//! - Dashboard listing (products joined with category name)
//! - Single product lookup for the detail and adjustment pages
//!
//! Stock levels are never written from here: every change goes through
//! [`MovementRepository::record`](crate::repository::movement::MovementRepository::record)
//! so the count and the audit log move together.
//!
//! ## Dashboard Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ORDER BY p.category_id, p.name                                        │
//! │                                                                         │
//! │  1 Beans    │ Coffee Beans (House)     │  12                           │
//! │  1 Beans    │ Decaf Beans              │   4                           │
//! │  2 Milk     │ Oat Milk                 │  -1  ← negative stock allowed │
//! │  2 Milk     │ Whole Milk               │  20                           │
//! │  3 Syrups   │ Vanilla Syrup            │   6                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use cafe_core::{InventoryItem, Product};

/// Columns selected for [`InventoryItem`] rows.
const INVENTORY_SELECT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.category_id,
        c.name AS category_name,
        p.stock_quantity
    FROM products p
    INNER JOIN categories c ON c.id = p.category_id
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let items = repo.list_inventory().await?;
/// let coffee = repo.get_summary(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product with its category name, ordered by category id
    /// then product name.
    pub async fn list_inventory(&self) -> DbResult<Vec<InventoryItem>> {
        let sql = format!("{INVENTORY_SELECT} ORDER BY p.category_id, p.name");

        let items = sqlx::query_as::<_, InventoryItem>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Listed inventory");
        Ok(items)
    }

    /// Gets a product joined with its category name.
    pub async fn get_summary(&self, id: i64) -> DbResult<Option<InventoryItem>> {
        let sql = format!("{INVENTORY_SELECT} WHERE p.id = ?1");

        let item = sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Gets a bare product row by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, category_id, stock_quantity FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a product with an opening stock level and returns the new id.
    ///
    /// Opening stock is not logged as a movement.
    pub async fn insert(&self, name: &str, category_id: i64, stock_quantity: i64) -> DbResult<i64> {
        debug!(name = %name, category_id, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, category_id, stock_quantity) VALUES (?1, ?2, ?3)",
        )
        .bind(name)
        .bind(category_id)
        .bind(stock_quantity)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
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
    async fn test_list_inventory_ordering() {
        let db = test_db().await;
        let beans = db.categories().insert("Beans").await.unwrap();
        let milk = db.categories().insert("Milk").await.unwrap();

        db.products().insert("Whole Milk", milk, 20).await.unwrap();
        db.products().insert("Decaf Beans", beans, 4).await.unwrap();
        db.products().insert("Oat Milk", milk, 8).await.unwrap();
        db.products().insert("Coffee Beans", beans, 10).await.unwrap();

        let items = db.products().list_inventory().await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Coffee Beans", "Decaf Beans", "Oat Milk", "Whole Milk"]
        );
        assert_eq!(items[0].category_name, "Beans");
        assert_eq!(items[3].category_name, "Milk");
    }

    #[tokio::test]
    async fn test_get_summary() {
        let db = test_db().await;
        let beans = db.categories().insert("Beans").await.unwrap();
        let id = db.products().insert("Coffee Beans", beans, 10).await.unwrap();

        let item = db.products().get_summary(id).await.unwrap().unwrap();
        assert_eq!(item.name, "Coffee Beans");
        assert_eq!(item.category_name, "Beans");
        assert_eq!(item.stock_quantity, 10);

        assert!(db.products().get_summary(id + 1).await.unwrap().is_none());
        assert!(db.products().get_by_id(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_requires_existing_category() {
        let db = test_db().await;
        let err = db.products().insert("Orphan", 99, 0).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
