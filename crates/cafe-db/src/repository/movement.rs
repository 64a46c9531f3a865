//! # Stock Movement Repository
//!
//! Stock adjustments and the append-only movement log.
//!
//! ## Adjustment Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record(product, direction, qty, user)               │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  UPDATE products                                                       │
//! │     SET stock_quantity = stock_quantity + delta    ← atomic in SQL,    │
//! │   WHERE id = ?                                        no read-modify-  │
//! │  RETURNING category_id, stock_quantity                write in Rust    │
//! │    │                                                                    │
//! │    ├── no row ──► NotFound, tx dropped ──► ROLLBACK (nothing written)  │
//! │    ▼                                                                    │
//! │  INSERT INTO stock_movements                                           │
//! │    (product_id, category_id, user_id, quantity, occurred_at)           │
//! │    │                                                                    │
//! │    ├── error ──► tx dropped ──► ROLLBACK                               │
//! │    ▼                                                                    │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! For every product, the sum of its logged quantities always equals the
//! change in its stock count since it was created.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use cafe_core::{MovementLogEntry, MovementRecord, StockAdjustment, StockDirection};

/// Columns and joins for [`MovementRecord`] rows.
const RECORD_SELECT: &str = r#"
    SELECT
        m.id,
        m.product_id,
        p.name AS product_name,
        m.category_id,
        c.name AS category_name,
        m.user_id,
        u.name AS user_name,
        m.quantity,
        m.occurred_at
    FROM stock_movements m
    INNER JOIN products p ON p.id = m.product_id
    INNER JOIN categories c ON c.id = m.category_id
    INNER JOIN users u ON u.id = m.user_id
"#;

/// Newest first; entry id breaks timestamp ties.
const NEWEST_FIRST: &str = "ORDER BY m.occurred_at DESC, m.id DESC";

/// Repository for stock movements.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    pool: SqlitePool,
}

impl MovementRepository {
    /// Creates a new MovementRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MovementRepository { pool }
    }

    /// Applies a stock adjustment and appends its log entry atomically.
    ///
    /// ## Arguments
    /// * `product_id` - Product to adjust
    /// * `direction` - In adds, Out subtracts
    /// * `quantity` - Positive unit count, already validated by the caller
    ///   (`cafe_core::validation::parse_quantity`)
    /// * `user_id` - Staff member recorded on the log entry
    ///
    /// ## Errors
    /// - `DbError::NotFound` if the product doesn't exist (nothing is written)
    /// - `DbError::ForeignKeyViolation` if the user no longer exists
    ///
    /// Stock is allowed to go negative.
    pub async fn record(
        &self,
        product_id: i64,
        direction: StockDirection,
        quantity: i64,
        user_id: i64,
    ) -> DbResult<StockAdjustment> {
        let delta = direction.signed(quantity);

        debug!(product_id, delta, user_id, "Recording stock movement");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let updated: Option<(i64, i64)> = sqlx::query_as(
            r#"
            UPDATE products
               SET stock_quantity = stock_quantity + ?1
             WHERE id = ?2
            RETURNING category_id, stock_quantity
            "#,
        )
        .bind(delta)
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping `tx` on any early return rolls the update back.
        let Some((category_id, new_stock)) = updated else {
            return Err(DbError::not_found("Product", product_id));
        };

        let occurred_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO stock_movements (product_id, category_id, user_id, quantity, occurred_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(product_id)
        .bind(category_id)
        .bind(user_id)
        .bind(delta)
        .bind(occurred_at)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let entry = MovementLogEntry {
            id: result.last_insert_rowid(),
            product_id,
            category_id,
            user_id,
            quantity: delta,
            occurred_at,
        };

        info!(
            product_id,
            delta,
            new_stock,
            entry_id = entry.id,
            "Stock movement recorded"
        );

        Ok(StockAdjustment {
            product_id,
            new_stock,
            entry,
        })
    }

    /// Lists every movement, newest first.
    pub async fn list_all(&self) -> DbResult<Vec<MovementRecord>> {
        let sql = format!("{RECORD_SELECT} {NEWEST_FIRST}");

        let records = sqlx::query_as::<_, MovementRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), "Listed movement log");
        Ok(records)
    }

    /// Lists the movements of one product, newest first.
    pub async fn list_for_product(&self, product_id: i64) -> DbResult<Vec<MovementRecord>> {
        let sql = format!("{RECORD_SELECT} WHERE m.product_id = ?1 {NEWEST_FIRST}");

        let records = sqlx::query_as::<_, MovementRecord>(&sql)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Counts all log entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stock_movements")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
