//! # Domain Types
//!
//! Core domain types used throughout Café Stock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│     Product     │◄──│ MovementLogEntry│       │
//! │  │  ─────────────  │ 1 │  ─────────────  │ 1 │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │ * │  name           │ * │  product_id     │       │
//! │  └─────────────────┘   │  category_id    │   │  category_id ◄──┼─ copy │
//! │                        │  stock_quantity │   │  user_id        │       │
//! │                        └─────────────────┘   │  quantity (±)   │       │
//! │  ┌─────────────────┐                         │  occurred_at    │       │
//! │  │      User       │◄────────────────────────┤                 │       │
//! │  │  id, name       │                         └─────────────────┘       │
//! │  │  password_hash  │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Models
//! The listings never return bare rows: [`InventoryItem`] and
//! [`MovementRecord`] carry the joined display names alongside the ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// User
// =============================================================================

/// A staff member allowed to sign in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,

    /// Login name, unique.
    pub name: String,

    /// Argon2 PHC string (`$argon2id$v=19$...`).
    #[serde(skip_serializing)]
    pub password_hash: String,
}

// =============================================================================
// Category
// =============================================================================

/// A product category (Beans, Milk, ...). Read-only at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category_id: i64,

    /// Units currently held. No floor: removals may drive this negative.
    pub stock_quantity: i64,
}

/// A product joined with its category name, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
    pub stock_quantity: i64,
}

impl InventoryItem {
    /// True when stock has been driven to zero or below.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_quantity <= 0
    }
}

// =============================================================================
// Stock Direction
// =============================================================================

/// Direction of a stock movement.
///
/// Forms always submit a positive quantity; the direction decides the sign
/// that is applied to the stock count and written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockDirection {
    /// Delivery / restock.
    In,
    /// Consumption / wastage.
    Out,
}

impl StockDirection {
    /// Applies the direction's sign to a positive quantity.
    #[inline]
    pub const fn signed(self, quantity: i64) -> i64 {
        match self {
            StockDirection::In => quantity,
            StockDirection::Out => -quantity,
        }
    }

    /// Direction of a logged delta.
    #[inline]
    pub const fn of_delta(delta: i64) -> Self {
        if delta < 0 {
            StockDirection::Out
        } else {
            StockDirection::In
        }
    }

    /// Human-readable label used in page titles and buttons.
    pub const fn label(self) -> &'static str {
        match self {
            StockDirection::In => "Stock In",
            StockDirection::Out => "Stock Out",
        }
    }
}

// =============================================================================
// Movement Log
// =============================================================================

/// One append-only stock movement as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MovementLogEntry {
    pub id: i64,
    pub product_id: i64,

    /// Category of the product at the time of writing (snapshot).
    pub category_id: i64,

    /// Staff member who recorded the movement.
    pub user_id: i64,

    /// Signed delta: positive = stock in, negative = stock out.
    pub quantity: i64,

    pub occurred_at: DateTime<Utc>,
}

impl MovementLogEntry {
    pub fn direction(&self) -> StockDirection {
        StockDirection::of_delta(self.quantity)
    }
}

/// A movement joined with product, category and user names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MovementRecord {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub category_id: i64,
    pub category_name: String,
    pub user_id: i64,
    pub user_name: String,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

impl MovementRecord {
    pub fn direction(&self) -> StockDirection {
        StockDirection::of_delta(self.quantity)
    }
}

/// Outcome of a committed stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockAdjustment {
    pub product_id: i64,

    /// Stock count after the delta was applied.
    pub new_stock: i64,

    /// The log entry written in the same transaction.
    pub entry: MovementLogEntry,
}

// =============================================================================
// Unit Tests
// =============================================================================
