//! # Repository Module
//!
//! Database repository implementations for Café Stock.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.movements().record(id, StockDirection::Out, 3, user_id)    │
//! │       ▼                                                                 │
//! │  MovementRepository                                                    │
//! │  ├── record(&self, product_id, direction, quantity, user_id)           │
//! │  ├── list_all(&self)                                                   │
//! │  └── list_for_product(&self, product_id)                               │
//! │       │                                                                 │
//! │       │  SQL (parameterized, one transaction per adjustment)           │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Staff lookup for login
//! - [`CategoryRepository`](category::CategoryRepository) - Category listing
//! - [`ProductRepository`](product::ProductRepository) - Inventory reads
//! - [`MovementRepository`](movement::MovementRepository) - Stock adjustments and the audit log

pub mod category;
pub mod movement;
pub mod product;
pub mod user;
