//! # HTTP Handlers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Module      Routes                          Session                   │
//! │  ─────────   ─────────────────────────────   ───────                   │
//! │  auth        /login  /logout                 no                        │
//! │  inventory   /  /product/{id}                yes                       │
//! │  stock       /add_stock/{id}                 yes                       │
//! │              /remove_stock/{id}                                        │
//! │  logs        /logs                           yes                       │
//! │  health      /healthz                        no                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod health;
pub mod inventory;
pub mod logs;
pub mod stock;
