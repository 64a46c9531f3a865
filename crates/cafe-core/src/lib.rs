//! # cafe-core: Domain Types for Café Stock
//!
//! This crate holds the domain model of the café inventory tracker as pure
//! types and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Café Stock Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Browser (server-rendered HTML)                  │   │
//! │  │    Login ──► Dashboard ──► Product ──► Add/Remove ──► Logs      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  │    session gate, handlers, templates                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cafe-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌─────────────┐               │   │
//! │  │   │   types   │  │ validation │  │ credentials │               │   │
//! │  │   │  Product  │  │  quantity  │  │   argon2    │               │   │
//! │  │   │  Movement │  │  username  │  │  hash/verify│               │   │
//! │  │   └───────────┘  └────────────┘  └─────────────┘               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cafe-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Category, Product, movement log rows)
//! - [`error`] - Domain error types
//! - [`validation`] - Form input validation
//! - [`credentials`] - Password hashing and verification
//!
//! ## Example Usage
//!
//! ```rust
//! use cafe_core::{validation::parse_quantity, StockDirection};
//!
//! let qty = parse_quantity(" 3 ").unwrap();
//! assert_eq!(StockDirection::Out.signed(qty), -3);
//! ```

pub mod credentials;
pub mod error;
pub mod types;
pub mod validation;

// These allow users to do `use cafe_core::Product` instead of
// `use cafe_core::types::Product`
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

/// Largest quantity accepted for a single stock movement.
///
/// Guards against typos (1000 instead of 10) and keeps stock arithmetic far
/// away from integer overflow.
pub const MAX_ADJUSTMENT_QUANTITY: i64 = 10_000;

/// Maximum length of a staff user name.
pub const MAX_USERNAME_LEN: usize = 64;
