//! # cafe-server: Café Stock Web Application
//!
//! Server-rendered HTML over axum. Staff sign in, view stock by category,
//! record deliveries and usage, and review the movement log.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Browser ──► TraceLayer ──► Router                                     │
//! │                               │                                         │
//! │               ┌───────────────┴────────────────┐                        │
//! │               ▼                                ▼                        │
//! │        public routes                   require_session                  │
//! │        /login /logout /healthz          │ no session → 303 /login       │
//! │                                         ▼                               │
//! │                                  protected handlers                     │
//! │                                  (SessionUser extension)                │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                                  cafe-db repositories ──► SQLite        │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                                  templates ──► Html<String>             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod templates;

pub use config::{ConfigError, ServerConfig};
pub use error::{AppError, ErrorCode};
pub use routes::build_router;
pub use session::{SessionStore, SessionUser};
pub use state::AppState;
