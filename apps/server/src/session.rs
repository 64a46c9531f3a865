//! # Sessions
//!
//! Server-side session store and the cookie that carries its token.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /login ──► authenticate ──► SessionStore::create(user) ──► token │
//! │                                                        │                │
//! │                          Set-Cookie: cafe_session=<token>; HttpOnly    │
//! │                                                        │                │
//! │  GET /  Cookie: cafe_session=<token>                   ▼                │
//! │       │                                   ┌──────────────────────────┐ │
//! │       └──► require_session ──── get() ───►│ token → (user, last_seen)│ │
//! │                                           └──────────────────────────┘ │
//! │  GET /logout ──► remove(token) + expired cookie                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tokens are random UUID v4 values. They carry no data; everything the
//! handlers need lives server-side.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "cafe_session";

/// The signed-in staff member, attached to every gated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub name: String,
}

#[derive(Debug)]
struct Session {
    user: SessionUser,
    last_seen: Instant,
}

/// In-memory session store shared by all handlers.
///
/// Sessions expire after `ttl` without a request. Restarting the server
/// signs everyone out.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Option<Duration>,
}

impl SessionStore {
    /// Creates an empty store. `None` disables idle expiry.
    pub fn new(ttl: Option<Duration>) -> Self {
        SessionStore {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Starts a session for `user` and returns its token.
    pub async fn create(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().simple().to_string();

        debug!(user_id = user.user_id, "Session created");

        self.sessions.write().await.insert(
            token.clone(),
            Session {
                user,
                last_seen: Instant::now(),
            },
        );
        token
    }

    /// Resolves a token to its user and refreshes the idle timer.
    ///
    /// Expired sessions are removed and treated as missing.
    pub async fn get(&self, token: &str) -> Option<SessionUser> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        let session = sessions.get_mut(token)?;
        if self.is_expired(session, now) {
            sessions.remove(token);
            debug!("Expired session dropped");
            return None;
        }

        session.last_seen = now;
        Some(session.user.clone())
    }

    /// Ends a session. Unknown tokens are ignored.
    pub async fn remove(&self, token: &str) {
        if self.sessions.write().await.remove(token).is_some() {
            debug!("Session removed");
        }
    }

    /// Drops every expired session and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        before - sessions.len()
    }

    /// Number of live (possibly expired but not yet purged) sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn is_expired(&self, session: &Session, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.duration_since(session.last_seen) > ttl,
            None => false,
        }
    }
}

// =============================================================================
// Cookie helpers
// =============================================================================

/// Extracts the session token from the request's `Cookie` headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{}=", SESSION_COOKIE);

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// `Set-Cookie` value that stores `token`.
pub fn session_cookie(token: &str, secure: bool) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax{}",
        SESSION_COOKIE,
        token,
        if secure { "; Secure" } else { "" }
    )
}

/// `Set-Cookie` value that deletes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
        SESSION_COOKIE,
        if secure { "; Secure" } else { "" }
    )
}
