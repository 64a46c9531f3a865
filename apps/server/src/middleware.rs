//! Session gate for protected routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::session::session_token;
use crate::state::AppState;

/// Lets the request through only with a live session.
///
/// On success the [`SessionUser`](crate::session::SessionUser) is attached as
/// a request extension; otherwise the caller is sent to `/login` with a 303.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match session_token(request.headers()) {
        Some(token) => state.sessions.get(&token).await,
        None => None,
    };

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => {
            debug!(path = %request.uri().path(), "No session, redirecting to login");
            Redirect::to("/login").into_response()
        }
    }
}
