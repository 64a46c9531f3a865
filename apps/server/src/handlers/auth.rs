//! Login and logout.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::authenticate;
use crate::error::{AppError, ErrorCode};
use crate::session::{clear_session_cookie, session_cookie, session_token};
use crate::state::AppState;
use crate::templates;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn login_page() -> Html<String> {
    Html(templates::login_page(None, ""))
}

/// POST /login
pub async fn login_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match authenticate(&state.db, &form.name, &form.password).await {
        Ok(user) => {
            // A fresh token on every login; any previous one is discarded.
            if let Some(old) = session_token(&headers) {
                state.sessions.remove(&old).await;
            }

            let token = state.sessions.create(user).await;
            let cookie = session_cookie(&token, state.config.cookie_secure);

            Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        Err(err) if err.code == ErrorCode::InvalidCredentials => Ok((
            StatusCode::UNAUTHORIZED,
            Html(templates::login_page(Some(&err.message), &form.name)),
        )
            .into_response()),
        Err(err) => Err(err),
    }
}

/// GET /logout
///
/// Always succeeds, with or without a session.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token).await;
    }

    let cookie = clear_session_cookie(state.config.cookie_secure);
    ([(header::SET_COOKIE, cookie)], Redirect::to("/login")).into_response()
}
