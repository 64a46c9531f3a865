//! Movement log listing.

use axum::{extract::State, response::Html, Extension};

use crate::error::AppError;
use crate::session::SessionUser;
use crate::state::AppState;
use crate::templates;

/// GET /logs
pub async fn movement_log(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Html<String>, AppError> {
    let records = state.db.movements().list_all().await?;
    Ok(Html(templates::movement_log(&user, &records)))
}
