//! Dashboard and product detail.

use axum::{
    extract::{Path, State},
    response::Html,
    Extension,
};
use cafe_core::CoreError;

use crate::error::AppError;
use crate::session::SessionUser;
use crate::state::AppState;
use crate::templates;

/// GET /
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Html<String>, AppError> {
    let categories = state.db.categories().list_all().await?;
    let items = state.db.products().list_inventory().await?;

    Ok(Html(templates::dashboard(&user, &categories, &items)))
}

/// GET /product/{id}
pub async fn product_detail(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let item = state
        .db
        .products()
        .get_summary(id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;

    let log = state.db.movements().list_for_product(id).await?;

    Ok(Html(templates::product_detail(&user, &item, &log)))
}
