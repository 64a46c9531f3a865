//! Stock In / Stock Out forms.
//!
//! ```text
//! GET  /add_stock/{id}     ──► form
//! POST /add_stock/{id}     ──► parse_quantity ──┬── bad ──► 422 + form with message
//!                                               └── ok  ──► record (one tx) ──► 303 /product/{id}
//! ```
//!
//! `/remove_stock/{id}` is identical with the opposite sign.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use cafe_core::validation::parse_quantity;
use cafe_core::{CoreError, InventoryItem, StockDirection};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::session::SessionUser;
use crate::state::AppState;
use crate::templates;

/// Stock form data. The raw text is kept so it can be echoed back.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    #[serde(default)]
    pub quantity: String,
}

/// GET /add_stock/{id}
pub async fn add_stock_form(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    render_form(&state, &user, id, StockDirection::In).await
}

/// POST /add_stock/{id}
pub async fn add_stock_submit(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<i64>,
    Form(form): Form<QuantityForm>,
) -> Result<Response, AppError> {
    apply(&state, &user, id, StockDirection::In, &form.quantity).await
}

/// GET /remove_stock/{id}
pub async fn remove_stock_form(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    render_form(&state, &user, id, StockDirection::Out).await
}

/// POST /remove_stock/{id}
pub async fn remove_stock_submit(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<i64>,
    Form(form): Form<QuantityForm>,
) -> Result<Response, AppError> {
    apply(&state, &user, id, StockDirection::Out, &form.quantity).await
}

async fn find_product(state: &AppState, id: i64) -> Result<InventoryItem, AppError> {
    let item = state
        .db
        .products()
        .get_summary(id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;
    Ok(item)
}

async fn render_form(
    state: &AppState,
    user: &SessionUser,
    id: i64,
    direction: StockDirection,
) -> Result<Html<String>, AppError> {
    let item = find_product(state, id).await?;
    Ok(Html(templates::stock_form(user, &item, direction, None, "")))
}

async fn apply(
    state: &AppState,
    user: &SessionUser,
    id: i64,
    direction: StockDirection,
    raw_quantity: &str,
) -> Result<Response, AppError> {
    let item = find_product(state, id).await?;

    let quantity = match parse_quantity(raw_quantity) {
        Ok(quantity) => quantity,
        Err(err) => {
            debug!(product_id = id, error = %err, "Rejected stock quantity");
            let message = err.to_string();
            let page = templates::stock_form(user, &item, direction, Some(&message), raw_quantity);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response());
        }
    };

    let adjustment = state
        .db
        .movements()
        .record(id, direction, quantity, user.user_id)
        .await?;

    debug!(
        product_id = adjustment.product_id,
        user = %user.name,
        new_stock = adjustment.new_stock,
        entry_id = adjustment.entry.id,
        "Stock form applied"
    );

    Ok(Redirect::to(&format!("/product/{}", id)).into_response())
}
