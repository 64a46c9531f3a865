//! Route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, health, inventory, logs, stock};
use crate::middleware::require_session;
use crate::state::AppState;

/// Builds the full application router.
///
/// Everything except login, logout and the health check sits behind
/// [`require_session`].
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(inventory::dashboard))
        .route("/product/{id}", get(inventory::product_detail))
        .route(
            "/add_stock/{id}",
            get(stock::add_stock_form).post(stock::add_stock_submit),
        )
        .route(
            "/remove_stock/{id}",
            get(stock::remove_stock_form).post(stock::remove_stock_submit),
        )
        .route("/logs", get(logs::movement_log))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let public = Router::new()
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/logout", get(auth::logout))
        .route("/healthz", get(health::healthz));

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
