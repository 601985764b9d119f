//! Routes for the ask server

pub mod ask;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};
use crate::server::state::AppState;

/// Build the page and query routes
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(page::index))
        .route("/ask", post(ask::ask))
}
