//! Docsmith HTTP API server (Axum).
//!
//! Endpoints for extracting definitions, inserting documentation,
//! generating it end to end, and browsing the history of runs.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router with all routes.
pub fn app() -> Router {
    let state = AppState::new();
    app_with_state(state)
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::parser_routes())
        .merge(routes::history_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests;
