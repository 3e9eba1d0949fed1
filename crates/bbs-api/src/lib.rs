pub mod board;
pub mod command;
pub mod intake;
pub mod render;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// All board routes. Callers add their own layers (tracing etc.).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(board::index))
        .route("/post", post(board::post_message))
        .route("/bbs/how", get(board::how_to_use))
        .route("/health", get(board::health))
        .with_state(state)
}
