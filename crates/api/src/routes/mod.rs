pub mod calldata;
pub mod health;
pub mod position;
pub mod protocol;
pub mod ratio;
pub mod token;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(protocol::router())
        .merge(ratio::router())
        .merge(position::router())
        .merge(calldata::router())
        .merge(token::router())
        .with_state(state)
}
