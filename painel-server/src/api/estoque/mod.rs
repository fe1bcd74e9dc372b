//! Inventory API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/estoque", estoque_routes())
}

fn estoque_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::read).post(handler::movement))
        .route("/lote", post(handler::start_batch))
        .route("/lote/{id}", get(handler::batch_snapshot))
}
