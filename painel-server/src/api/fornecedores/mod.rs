//! Supplier API module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/fornecedores",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/fornecedores/{id}",
            patch(handler::update).delete(handler::delete),
        )
}
