//! Supplier extras API module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/extras", get(handler::list))
        .route("/api/extras/{sku}", put(handler::update))
}
