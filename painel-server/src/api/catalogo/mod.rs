//! Catalog API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalogo", catalogo_routes())
}

fn catalogo_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/magazord", get(handler::list_live))
        .route("/sync", post(handler::sync))
}
