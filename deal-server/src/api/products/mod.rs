//! Product API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    // 静态路径优先于 /{id}
    Router::new()
        .route("/", get(handler::list))
        .route("/category/{category}", get(handler::list_by_category))
        .route("/trending", get(handler::trending))
        .route("/search", get(handler::search))
        .route("/update", post(handler::update))
        .route("/{id}", get(handler::get_by_id))
}
