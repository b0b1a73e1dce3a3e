use axum::{
    Router,
    routing::{delete, get},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route(
            "/gallery",
            get(handlers::get_gallery).post(handlers::create_gallery_item),
        )
        .route("/gallery/{id}", delete(handlers::remove_gallery_item))
}
