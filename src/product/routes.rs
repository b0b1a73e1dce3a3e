use axum::{
    Router,
    routing::{delete, get},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route(
            "/products",
            get(handlers::get_products).post(handlers::create_product),
        )
        .route(
            "/products/{id}",
            delete(handlers::remove_product)
                .patch(handlers::update_product)
                .get(handlers::get_product_by_id),
        )
}
