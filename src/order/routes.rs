use axum::{
    Router,
    routing::{get, patch, post, put},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route(
            "/orders",
            get(handlers::get_orders).post(handlers::create_order),
        )
        .route(
            "/orders/{id}",
            get(handlers::get_order_by_id).delete(handlers::remove_order),
        )
        .route("/orders/{id}/status", patch(handlers::update_order_status))
        .route("/orders/{id}/price", post(handlers::set_order_price))
        .route("/orders/{id}/driver", patch(handlers::assign_driver))
        .route(
            "/orders/{id}/destination",
            put(handlers::set_destination).delete(handlers::reset_destination),
        )
        .route("/orders/{id}/tracking", get(handlers::get_order_tracking))
}
