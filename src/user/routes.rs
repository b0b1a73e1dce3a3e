use axum::{
    Router,
    routing::{get, patch},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route("/users", get(handlers::get_all_users))
        .route("/users/drivers", get(handlers::get_drivers))
        .route("/users/{id}/blocked", patch(handlers::update_user_blocked))
        .route("/users/{id}/driver", patch(handlers::update_user_driver))
        .route(
            "/users/{id}/driver-active",
            patch(handlers::update_user_driver_active),
        )
}
