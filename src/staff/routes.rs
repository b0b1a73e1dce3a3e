use axum::{
    Router,
    routing::{get, patch},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route("/staff", get(handlers::get_staff).post(handlers::create_staff))
        .route("/staff/sessions", get(handlers::get_staff_sessions))
        .route(
            "/staff/{id}",
            patch(handlers::update_staff_blocked).delete(handlers::remove_staff),
        )
}
