use axum::{
    Router,
    routing::{get, put},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route("/drivers/locations", get(handlers::get_driver_locations))
        .route("/drivers/{id}/location", put(handlers::report_driver_location))
}
