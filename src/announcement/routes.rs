use axum::{
    Router,
    routing::{delete, get},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route(
            "/announcements",
            get(handlers::get_announcements).post(handlers::create_announcement),
        )
        .route("/announcements/{id}", delete(handlers::remove_announcement))
}
