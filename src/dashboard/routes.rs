use axum::{
    Router,
    routing::{delete, get},
};

use super::handlers;
use crate::utils::types::Pool;

pub fn get_routes() -> Router<Pool> {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/dashboard/export", get(handlers::export_dashboard))
        .route("/dashboard/export.pdf", get(handlers::export_dashboard_pdf))
        .route(
            "/alerts",
            get(handlers::get_alerts).post(handlers::create_alert),
        )
        .route("/alerts/{id}", delete(handlers::remove_alert))
}
