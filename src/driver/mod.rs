pub mod geo;
pub mod handlers;
pub mod models;
pub mod routes;
