mod announcement;
mod auth;
mod category;
mod dashboard;
mod driver;
mod gallery;
mod maps;
mod notification;
mod order;
mod pool;
mod product;
mod rmq;
mod staff;
mod user;
mod utils;

use axum::Router;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use listenfd::ListenFd;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tokio::task::spawn_blocking(|| {
        let mut conn = sachio_ops::establish_connection();
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .expect("failed to run pending migrations");
    })
    .await
    .expect("migration task failed");

    let pool = pool::get_pool().await.expect("failed to build db pool");

    // order lifecycle events drain into the admin mailbox
    rmq::client::spawn_consumer(rmq::client::ORDER_EVENTS_QUEUE, "order-mailer");

    let routes = Router::new()
        .merge(auth::routes::get_routes())
        .merge(order::routes::get_routes())
        .merge(product::routes::get_routes())
        .merge(category::routes::get_routes())
        .merge(gallery::routes::get_routes())
        .merge(user::routes::get_routes())
        .merge(staff::routes::get_routes())
        .merge(driver::routes::get_routes())
        .merge(announcement::routes::get_routes())
        .merge(dashboard::routes::get_routes())
        .with_state(pool);
    let app = Router::new().nest("/api", routes);
    let app = app.fallback(utils::handler_404);

    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0).unwrap() {
        // if we are given a tcp listener on listen fd 0, we use that one
        Some(listener) => {
            listener.set_nonblocking(true).unwrap();
            TcpListener::from_std(listener).unwrap()
        }
        // otherwise fall back to local listening
        None => TcpListener::bind("127.0.0.1:3000").await.unwrap(),
    };
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
