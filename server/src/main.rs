use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use ticketing_server::config::Config;
use ticketing_server::routes::create_routes;
use ticketing_server::store::BookingStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    let addr = config.bind_addr().expect("HOST and PORT must form a valid address");

    let store = Arc::new(BookingStore::new(config.seats_per_section));
    tracing::info!(
        seats_per_section = config.seats_per_section,
        "Booking store initialized"
    );

    let app: Router = create_routes(store, &config);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("Server listening at http://{}", addr);

    axum::serve(listener, app).await.expect("Server failed");
}
