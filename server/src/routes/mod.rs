use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, Config};
use crate::handlers::{
    get_receipt, health_check, modify_seat, purchase_ticket, remove_user, view_seats,
};
use crate::store::BookingStore;

pub fn create_routes(store: Arc<BookingStore>, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/tickets", post(purchase_ticket))
        .route("/tickets/:email", get(get_receipt))
        .route("/tickets/:email/seat", put(modify_seat))
        .route("/sections/:section/users", get(view_seats))
        .route("/users/:email", delete(remove_user))
        .with_state(store)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(config.request_timeout))
                .layer(create_cors_layer(config)),
        )
}
