use axum::response::Response;
use serde::Serialize;

use crate::utils::response::success;

pub mod tickets;

pub use tickets::{get_receipt, modify_seat, purchase_ticket, remove_user, view_seats};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "ticketing-api",
    };

    success(payload, "Health check successful")
}
