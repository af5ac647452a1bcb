//! Thin adapters from HTTP calls onto [`BookingStore`] operations.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use crate::models::{ModifySeatRequest, PurchaseRequest, Section, SectionUsers, StatusMessage};
use crate::store::BookingStore;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn purchase_ticket(
    State(store): State<Arc<BookingStore>>,
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let receipt = store.purchase_ticket(request)?;
    Ok(success(receipt, "Ticket purchased successfully"))
}

pub async fn get_receipt(
    State(store): State<Arc<BookingStore>>,
    Path(email): Path<String>,
) -> Result<Response, AppError> {
    let receipt = store.get_receipt(&email)?;
    Ok(success(receipt, "Receipt retrieved successfully"))
}

/// Unknown section names simply have no occupants.
pub async fn view_seats(
    State(store): State<Arc<BookingStore>>,
    Path(section): Path<String>,
) -> Response {
    let users = match section.parse::<Section>() {
        Ok(section) => store.view_seats(section),
        Err(e) => {
            tracing::debug!(error = %e, "Listing requested for unknown section");
            Vec::new()
        }
    };

    success(SectionUsers { users }, "Seats retrieved successfully")
}

pub async fn remove_user(
    State(store): State<Arc<BookingStore>>,
    Path(email): Path<String>,
) -> Response {
    let message = store.remove_user(&email);
    success(
        StatusMessage {
            message: message.to_string(),
        },
        message,
    )
}

pub async fn modify_seat(
    State(store): State<Arc<BookingStore>>,
    Path(email): Path<String>,
    payload: Result<Json<ModifySeatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let message = store.modify_seat(&email, &request.new_seat)?;
    Ok(success(
        StatusMessage {
            message: message.to_string(),
        },
        message,
    ))
}
