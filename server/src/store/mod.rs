//! In-memory booking state for the ticketing service.
//!
//! [`BookingStore`] owns every receipt and seat assignment behind a single
//! mutex. Each operation takes the lock for its whole duration, so
//! purchases, lookups and edits are serialized against each other. None of
//! them await or block while the guard is held.
//!
//! Receipt seat labels and the seat mapping are allowed to drift apart:
//! `modify_seat` only rewrites the label, and `remove_user` only drops the
//! receipt. Section listings follow the seat mapping, receipts follow the
//! label. Seat records are never purged, so a removed user's slot is not
//! handed out again.

pub mod allocation;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{PurchaseRequest, Receipt, Seat, Section, User};

pub use allocation::SeatAllocator;

pub const DEFAULT_SEATS_PER_SECTION: u32 = 10;

pub const USER_REMOVED: &str = "User removed successfully";
pub const SEAT_MODIFIED: &str = "Seat modified successfully";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("no ticket found for email: {email}")]
    NotFound { email: String },

    #[error("no more seats available")]
    ResourceExhausted,
}

#[derive(Debug)]
struct BookingState {
    receipts: HashMap<String, Receipt>,
    seats: HashMap<String, Seat>,
    allocator: SeatAllocator,
}

#[derive(Debug)]
pub struct BookingStore {
    state: Mutex<BookingState>,
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new(DEFAULT_SEATS_PER_SECTION)
    }
}

impl BookingStore {
    pub fn new(seats_per_section: u32) -> Self {
        Self {
            state: Mutex::new(BookingState {
                receipts: HashMap::new(),
                seats: HashMap::new(),
                allocator: SeatAllocator::new(seats_per_section),
            }),
        }
    }

    // Every mutation completes before any point that could panic, so a
    // poisoned guard still holds consistent state.
    fn lock(&self) -> MutexGuard<'_, BookingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocates the next seat and records a receipt for the purchaser.
    ///
    /// A repeat purchase for the same email gets a fresh seat and replaces
    /// the earlier receipt. When no seat is left nothing is written.
    pub fn purchase_ticket(&self, request: PurchaseRequest) -> Result<Receipt, BookingError> {
        let mut state = self.lock();

        let Some(seat) = state.allocator.allocate() else {
            warn!(
                email = %request.user.email,
                capacity = state.allocator.capacity(),
                "Seat allocation failed, both sections are full"
            );
            return Err(BookingError::ResourceExhausted);
        };

        let email = request.user.email.clone();
        let receipt = Receipt {
            from: request.from,
            to: request.to,
            user: request.user,
            price_paid: request.price_paid,
            seat: seat.to_string(),
        };

        state.seats.insert(email.clone(), seat);
        if state.receipts.insert(email.clone(), receipt.clone()).is_some() {
            debug!(email = %email, "Replaced existing receipt");
        }

        info!(email = %email, seat = %seat, "Ticket purchased");
        Ok(receipt)
    }

    pub fn get_receipt(&self, email: &str) -> Result<Receipt, BookingError> {
        self.lock()
            .receipts
            .get(email)
            .cloned()
            .ok_or_else(|| BookingError::NotFound {
                email: email.to_string(),
            })
    }

    /// Users holding a receipt whose recorded seat lies in `section`.
    /// Order is unspecified.
    pub fn view_seats(&self, section: Section) -> Vec<User> {
        let state = self.lock();

        let users: Vec<User> = state
            .receipts
            .iter()
            .filter(|(email, _)| {
                state
                    .seats
                    .get(*email)
                    .is_some_and(|seat| seat.section == section)
            })
            .map(|(_, receipt)| receipt.user.clone())
            .collect();

        debug!(section = %section, count = users.len(), "Listed section occupants");
        users
    }

    /// Drops the receipt for `email`. Removing an unknown email is not an
    /// error. The seat record stays behind.
    pub fn remove_user(&self, email: &str) -> &'static str {
        let removed = self.lock().receipts.remove(email).is_some();
        info!(email = %email, removed, "Remove user requested");
        USER_REMOVED
    }

    /// Overwrites the receipt's seat label verbatim. The label is not
    /// validated and the seat mapping is left as it was.
    pub fn modify_seat(&self, email: &str, new_seat: &str) -> Result<&'static str, BookingError> {
        let mut state = self.lock();

        let receipt = state
            .receipts
            .get_mut(email)
            .ok_or_else(|| BookingError::NotFound {
                email: email.to_string(),
            })?;

        info!(email = %email, from = %receipt.seat, to = %new_seat, "Seat label changed");
        receipt.seat = new_seat.to_string();
        Ok(SEAT_MODIFIED)
    }
}
