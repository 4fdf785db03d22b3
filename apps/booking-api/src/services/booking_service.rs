//! Booking service: creation, scoped listings, cancellation.
//!
//! ## Trust Boundary
//! The creation payload is persisted verbatim. `transaction_id` is taken
//! on faith from the client's payment handshake and `price_cents` is not
//! re-checked against the authorized amount. The confirmation email is
//! fire-and-forget; a booking never fails because delivery did.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use haven_core::validation::validate_email;
use haven_core::{Booking, BookingDraft};
use haven_db::Database;

use crate::error::ApiResult;
use crate::notify::{dispatch, EmailMessage, Notifier};

/// Service for booking lifecycle operations.
pub struct BookingService {
    db: Database,
    notifier: Arc<dyn Notifier>,
}

impl BookingService {
    /// Create a new booking service.
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        BookingService { db, notifier }
    }

    /// Persist a booking and dispatch the confirmation email.
    pub async fn create(&self, draft: BookingDraft) -> ApiResult<Booking> {
        validate_email(&draft.guest_email)?;

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            room_id: draft.room_id,
            guest_email: draft.guest_email,
            price_cents: draft.price_cents,
            date: draft.date,
            transaction_id: draft.transaction_id,
            location: draft.location,
            created_at: Utc::now(),
        };
        self.db.bookings().insert(&booking).await?;
        info!(
            id = %booking.id,
            room_id = %booking.room_id,
            guest = %booking.guest_email,
            "Booking created"
        );

        dispatch(
            self.notifier.clone(),
            booking.guest_email.clone(),
            confirmation_message(&booking),
        );

        Ok(booking)
    }

    /// List bookings for one room.
    pub async fn list_by_room(&self, room_id: &str) -> ApiResult<Vec<Booking>> {
        Ok(self.db.bookings().list_by_room(room_id).await?)
    }

    /// List bookings, optionally scoped to one guest email.
    pub async fn list(&self, guest_email: Option<&str>) -> ApiResult<Vec<Booking>> {
        Ok(self.db.bookings().list(guest_email).await?)
    }

    /// Cancel (delete) a booking by id.
    ///
    /// A missing id is `NotFound`; an existing id removes exactly one
    /// record. There is no booking update operation.
    pub async fn cancel(&self, id: &str) -> ApiResult<()> {
        self.db.bookings().delete(id).await?;
        info!(%id, "Booking cancelled");
        Ok(())
    }
}

fn confirmation_message(booking: &Booking) -> EmailMessage {
    EmailMessage {
        subject: "Booking Successful!".to_string(),
        html_body: format!(
            "<h2>Your booking is confirmed</h2>\
             <p>Thank you for booking with Haven. We hope you enjoy your stay \
             in {location}.</p>\
             <p>Transaction Id: <strong>{transaction_id}</strong></p>",
            location = booking.location,
            transaction_id = booking.transaction_id,
        ),
    }
}
