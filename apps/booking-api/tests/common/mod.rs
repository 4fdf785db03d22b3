//! Shared fixtures for booking-api integration tests.
//!
//! Each integration binary compiles this module independently and uses a
//! different subset of it.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use haven_booking_api::notify::RecordingNotifier;
use haven_core::{Booking, MemberStatus, Principal, Role, Room};
use haven_db::{Database, DbConfig};

pub async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

pub fn recording_notifier() -> Arc<RecordingNotifier> {
    Arc::new(RecordingNotifier::new())
}

pub fn principal(email: &str, role: Role) -> Principal {
    Principal {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        role,
        status: MemberStatus::Verified,
        created_at: Utc::now(),
    }
}

pub fn room(host_email: &str, location: &str) -> Room {
    Room {
        id: Uuid::new_v4().to_string(),
        host_email: host_email.to_string(),
        title: "Sea View Loft".to_string(),
        location: location.to_string(),
        category: "Beachfront".to_string(),
        price_cents: 12500,
        total_guests: 4,
        bedrooms: 2,
        bathrooms: 1,
        description: Some("Bright loft near the water".to_string()),
        image_url: None,
        availability: true,
        created_at: Utc::now(),
    }
}

pub fn booking(room_id: &str, guest: &str, price_cents: i64, date: &str) -> Booking {
    booking_at(room_id, guest, price_cents, date, "Lisbon")
}

pub fn booking_at(
    room_id: &str,
    guest: &str,
    price_cents: i64,
    date: &str,
    location: &str,
) -> Booking {
    Booking {
        id: Uuid::new_v4().to_string(),
        room_id: room_id.to_string(),
        guest_email: guest.to_string(),
        price_cents,
        date: date.to_string(),
        transaction_id: format!("pi_{}", Uuid::new_v4()),
        location: location.to_string(),
        created_at: Utc::now(),
    }
}

/// Polls until `check` passes or two seconds elapse.
///
/// Notification dispatch is a detached task, so tests that assert on
/// delivered messages wait for the background send to land.
pub async fn wait_until<F: Fn() -> bool>(check: F) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 2s");
}
