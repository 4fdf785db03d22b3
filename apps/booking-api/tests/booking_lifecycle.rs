//! Booking creation, listing, and cancellation.

mod common;

use std::sync::Arc;

use common::*;

use haven_booking_api::notify::RecordingNotifier;
use haven_booking_api::services::BookingService;
use haven_booking_api::ApiError;
use haven_core::BookingDraft;

fn draft(room_id: &str, guest: &str) -> BookingDraft {
    BookingDraft {
        room_id: room_id.to_string(),
        guest_email: guest.to_string(),
        price_cents: 25000,
        date: "2024-06-10".to_string(),
        transaction_id: "pi_3OqX42_secret".to_string(),
        location: "Lisbon".to_string(),
    }
}

#[tokio::test]
async fn create_persists_payload_verbatim() {
    let db = test_db().await;
    let service = BookingService::new(db.clone(), recording_notifier());

    let created = service
        .create(draft("room-1", "guest@example.com"))
        .await
        .unwrap();

    let stored = db.bookings().get_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.room_id, "room-1");
    assert_eq!(stored.price_cents, 25000);
    assert_eq!(stored.transaction_id, "pi_3OqX42_secret");
    assert_eq!(stored.date, "2024-06-10");
}

#[tokio::test]
async fn confirmation_email_carries_transaction_id() {
    let db = test_db().await;
    let notifier = recording_notifier();
    let service = BookingService::new(db, notifier.clone());

    service
        .create(draft("room-1", "guest@example.com"))
        .await
        .unwrap();

    wait_until(|| !notifier.sent().is_empty()).await;
    let sent = notifier.sent();
    assert_eq!(sent[0].0, "guest@example.com");
    assert_eq!(sent[0].1.subject, "Booking Successful!");
    assert!(sent[0].1.html_body.contains("pi_3OqX42_secret"));
}

#[tokio::test]
async fn delivery_failure_never_fails_the_booking() {
    let db = test_db().await;
    let notifier = Arc::new(RecordingNotifier::failing());
    let service = BookingService::new(db.clone(), notifier);

    // Notifier is down; the booking still lands
    let created = service
        .create(draft("room-1", "guest@example.com"))
        .await
        .unwrap();

    assert!(db.bookings().get_by_id(&created.id).await.unwrap().is_some());
}

#[tokio::test]
async fn cancel_semantics() {
    let db = test_db().await;
    let service = BookingService::new(db.clone(), recording_notifier());

    let created = service
        .create(draft("room-1", "guest@example.com"))
        .await
        .unwrap();
    let other = service
        .create(draft("room-2", "guest@example.com"))
        .await
        .unwrap();

    // Missing id → NotFound
    let err = service.cancel("no-such-booking").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.status_code(), 404);

    // Existing id removes exactly one record
    service.cancel(&created.id).await.unwrap();
    assert!(db.bookings().get_by_id(&created.id).await.unwrap().is_none());
    assert!(db.bookings().get_by_id(&other.id).await.unwrap().is_some());

    // Cancelling again → NotFound
    let err = service.cancel(&created.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn listings_are_scoped() {
    let db = test_db().await;
    let service = BookingService::new(db.clone(), recording_notifier());

    service.create(draft("r1", "alice@example.com")).await.unwrap();
    service.create(draft("r1", "bob@example.com")).await.unwrap();
    service.create(draft("r2", "alice@example.com")).await.unwrap();

    assert_eq!(service.list(None).await.unwrap().len(), 3);

    let alices = service.list(Some("alice@example.com")).await.unwrap();
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|b| b.guest_email == "alice@example.com"));

    assert_eq!(service.list_by_room("r1").await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_rejects_malformed_guest_email() {
    let db = test_db().await;
    let service = BookingService::new(db.clone(), recording_notifier());

    let err = service
        .create(draft("room-1", "not-an-email"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(db.bookings().count().await.unwrap(), 0);
}
