//! Room catalog listing and host-gated CRUD.

mod common;

use common::*;

use haven_booking_api::services::RoomService;
use haven_booking_api::ApiError;
use haven_core::{Role, RoomDraft, RoomUpdate};

fn draft(host: &str) -> RoomDraft {
    RoomDraft {
        host_email: host.to_string(),
        title: "Cliffside Cabin".to_string(),
        location: "Madeira".to_string(),
        category: "Cabins".to_string(),
        price_cents: 9900,
        total_guests: 2,
        bedrooms: 1,
        bathrooms: 1,
        description: Some("Quiet cabin above the cliffs".to_string()),
        image_url: Some("https://img.example.com/cabin.jpg".to_string()),
        availability: true,
    }
}

fn full_update_from(room: &haven_core::Room) -> RoomUpdate {
    RoomUpdate {
        title: room.title.clone(),
        location: room.location.clone(),
        category: room.category.clone(),
        price_cents: room.price_cents,
        total_guests: room.total_guests,
        bedrooms: room.bedrooms,
        bathrooms: room.bathrooms,
        description: room.description.clone(),
        image_url: room.image_url.clone(),
        availability: room.availability,
    }
}

#[tokio::test]
async fn add_is_host_gated() {
    let db = test_db().await;
    let service = RoomService::new(db.clone());

    let guest = principal("guest@example.com", Role::Guest);
    let err = service
        .add(Some(&guest), draft("guest@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    // Short-circuit: nothing was persisted
    assert_eq!(db.rooms().count().await.unwrap(), 0);

    let host = principal("host@example.com", Role::Host);
    let room = service
        .add(Some(&host), draft("host@example.com"))
        .await
        .unwrap();
    assert_eq!(room.host_email, "host@example.com");
    assert_eq!(db.rooms().count().await.unwrap(), 1);
}

#[tokio::test]
async fn catalog_filters_by_category() {
    let db = test_db().await;
    let service = RoomService::new(db.clone());

    db.rooms().insert(&room("h@example.com", "Lisbon")).await.unwrap();
    let mut cabin = room("h@example.com", "Madeira");
    cabin.category = "Cabins".to_string();
    db.rooms().insert(&cabin).await.unwrap();

    let cabins = service.list(Some("Cabins")).await.unwrap();
    assert_eq!(cabins.len(), 1);
    assert_eq!(cabins[0].category, "Cabins");

    // Absent / empty / stringified-null all mean no filter
    assert_eq!(service.list(None).await.unwrap().len(), 2);
    assert_eq!(service.list(Some("")).await.unwrap().len(), 2);
    assert_eq!(service.list(Some("null")).await.unwrap().len(), 2);
}

#[tokio::test]
async fn get_tolerates_stray_quotes() {
    let db = test_db().await;
    let service = RoomService::new(db.clone());

    let stored = room("h@example.com", "Lisbon");
    db.rooms().insert(&stored).await.unwrap();

    let quoted = format!("\"{}\"", stored.id);
    let found = service.get(&quoted).await.unwrap();
    assert_eq!(found.id, stored.id);

    let err = service.get("missing-id").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn update_is_full_replace() {
    let db = test_db().await;
    let service = RoomService::new(db.clone());
    let host = principal("host@example.com", Role::Host);

    let stored = service
        .add(Some(&host), draft("host@example.com"))
        .await
        .unwrap();
    assert!(stored.description.is_some());

    // Resend the record without the optional fields
    let mut update = full_update_from(&stored);
    update.description = None;
    update.image_url = None;
    update.price_cents = 10900;

    let updated = service
        .update(Some(&host), &stored.id, update)
        .await
        .unwrap();

    // Omitted optionals are cleared, not preserved
    assert!(updated.description.is_none());
    assert!(updated.image_url.is_none());
    assert_eq!(updated.price_cents, 10900);
}

#[tokio::test]
async fn my_listings_are_scoped_to_caller() {
    let db = test_db().await;
    let service = RoomService::new(db.clone());

    db.rooms().insert(&room("alice@example.com", "Lisbon")).await.unwrap();
    db.rooms().insert(&room("alice@example.com", "Porto")).await.unwrap();
    db.rooms().insert(&room("bob@example.com", "Faro")).await.unwrap();

    let alice = principal("alice@example.com", Role::Host);
    let mine = service.list_mine(Some(&alice)).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|r| r.host_email == "alice@example.com"));
}

#[tokio::test]
async fn delete_keeps_booking_records() {
    let db = test_db().await;
    let service = RoomService::new(db.clone());
    let host = principal("host@example.com", Role::Host);

    let stored = room("host@example.com", "Lisbon");
    db.rooms().insert(&stored).await.unwrap();
    db.bookings()
        .insert(&booking(&stored.id, "guest@example.com", 12500, "2024-06-01"))
        .await
        .unwrap();

    service.delete(Some(&host), &stored.id).await.unwrap();

    // Weak reference: the booking and its revenue survive the room
    assert!(db.rooms().get_by_id(&stored.id).await.unwrap().is_none());
    assert_eq!(db.bookings().list_by_room(&stored.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn add_rejects_invalid_payloads() {
    let db = test_db().await;
    let service = RoomService::new(db.clone());
    let host = principal("host@example.com", Role::Host);

    let mut bad_title = draft("host@example.com");
    bad_title.title = "   ".to_string();
    assert!(matches!(
        service.add(Some(&host), bad_title).await.unwrap_err(),
        ApiError::Validation(_)
    ));

    let mut bad_price = draft("host@example.com");
    bad_price.price_cents = -100;
    assert!(matches!(
        service.add(Some(&host), bad_price).await.unwrap_err(),
        ApiError::Validation(_)
    ));
}
