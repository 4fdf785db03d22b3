//! Role-scoped statistics snapshots.

mod common;

use common::*;

use haven_booking_api::services::StatsService;
use haven_booking_api::ApiError;
use haven_core::{Money, Role};

#[tokio::test]
async fn snapshots_are_role_gated() {
    let db = test_db().await;
    let service = StatsService::new(db);

    let guest = principal("guest@example.com", Role::Guest);

    let err = service.admin_snapshot(Some(&guest)).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    let err = service.host_snapshot(Some(&guest)).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    let err = service.guest_snapshot(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
}

#[tokio::test]
async fn self_scope_snapshot_is_identity_only() {
    let db = test_db().await;
    let service = StatsService::new(db.clone());

    // A host viewing their own booking history, not their sales
    let host = principal("host@example.com", Role::Host);
    db.bookings()
        .insert(&booking("r9", "host@example.com", 7000, "2024-05-05"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking("r9", "someone-else@example.com", 9000, "2024-05-06"))
        .await
        .unwrap();

    let snapshot = service.guest_snapshot(Some(&host)).await.unwrap();
    assert_eq!(snapshot.total_bookings, 1);
    assert_eq!(snapshot.total_spend, Money::from_cents(7000));
}

#[tokio::test]
async fn host_snapshot_buckets_and_totals() {
    let db = test_db().await;
    let service = StatsService::new(db.clone());

    let host = principal("host@example.com", Role::Host);
    let r1 = room("host@example.com", "Lisbon");
    let r2 = room("host@example.com", "Porto");
    db.rooms().insert(&r1).await.unwrap();
    db.rooms().insert(&r2).await.unwrap();

    db.bookings()
        .insert(&booking(&r1.id, "a@example.com", 10000, "2024-01-05"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking(&r2.id, "b@example.com", 15000, "2024-01-20"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking(&r1.id, "c@example.com", 20000, "2024-02-01"))
        .await
        .unwrap();

    let snapshot = service.host_snapshot(Some(&host)).await.unwrap();

    assert_eq!(snapshot.total_bookings, 3);
    assert_eq!(snapshot.total_sales, Money::from_cents(45000));
    assert_eq!(snapshot.total_rooms, 2);
    assert!(snapshot.host_since.is_some());

    assert_eq!(snapshot.monthly_data.len(), 2);
    let jan = &snapshot.monthly_data[0];
    assert_eq!((jan.year, jan.month, jan.bookings), (2024, 1, 2));
    assert_eq!(jan.revenue, Money::from_cents(25000));
    let feb = &snapshot.monthly_data[1];
    assert_eq!((feb.year, feb.month, feb.bookings), (2024, 2, 1));
    assert_eq!(feb.revenue, Money::from_cents(20000));
}

#[tokio::test]
async fn host_scope_excludes_other_hosts_rooms() {
    let db = test_db().await;
    let service = StatsService::new(db.clone());

    let alice = principal("alice@example.com", Role::Host);
    let mine = room("alice@example.com", "Lisbon");
    let theirs = room("bob@example.com", "Faro");
    db.rooms().insert(&mine).await.unwrap();
    db.rooms().insert(&theirs).await.unwrap();

    db.bookings()
        .insert(&booking(&mine.id, "g@example.com", 10000, "2024-03-01"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking(&theirs.id, "g@example.com", 99999, "2024-03-02"))
        .await
        .unwrap();

    let snapshot = service.host_snapshot(Some(&alice)).await.unwrap();

    // Only bookings on alice's rooms are counted
    assert_eq!(snapshot.total_bookings, 1);
    assert_eq!(snapshot.total_sales, Money::from_cents(10000));
    assert_eq!(snapshot.total_rooms, 1);
}

#[tokio::test]
async fn host_without_rooms_gets_empty_snapshot() {
    let db = test_db().await;
    let service = StatsService::new(db.clone());

    let host = principal("empty@example.com", Role::Host);
    db.bookings()
        .insert(&booking("someone-elses-room", "g@example.com", 5000, "2024-01-01"))
        .await
        .unwrap();

    let snapshot = service.host_snapshot(Some(&host)).await.unwrap();
    assert_eq!(snapshot.total_bookings, 0);
    assert_eq!(snapshot.total_sales, Money::zero());
    assert!(snapshot.monthly_data.is_empty());
}

#[tokio::test]
async fn guest_scope_contains_only_own_bookings() {
    let db = test_db().await;
    let service = StatsService::new(db.clone());

    let guest = principal("alice@example.com", Role::Guest);

    db.bookings()
        .insert(&booking_at("r1", "alice@example.com", 10000, "2024-04-01", "Lisbon"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking_at("r2", "alice@example.com", 12000, "2024-04-10", "Lisbon"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking_at("r3", "alice@example.com", 8000, "2024-05-02", "Porto"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking_at("r4", "bob@example.com", 50000, "2024-04-03", "Faro"))
        .await
        .unwrap();

    let snapshot = service.guest_snapshot(Some(&guest)).await.unwrap();

    assert_eq!(snapshot.total_bookings, 3);
    assert_eq!(snapshot.total_spend, Money::from_cents(30000));
    assert_eq!(snapshot.favorite_destination.as_deref(), Some("Lisbon"));
    assert!(snapshot.guest_since.is_some());

    // Bucket sums equal the scope totals
    let bucket_spend: Money = snapshot
        .monthly_data
        .iter()
        .map(|b| b.spend)
        .sum();
    assert_eq!(bucket_spend, snapshot.total_spend);
}

#[tokio::test]
async fn mixed_date_forms_share_a_bucket() {
    let db = test_db().await;
    let service = StatsService::new(db.clone());

    let guest = principal("alice@example.com", Role::Guest);
    db.bookings()
        .insert(&booking("r1", "alice@example.com", 10000, "2024-03-10"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking("r2", "alice@example.com", 5000, "2024-03-22T14:30:00Z"))
        .await
        .unwrap();

    let snapshot = service.guest_snapshot(Some(&guest)).await.unwrap();

    assert_eq!(snapshot.monthly_data.len(), 1);
    let bucket = &snapshot.monthly_data[0];
    assert_eq!((bucket.year, bucket.month, bucket.bookings), (2024, 3, 2));
    assert_eq!(bucket.spend, Money::from_cents(15000));
}

#[tokio::test]
async fn admin_snapshot_is_global_and_ordered() {
    let db = test_db().await;
    let service = StatsService::new(db.clone());

    let admin = principal("admin@example.com", Role::Admin);
    db.principals().insert(&admin).await.unwrap();
    db.principals()
        .insert(&principal("guest@example.com", Role::Guest))
        .await
        .unwrap();
    db.rooms().insert(&room("h@example.com", "Lisbon")).await.unwrap();

    // Out-of-order inserts across a year boundary
    db.bookings()
        .insert(&booking("r1", "a@example.com", 10000, "2024-02-01"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking("r1", "b@example.com", 20000, "2023-12-15"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking("r2", "c@example.com", 30000, "2024-01-10"))
        .await
        .unwrap();

    let snapshot = service.admin_snapshot(Some(&admin)).await.unwrap();

    assert_eq!(snapshot.total_bookings, 3);
    assert_eq!(snapshot.total_revenue, Money::from_cents(60000));
    assert_eq!(snapshot.total_rooms, 1);
    assert_eq!(snapshot.total_users, 2);

    // Strictly ascending (year, month)
    let keys: Vec<(i32, u32)> = snapshot
        .monthly_data
        .iter()
        .map(|b| (b.year, b.month))
        .collect();
    assert_eq!(keys, vec![(2023, 12), (2024, 1), (2024, 2)]);

    let bucket_revenue: Money = snapshot.monthly_data.iter().map(|b| b.revenue).sum();
    assert_eq!(bucket_revenue, snapshot.total_revenue);
}

#[tokio::test]
async fn unparseable_date_fails_the_whole_snapshot() {
    let db = test_db().await;
    let service = StatsService::new(db.clone());

    let admin = principal("admin@example.com", Role::Admin);
    db.bookings()
        .insert(&booking("r1", "a@example.com", 10000, "2024-02-01"))
        .await
        .unwrap();
    db.bookings()
        .insert(&booking("r1", "b@example.com", 20000, "next tuesday"))
        .await
        .unwrap();

    let err = service.admin_snapshot(Some(&admin)).await.unwrap_err();
    assert!(matches!(err, ApiError::Aggregation(_)));
    assert_eq!(err.status_code(), 500);
}
