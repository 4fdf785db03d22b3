//! # Booking Repository
//!
//! Database operations for bookings.
//!
//! ## Scoping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Booking Repository Scoping                          │
//! │                                                                         │
//! │  Admin statistics     list(None)                    everything          │
//! │  Guest statistics     list(Some(guest_email))       WHERE guest_email   │
//! │  Host statistics      list_by_rooms(&host_room_ids) WHERE room_id IN    │
//! │  Room detail          list_by_room(room_id)         WHERE room_id = ?   │
//! │                                                                         │
//! │  A host with zero rooms gets an empty scope without touching the       │
//! │  database (empty IN clause short-circuits to an empty vec).            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use haven_core::Booking;

use crate::error::{DbError, DbResult};

const BOOKING_COLUMNS: &str =
    "id, room_id, guest_email, price_cents, date, transaction_id, location, created_at";

/// Repository for booking persistence operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new booking repository with the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Inserts a new booking record.
    ///
    /// The payload is persisted verbatim; price and transaction_id were
    /// already accepted by the service layer.
    pub async fn insert(&self, booking: &Booking) -> DbResult<()> {
        debug!(
            id = %booking.id,
            room_id = %booking.room_id,
            guest = %booking.guest_email,
            "Inserting booking"
        );

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, room_id, guest_email, price_cents, date,
                transaction_id, location, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.room_id)
        .bind(&booking.guest_email)
        .bind(booking.price_cents)
        .bind(&booking.date)
        .bind(&booking.transaction_id)
        .bind(&booking.location)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a booking (cancellation).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(%id, "Deleting booking");

        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Booking", id));
        }

        Ok(())
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Gets a booking by id. Returns None if not found.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Lists bookings, optionally scoped to one guest.
    ///
    /// `None` is the admin scope (all bookings).
    pub async fn list(&self, guest_email: Option<&str>) -> DbResult<Vec<Booking>> {
        let bookings = match guest_email {
            Some(email) => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings WHERE guest_email = ? \
                     ORDER BY created_at DESC"
                ))
                .bind(email)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(bookings)
    }

    /// Lists bookings for a single room.
    pub async fn list_by_room(&self, room_id: &str) -> DbResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id = ? ORDER BY created_at DESC"
        ))
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Lists bookings whose room_id is in the given set (host scope).
    ///
    /// SQLite has no array bind, so the IN clause placeholders are built
    /// dynamically. An empty set returns an empty vec without a query.
    pub async fn list_by_rooms(&self, room_ids: &[String]) -> DbResult<Vec<Booking>> {
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; room_ids.len()].join(", ");
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id IN ({placeholders}) \
             ORDER BY created_at DESC"
        );

        let mut query = sqlx::query_as::<_, Booking>(&sql);
        for id in room_ids {
            query = query.bind(id);
        }

        let bookings = query.fetch_all(&self.pool).await?;
        Ok(bookings)
    }

    /// Counts all bookings. Feeds the admin statistics snapshot.
    pub async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_booking(room_id: &str, guest: &str, price_cents: i64) -> Booking {
        Booking {
            id: Uuid::new_v4().to_string(),
            room_id: room_id.to_string(),
            guest_email: guest.to_string(),
            price_cents,
            date: "2024-03-15".to_string(),
            transaction_id: format!("pi_{}", Uuid::new_v4()),
            location: "Lisbon".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.bookings();

        let booking = sample_booking("room-1", "guest@example.com", 25000);
        repo.insert(&booking).await.unwrap();

        let found = repo.get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(found.price_cents, 25000);
        assert_eq!(found.transaction_id, booking.transaction_id);
    }

    #[tokio::test]
    async fn test_booking_survives_without_room() {
        let db = test_db().await;
        let repo = db.bookings();

        // room "ghost" never existed; weak reference means this still lands
        repo.insert(&sample_booking("ghost", "g@example.com", 100))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_guest_scope() {
        let db = test_db().await;
        let repo = db.bookings();

        repo.insert(&sample_booking("r1", "alice@example.com", 100))
            .await
            .unwrap();
        repo.insert(&sample_booking("r2", "alice@example.com", 200))
            .await
            .unwrap();
        repo.insert(&sample_booking("r3", "bob@example.com", 300))
            .await
            .unwrap();

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let alices = repo.list(Some("alice@example.com")).await.unwrap();
        assert_eq!(alices.len(), 2);
        assert!(alices.iter().all(|b| b.guest_email == "alice@example.com"));
    }

    #[tokio::test]
    async fn test_list_by_rooms_host_scope() {
        let db = test_db().await;
        let repo = db.bookings();

        repo.insert(&sample_booking("r1", "g@example.com", 100))
            .await
            .unwrap();
        repo.insert(&sample_booking("r2", "g@example.com", 200))
            .await
            .unwrap();
        repo.insert(&sample_booking("r3", "g@example.com", 300))
            .await
            .unwrap();

        let scoped = repo
            .list_by_rooms(&["r1".to_string(), "r3".to_string()])
            .await
            .unwrap();
        assert_eq!(scoped.len(), 2);

        // Host with no rooms: empty scope, no query
        let empty = repo.list_by_rooms(&[]).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_list_by_room() {
        let db = test_db().await;
        let repo = db.bookings();

        repo.insert(&sample_booking("r1", "a@example.com", 100))
            .await
            .unwrap();
        repo.insert(&sample_booking("r1", "b@example.com", 200))
            .await
            .unwrap();
        repo.insert(&sample_booking("r2", "c@example.com", 300))
            .await
            .unwrap();

        assert_eq!(repo.list_by_room("r1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_booking() {
        let db = test_db().await;
        let repo = db.bookings();

        let booking = sample_booking("r1", "g@example.com", 100);
        repo.insert(&booking).await.unwrap();
        repo.delete(&booking.id).await.unwrap();

        let err = repo.delete(&booking.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
