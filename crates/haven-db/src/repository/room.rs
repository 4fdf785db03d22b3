//! # Room Repository
//!
//! Database operations for room listings.
//!
//! ## Scoping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Room Repository Scoping                           │
//! │                                                                         │
//! │  Public catalog        list(category)        optional category filter   │
//! │  Host dashboard        list_by_host(email)   WHERE host_email = ?       │
//! │  Host statistics       ids_by_host(email)    id projection only         │
//! │  Admin statistics      count()               global                     │
//! │                                                                         │
//! │  Ownership scoping happens here, in the WHERE clause, so a service     │
//! │  cannot accidentally hand one host another host's rooms.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use haven_core::{Room, RoomUpdate};

use crate::error::{DbError, DbResult};

const ROOM_COLUMNS: &str = "id, host_email, title, location, category, price_cents, \
     total_guests, bedrooms, bathrooms, description, image_url, availability, created_at";

/// Repository for room persistence operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    /// Creates a new room repository with the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        RoomRepository { pool }
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Inserts a new room listing.
    pub async fn insert(&self, room: &Room) -> DbResult<()> {
        debug!(id = %room.id, host = %room.host_email, "Inserting room");

        sqlx::query(
            r#"
            INSERT INTO rooms (
                id, host_email, title, location, category, price_cents,
                total_guests, bedrooms, bathrooms, description, image_url,
                availability, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&room.id)
        .bind(&room.host_email)
        .bind(&room.title)
        .bind(&room.location)
        .bind(&room.category)
        .bind(room.price_cents)
        .bind(room.total_guests)
        .bind(room.bedrooms)
        .bind(room.bathrooms)
        .bind(&room.description)
        .bind(&room.image_url)
        .bind(room.availability)
        .bind(room.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replaces the full mutable field set of a room.
    ///
    /// Every column in the update payload is written, including None for the
    /// optional ones. Omitted description/image_url become NULL.
    pub async fn update_full(&self, id: &str, update: &RoomUpdate) -> DbResult<()> {
        debug!(%id, "Updating room (full replace)");

        let result = sqlx::query(
            r#"
            UPDATE rooms SET
                title = ?, location = ?, category = ?, price_cents = ?,
                total_guests = ?, bedrooms = ?, bathrooms = ?,
                description = ?, image_url = ?, availability = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.title)
        .bind(&update.location)
        .bind(&update.category)
        .bind(update.price_cents)
        .bind(update.total_guests)
        .bind(update.bedrooms)
        .bind(update.bathrooms)
        .bind(&update.description)
        .bind(&update.image_url)
        .bind(update.availability)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Room", id));
        }

        Ok(())
    }

    /// Deletes a room listing.
    ///
    /// Bookings referencing the room are untouched (weak reference).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(%id, "Deleting room");

        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Room", id));
        }

        Ok(())
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Gets a room by id. Returns None if not found.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Lists rooms for the public catalog, optionally filtered by category.
    ///
    /// An absent, empty, or literal "null" category means no filter. The
    /// "null" form is what a stringified absent query parameter arrives as.
    pub async fn list(&self, category: Option<&str>) -> DbResult<Vec<Room>> {
        let rooms = match category.map(str::trim) {
            Some(cat) if !cat.is_empty() && cat != "null" => {
                sqlx::query_as::<_, Room>(&format!(
                    "SELECT {ROOM_COLUMNS} FROM rooms WHERE category = ? ORDER BY created_at DESC"
                ))
                .bind(cat)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Room>(&format!(
                    "SELECT {ROOM_COLUMNS} FROM rooms ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rooms)
    }

    /// Lists rooms owned by a host, newest first.
    pub async fn list_by_host(&self, host_email: &str) -> DbResult<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE host_email = ? ORDER BY created_at DESC"
        ))
        .bind(host_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Returns just the ids of a host's rooms.
    ///
    /// The host statistics scope is "bookings whose room_id is one of these".
    pub async fn ids_by_host(&self, host_email: &str) -> DbResult<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT id FROM rooms WHERE host_email = ?")
            .bind(host_email)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// Counts all rooms. Feeds the admin statistics snapshot.
    pub async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
