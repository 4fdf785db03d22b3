//! Room service: catalog listing and host-gated CRUD.

use tracing::info;
use uuid::Uuid;

use haven_core::validation::{validate_price_cents, validate_room_title};
use haven_core::{Principal, Role, Room, RoomDraft, RoomUpdate};
use haven_db::Database;

use crate::error::{ApiError, ApiResult};
use crate::guard::authorize;

/// Service for room listing operations.
pub struct RoomService {
    db: Database,
}

impl RoomService {
    /// Create a new room service.
    pub fn new(db: Database) -> Self {
        RoomService { db }
    }

    /// List the public catalog, optionally filtered by category.
    ///
    /// Unauthenticated surface. Empty and literal `"null"` categories mean
    /// no filter.
    pub async fn list(&self, category: Option<&str>) -> ApiResult<Vec<Room>> {
        Ok(self.db.rooms().list(category).await?)
    }

    /// Fetch one room by id.
    ///
    /// Ids sometimes arrive wrapped in stray JSON quotes from the consumer;
    /// they are stripped before lookup.
    pub async fn get(&self, id: &str) -> ApiResult<Room> {
        let id = normalize_room_id(id);
        self.db
            .rooms()
            .get_by_id(&id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Room: {id}")))
    }

    /// Add a room listing (host only). The listing is owned by the caller.
    pub async fn add(&self, caller: Option<&Principal>, draft: RoomDraft) -> ApiResult<Room> {
        authorize(caller, Some(Role::Host))?;

        validate_room_title(&draft.title)?;
        validate_price_cents(draft.price_cents)?;

        let room = Room {
            id: Uuid::new_v4().to_string(),
            host_email: draft.host_email,
            title: draft.title,
            location: draft.location,
            category: draft.category,
            price_cents: draft.price_cents,
            total_guests: draft.total_guests,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            description: draft.description,
            image_url: draft.image_url,
            availability: draft.availability,
            created_at: chrono::Utc::now(),
        };
        self.db.rooms().insert(&room).await?;
        info!(id = %room.id, host = %room.host_email, "Room listed");

        Ok(room)
    }

    /// Full-replace update of a room's mutable fields (host only).
    ///
    /// Every field in the payload is written; omitted optional fields
    /// become NULL.
    pub async fn update(
        &self,
        caller: Option<&Principal>,
        id: &str,
        update: RoomUpdate,
    ) -> ApiResult<Room> {
        authorize(caller, Some(Role::Host))?;

        validate_room_title(&update.title)?;
        validate_price_cents(update.price_cents)?;

        let id = normalize_room_id(id);
        self.db.rooms().update_full(&id, &update).await?;
        info!(%id, "Room updated");

        self.db
            .rooms()
            .get_by_id(&id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Room: {id}")))
    }

    /// Delete a room listing (host only).
    ///
    /// Bookings that reference the room keep their records and revenue.
    pub async fn delete(&self, caller: Option<&Principal>, id: &str) -> ApiResult<()> {
        authorize(caller, Some(Role::Host))?;

        let id = normalize_room_id(id);
        self.db.rooms().delete(&id).await?;
        info!(%id, "Room deleted");
        Ok(())
    }

    /// List the caller's own listings (host dashboard).
    pub async fn list_mine(&self, caller: Option<&Principal>) -> ApiResult<Vec<Room>> {
        authorize(caller, Some(Role::Host))?;
        let caller = caller
            .ok_or_else(|| ApiError::Forbidden("host access required".to_string()))?;

        Ok(self.db.rooms().list_by_host(&caller.email).await?)
    }
}

/// Strips stray double quotes from an id.
///
/// Consumers occasionally send a JSON-stringified id (`"\"abc\""`); lookups
/// tolerate that instead of 404ing.
fn normalize_room_id(id: &str) -> String {
    id.replace('"', "")
}
