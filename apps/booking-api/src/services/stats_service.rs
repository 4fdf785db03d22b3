//! Statistics service: role-scoped revenue snapshots.
//!
//! ## Scoping
//! ```text
//! admin  → every booking            + room/user counts
//! guest  → guest_email == caller    + favorite destination, guestSince
//! host   → room_id ∈ caller's rooms + room count, hostSince
//! ```
//! Scope filtering happens in repository SQL; the pure aggregation engine
//! in haven-core trusts the slice it is given. Snapshots are derived per
//! request and never cached. A single unparseable stored date fails the
//! whole snapshot (logged, mapped to an internal error by the transport);
//! partial buckets are never returned.

use tracing::{error, info};

use haven_core::stats::{
    admin_statistics, guest_statistics, host_statistics, AdminStatistics, GuestStatistics,
    HostStatistics,
};
use haven_core::{Principal, Role};
use haven_db::Database;

use crate::error::{ApiError, ApiResult};
use crate::guard::authorize;

/// Service for statistics snapshot operations.
pub struct StatsService {
    db: Database,
}

impl StatsService {
    /// Create a new statistics service.
    pub fn new(db: Database) -> Self {
        StatsService { db }
    }

    /// Global snapshot: all bookings, room and user counts.
    pub async fn admin_snapshot(&self, caller: Option<&Principal>) -> ApiResult<AdminStatistics> {
        authorize(caller, Some(Role::Admin))?;

        let bookings = self.db.bookings().list(None).await?;
        let total_rooms = self.db.rooms().count().await?;
        let total_users = self.db.principals().count().await?;

        let snapshot = admin_statistics(&bookings, total_rooms, total_users)
            .map_err(|e| self.aggregation_failed(e))?;

        info!(
            bookings = snapshot.total_bookings,
            revenue_cents = snapshot.total_revenue.cents(),
            "Admin snapshot built"
        );
        Ok(snapshot)
    }

    /// Self-scope snapshot for the caller.
    ///
    /// Identity-only: any principal may view their own booking history,
    /// whatever role they hold. The scope is always `guest_email ==
    /// caller.email`, so there is nothing role-specific to protect.
    pub async fn guest_snapshot(&self, caller: Option<&Principal>) -> ApiResult<GuestStatistics> {
        authorize(caller, None)?;
        let caller = caller
            .ok_or_else(|| ApiError::Forbidden("no principal record".to_string()))?;

        let bookings = self.db.bookings().list(Some(&caller.email)).await?;

        let snapshot = guest_statistics(&bookings, Some(caller.created_at))
            .map_err(|e| self.aggregation_failed(e))?;

        info!(
            email = %caller.email,
            bookings = snapshot.total_bookings,
            "Guest snapshot built"
        );
        Ok(snapshot)
    }

    /// Owned-rooms snapshot for the calling host.
    pub async fn host_snapshot(&self, caller: Option<&Principal>) -> ApiResult<HostStatistics> {
        authorize(caller, Some(Role::Host))?;
        let caller = caller
            .ok_or_else(|| ApiError::Forbidden("host access required".to_string()))?;

        // ids_by_host is both the booking scope and the room count; one
        // query keeps the two consistent
        let room_ids = self.db.rooms().ids_by_host(&caller.email).await?;
        let bookings = self.db.bookings().list_by_rooms(&room_ids).await?;

        let snapshot = host_statistics(&bookings, room_ids.len() as u64, Some(caller.created_at))
            .map_err(|e| self.aggregation_failed(e))?;

        info!(
            email = %caller.email,
            rooms = room_ids.len(),
            sales_cents = snapshot.total_sales.cents(),
            "Host snapshot built"
        );
        Ok(snapshot)
    }

    fn aggregation_failed(&self, e: haven_core::AggregationError) -> ApiError {
        error!(cause = %e, "Statistics snapshot failed");
        ApiError::Aggregation(e)
    }
}
