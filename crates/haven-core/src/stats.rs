//! # Statistics Aggregation Engine
//!
//! Rolls raw booking records into time-bucketed, role-scoped revenue
//! summaries. This module is pure: the operation layer fetches the scoped
//! booking set from the database and hands it here.
//!
//! ## Aggregation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Computation                                 │
//! │                                                                         │
//! │  Scoped bookings (already filtered by role)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize_date(booking.date)  ← "2024-03-10" and RFC 3339 both OK     │
//! │       │                                                                 │
//! │       ├── unparseable? → AggregationError (whole snapshot fails)       │
//! │       ▼                                                                 │
//! │  group by (year, month) → sum count + price                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sort ascending by (year, month)  ← HARD CONTRACT: trend charts        │
//! │       │                             assume chronological order         │
//! │       ▼                                                                 │
//! │  AdminStatistics / GuestStatistics / HostStatistics                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Scopes
//! - **Admin**: all bookings, plus room and principal counts
//! - **Guest**: bookings where `guest_email` equals the caller, plus the
//!   caller's most-frequent destination
//! - **Host**: bookings whose `room_id` is among the caller's rooms
//!
//! Snapshots are recomputed on every request and never cached.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AggregationError;
use crate::money::Money;
use crate::types::Booking;

// =============================================================================
// Snapshot Types
// =============================================================================

/// One month of booking activity within a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    /// Number of bookings in this month.
    pub bookings: u64,
    /// Summed booking prices for this month.
    pub revenue: Money,
}

/// Guest-scope monthly bucket. Identical semantics to [`MonthlyBucket`];
/// the consumer renders the guest chart from a `spend` series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GuestMonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub bookings: u64,
    pub spend: Money,
}

impl From<MonthlyBucket> for GuestMonthlyBucket {
    fn from(bucket: MonthlyBucket) -> Self {
        GuestMonthlyBucket {
            year: bucket.year,
            month: bucket.month,
            bookings: bucket.bookings,
            spend: bucket.revenue,
        }
    }
}

/// Global snapshot: every booking in the system.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatistics {
    pub total_bookings: u64,
    pub total_revenue: Money,
    pub total_rooms: u64,
    pub total_users: u64,
    pub monthly_data: Vec<MonthlyBucket>,
}

/// Self-scope snapshot for a guest.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GuestStatistics {
    pub total_bookings: u64,
    pub total_spend: Money,
    /// When the guest's principal record was created.
    #[ts(as = "Option<String>")]
    pub guest_since: Option<DateTime<Utc>>,
    /// Most frequently booked `location`, if the guest has any bookings.
    pub favorite_destination: Option<String>,
    pub monthly_data: Vec<GuestMonthlyBucket>,
}

/// Owned-rooms snapshot for a host.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HostStatistics {
    pub total_sales: Money,
    pub total_bookings: u64,
    pub total_rooms: u64,
    /// When the host's principal record was created.
    #[ts(as = "Option<String>")]
    pub host_since: Option<DateTime<Utc>>,
    pub monthly_data: Vec<MonthlyBucket>,
}

// =============================================================================
// Date Normalization
// =============================================================================

/// Normalizes a stored booking date into its `(year, month)` bucket key.
///
/// ## Accepted Forms
/// Booking dates are persisted verbatim from the caller, so the column holds
/// a mix of shapes:
/// - Bare calendar dates: `2024-03-10`
/// - RFC 3339 timestamps: `2024-03-10T14:30:00Z`, `2024-03-10T14:30:00+02:00`
/// - Timestamps without offset: `2024-03-10T14:30:00`
///
/// ## Errors
/// Anything else fails with [`AggregationError::UnparseableDate`] naming the
/// offending value. The caller fails the whole snapshot; buckets are never
/// partially dropped.
pub fn normalize_date(raw: &str) -> Result<(i32, u32), AggregationError> {
    use chrono::Datelike;

    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok((date.year(), date.month()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok((dt.year(), dt.month()));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok((dt.year(), dt.month()));
    }

    Err(AggregationError::UnparseableDate {
        value: raw.to_string(),
    })
}

// =============================================================================
// Aggregation
// =============================================================================

/// Groups bookings by `(year, month)` and sums count + revenue.
///
/// The returned buckets are sorted ascending by `(year, month)`. This
/// ordering is a hard contract - consumers render trend charts assuming
/// chronological order.
pub fn monthly_buckets(bookings: &[Booking]) -> Result<Vec<MonthlyBucket>, AggregationError> {
    // BTreeMap keyed by (year, month) keeps the buckets chronologically
    // sorted as they are built.
    let mut buckets: BTreeMap<(i32, u32), (u64, Money)> = BTreeMap::new();

    for booking in bookings {
        let key = normalize_date(&booking.date)?;
        let entry = buckets.entry(key).or_insert((0, Money::zero()));
        entry.0 += 1;
        entry.1 += booking.price();
    }

    Ok(buckets
        .into_iter()
        .map(|((year, month), (bookings, revenue))| MonthlyBucket {
            year,
            month,
            bookings,
            revenue,
        })
        .collect())
}

/// Sums booking count and revenue over the scope.
fn totals(bookings: &[Booking]) -> (u64, Money) {
    let revenue: Money = bookings.iter().map(Booking::price).sum();
    (bookings.len() as u64, revenue)
}

/// Finds the most frequently booked location.
///
/// Ties break toward the location that reached the winning count first in
/// booking order, which keeps the result deterministic per run.
pub fn favorite_destination(bookings: &[Booking]) -> Option<String> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for booking in bookings {
        *counts.entry(booking.location.as_str()).or_insert(0) += 1;
    }

    let mut best: Option<(&str, u64)> = None;
    for booking in bookings {
        let count = counts[booking.location.as_str()];
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((booking.location.as_str(), count)),
        }
    }

    best.map(|(location, _)| location.to_string())
}

/// Builds the global snapshot over all bookings.
///
/// `total_rooms` and `total_users` are collection counts supplied by the
/// caller (they are not derivable from the booking set).
pub fn admin_statistics(
    bookings: &[Booking],
    total_rooms: u64,
    total_users: u64,
) -> Result<AdminStatistics, AggregationError> {
    let monthly_data = monthly_buckets(bookings)?;
    let (total_bookings, total_revenue) = totals(bookings);

    Ok(AdminStatistics {
        total_bookings,
        total_revenue,
        total_rooms,
        total_users,
        monthly_data,
    })
}

/// Builds the self-scope snapshot for a guest.
///
/// The booking slice must already be filtered to the caller's own bookings;
/// this function trusts the scope it is given.
pub fn guest_statistics(
    bookings: &[Booking],
    guest_since: Option<DateTime<Utc>>,
) -> Result<GuestStatistics, AggregationError> {
    let monthly_data = monthly_buckets(bookings)?
        .into_iter()
        .map(GuestMonthlyBucket::from)
        .collect();
    let (total_bookings, total_spend) = totals(bookings);

    Ok(GuestStatistics {
        total_bookings,
        total_spend,
        guest_since,
        favorite_destination: favorite_destination(bookings),
        monthly_data,
    })
}

/// Builds the owned-rooms snapshot for a host.
///
/// The booking slice must already be restricted to bookings whose `room_id`
/// belongs to the caller's rooms.
pub fn host_statistics(
    bookings: &[Booking],
    total_rooms: u64,
    host_since: Option<DateTime<Utc>>,
) -> Result<HostStatistics, AggregationError> {
    let monthly_data = monthly_buckets(bookings)?;
    let (total_bookings, total_sales) = totals(bookings);

    Ok(HostStatistics {
        total_sales,
        total_bookings,
        total_rooms,
        host_since,
        monthly_data,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
