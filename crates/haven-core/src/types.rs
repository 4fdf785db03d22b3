//! # Domain Types
//!
//! Core domain types used throughout Haven.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Principal     │   │      Room       │   │    Booking      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  email (unique) │   │  host_email     │   │  room_id (weak) │       │
//! │  │  role           │   │  price_cents    │   │  guest_email    │       │
//! │  │  status         │   │  availability   │   │  transaction_id │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      Role       │   │  MemberStatus   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  None           │   │  None           │                             │
//! │  │  Guest          │   │  Requested      │                             │
//! │  │  Host           │   │  Verified       │                             │
//! │  │  Admin          │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Weak Reference: Booking.room_id
//! A booking references its room *by value only*: no foreign key, no
//! existence guarantee. Rooms may be deleted after booking; the booking
//! record (and its revenue) survives. This is intentional, not an oversight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// The role a principal holds.
///
/// ## Closed Enumeration
/// Roles are a closed set at the boundary. Unknown role strings are rejected
/// with a `ValidationError` instead of being stored and compared by equality
/// later, so a typo can never silently grant or deny access.
///
/// ## Elevation Rule
/// `Host` and `Admin` are only ever assigned by an administrator action; a
/// principal cannot self-assign an elevated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No role assigned yet (first interaction).
    None,
    /// May create bookings and view own statistics.
    Guest,
    /// May list rooms and view owned-room statistics.
    Host,
    /// May assign roles and view global statistics.
    Admin,
}

impl Role {
    /// String form used in storage and JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Guest => "guest",
            Role::Host => "host",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Role::None),
            "guest" => Ok(Role::Guest),
            "host" => Ok(Role::Host),
            "admin" => Ok(Role::Admin),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec![
                    "none".to_string(),
                    "guest".to_string(),
                    "host".to_string(),
                    "admin".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Member Status
// =============================================================================

/// Verification status of a principal.
///
/// ## Lifecycle
/// ```text
/// None ──(self: request host access)──► Requested ──(admin: assign role)──► Verified
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// No pending request.
    None,
    /// Principal asked for elevated access; awaiting admin review.
    Requested,
    /// An administrator assigned a role.
    Verified,
}

impl MemberStatus {
    /// String form used in storage and JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::None => "none",
            MemberStatus::Requested => "requested",
            MemberStatus::Verified => "verified",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(MemberStatus::None),
            "requested" => Ok(MemberStatus::Requested),
            "verified" => Ok(MemberStatus::Verified),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec![
                    "none".to_string(),
                    "requested".to_string(),
                    "verified".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Principal
// =============================================================================

/// An identity record: email, role, verification status.
///
/// Created on first interaction (upsert-on-write), never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Email address - the business key, unique.
    pub email: String,

    /// Assigned role.
    pub role: Role,

    /// Verification status.
    pub status: MemberStatus,

    /// When the principal was first created. Surfaced as `guestSince` /
    /// `hostSince` in statistics snapshots.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Upsert payload for a principal (create-or-update by email).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalUpsert {
    /// Email address - the upsert key.
    pub email: String,

    /// Requested role, if supplied.
    pub role: Option<Role>,

    /// Requested status, if supplied. `Requested` on an existing record
    /// updates the status field only.
    pub status: Option<MemberStatus>,
}

// =============================================================================
// Room
// =============================================================================

/// A listed room, owned by the host whose email matches `host_email`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning principal's email.
    pub host_email: String,

    /// Display title.
    pub title: String,

    /// Location (city/destination string; feeds favoriteDestination).
    pub location: String,

    /// Listing category (e.g. "Beachfront", "Cabins").
    pub category: String,

    /// Nightly price in cents.
    pub price_cents: i64,

    /// Maximum number of guests.
    pub total_guests: i64,

    /// Number of bedrooms.
    pub bedrooms: i64,

    /// Number of bathrooms.
    pub bathrooms: i64,

    /// Optional description. Full-replace updates may clear this.
    pub description: Option<String>,

    /// Optional image URL. Full-replace updates may clear this.
    pub image_url: Option<String>,

    /// Whether the room is currently bookable.
    pub availability: bool,

    /// When the room was listed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Returns the nightly price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// The complete mutable field set of a room.
///
/// ## Full-Replace Semantics
/// An update replaces ALL of these fields with exactly what the caller
/// supplies. Omitted optional fields become NULL - they are **not preserved**.
/// Callers must resend the complete record. Documented risk, tested as such.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    pub title: String,
    pub location: String,
    pub category: String,
    pub price_cents: i64,
    pub total_guests: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub availability: bool,
}

/// Creation payload for a room listing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    pub host_email: String,
    pub title: String,
    pub location: String,
    pub category: String,
    pub price_cents: i64,
    pub total_guests: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub availability: bool,
}

// =============================================================================
// Booking
// =============================================================================

/// A persisted record of a guest reserving a room.
///
/// Immutable once created, except for deletion (cancellation).
///
/// ## Trusted Fields
/// `transaction_id` is an opaque string supplied by the caller after the
/// payment-authorization handshake. It is NOT verified against the payment
/// processor's ledger, and `price_cents` is NOT checked against the
/// authorized amount. See the settlement notes in DESIGN.md.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Weak reference to the booked room (by value only, no FK).
    pub room_id: String,

    /// Booking guest's email.
    pub guest_email: String,

    /// Price paid, in cents.
    pub price_cents: i64,

    /// Stay date as stored. May be an RFC 3339 timestamp or a bare
    /// `YYYY-MM-DD` string; the statistics engine normalizes both forms.
    pub date: String,

    /// Opaque payment-transaction reference from the processor handshake.
    pub transaction_id: String,

    /// Destination copied from the room at booking time.
    pub location: String,

    /// When the booking record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Returns the booked price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Creation payload for a booking. Persisted verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub room_id: String,
    pub guest_email: String,
    pub price_cents: i64,
    pub date: String,
    pub transaction_id: String,
    pub location: String,
}

// =============================================================================
// Payment Authorization
// =============================================================================

/// An ephemeral handle representing permission to charge a card.
///
/// Never persisted. Its lifetime ends when the client completes or abandons
/// the charge. Nothing ties it back to a specific booking.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAuthorization {
    /// Authorized amount in minor currency units.
    pub amount_minor_units: i64,

    /// Settlement currency (fixed, see [`crate::SETTLEMENT_CURRENCY`]).
    pub currency: String,

    /// Client-usable secret to complete the charge.
    pub client_secret: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
