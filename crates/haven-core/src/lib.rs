//! # haven-core: Pure Business Logic for Haven
//!
//! This crate is the **heart** of the Haven booking backend. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Haven Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                HTTP Transport (external collaborator)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 booking-api (gates + services)                  │   │
//! │  │    identity gate, role gate, bookings, statistics, payments     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ haven-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   stats   │  │ validation│  │   │
//! │  │   │ Principal │  │   Money   │  │  buckets  │  │   rules   │  │   │
//! │  │   │  Booking  │  │  rounding │  │  scoping  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    haven-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Principal, Room, Booking, Role, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`stats`] - Statistics aggregation engine (monthly revenue buckets)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Closed Enums**: Roles and statuses are enums at the boundary, never free strings

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use haven_core::Money` instead of
// `use haven_core::money::Money`

pub use error::{AggregationError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Settlement currency for payment authorizations.
///
/// ## Why a constant?
/// The payment processor is invoked with a single fixed currency. Multi-currency
/// listings would require storing the currency per room, which the data model
/// does not carry.
pub const SETTLEMENT_CURRENCY: &str = "usd";

/// Lifetime of an issued session credential, in days.
///
/// The credential itself is the only session record (stateless auth), so its
/// expiry is the only logout mechanism besides clearing the cookie.
pub const SESSION_LIFETIME_DAYS: i64 = 365;
