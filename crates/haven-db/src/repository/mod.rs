//! # Repository Module
//!
//! Database repository implementations for Haven.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service operation                                                     │
//! │       │                                                                 │
//! │       │  db.bookings().list(Some("guest@example.com"))                 │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  BookingRepository                                                     │
//! │  ├── insert(&self, booking)                                            │
//! │  ├── list_by_room(&self, room_id)                                      │
//! │  ├── list(&self, guest_filter)                                         │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Role scoping reads as an explicit WHERE clause, not ad hoc logic    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PrincipalRepository`] - Principal upsert, role assignment, lookups
//! - [`RoomRepository`] - Room CRUD and host-scoped listings
//! - [`BookingRepository`] - Booking lifecycle and scoped listings

pub mod booking;
pub mod principal;
pub mod room;

pub use booking::BookingRepository;
pub use principal::PrincipalRepository;
pub use room::RoomRepository;
