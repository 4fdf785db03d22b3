//! # Haven Booking API
//!
//! Role-gated operation layer for the Haven booking backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Booking API Operations                           │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │ PrincipalSvc   │  │ RoomService    │  │ BookingService             ││
//! │  │                │  │                │  │                            ││
//! │  │ • upsert       │  │ • list/get     │  │ • create (+confirmation)   ││
//! │  │ • assign_role  │  │ • add/update   │  │ • list / list_by_room      ││
//! │  │ • list/lookup  │  │ • delete/mine  │  │ • cancel                   ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────────────────────────────────────┐│
//! │  │ StatsService   │  │ Gates & Bridges                                ││
//! │  │                │  │                                                ││
//! │  │ • admin scope  │  │ • TokenManager (JWT + session cookie)          ││
//! │  │ • guest scope  │  │ • authorize() (single role-gate policy)        ││
//! │  │ • host scope   │  │ • PaymentGateway / Notifier                    ││
//! │  └────────────────┘  └────────────────────────────────────────────────┘│
//! │                                                                         │
//! │  Every gate short-circuits: a refused caller's operation never runs.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HAVEN_DATABASE_PATH` - SQLite database file (default: haven.db)
//! - `JWT_SECRET` - Secret for session-token signing
//! - `SESSION_LIFETIME_DAYS` - Session token lifetime (default: 365)
//! - `SMTP_HOST` / `SMTP_PORT` / `SMTP_USERNAME` / `SMTP_PASSWORD` /
//!   `SMTP_FROM` - Notification dispatcher
//! - `PAYMENT_SECRET_KEY` / `PAYMENT_API_BASE` - Payment bridge

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod notify;
pub mod payment;
pub mod services;

// Re-exports
pub use config::AppConfig;
pub use error::{ApiError, ApiResult};

use haven_db::Database;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
}
