//! Service implementations.
//!
//! Each service owns one slice of the domain and applies its own role gate
//! before touching storage. The transport resolves the caller's principal
//! (identity gate) and hands it in as `Option<&Principal>`.

pub mod booking_service;
pub mod principal_service;
pub mod room_service;
pub mod stats_service;

pub use booking_service::BookingService;
pub use principal_service::PrincipalService;
pub use room_service::RoomService;
pub use stats_service::StatsService;
