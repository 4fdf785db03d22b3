//! # Validation Module
//!
//! Input validation utilities for Haven.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Transport (deserialization)                                  │
//! │  └── Shape/type validation via serde                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Closed role/status enumerations                                   │
//! │  └── Required fields, formats, ranges                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE constraints (principal email)                              │
//! │                                                                         │
//! │  Note: booking.room_id deliberately has NO layer-3 check - it is a     │
//! │  weak reference by design.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use crate::error::{ValidationError, ValidationResult};
use crate::types::Role;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one `@` with a non-empty local part and a domain
///   containing a dot
///
/// This is a sanity check, not full RFC 5321 parsing; delivery failures are
/// the notification dispatcher's concern.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }

    Ok(())
}

/// Validates a room title.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_room_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Role Parsing
// =============================================================================

/// Parses a caller-supplied role string for a role-assignment operation.
///
/// ## Rules
/// - Absent (`None`) or empty → `ValidationError::Required` - the stored
///   role must be left unchanged
/// - Unknown value → `ValidationError::NotAllowed`
///
/// ## Example
/// ```rust
/// use haven_core::validation::parse_assigned_role;
/// use haven_core::types::Role;
///
/// assert_eq!(parse_assigned_role(Some("host")).unwrap(), Role::Host);
/// assert!(parse_assigned_role(None).is_err());
/// assert!(parse_assigned_role(Some("superuser")).is_err());
/// ```
pub fn parse_assigned_role(role: Option<&str>) -> ValidationResult<Role> {
    match role {
        None => Err(ValidationError::Required {
            field: "role".to_string(),
        }),
        Some(raw) if raw.trim().is_empty() => Err(ValidationError::Required {
            field: "role".to_string(),
        }),
        Some(raw) => Role::from_str(raw),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional listings)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a decimal price submitted to the payment bridge.
///
/// ## Rules
/// - Must be finite and strictly positive - the processor rejects
///   zero-amount authorizations
pub fn validate_authorization_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("guest@example.com").is_ok());
        assert!(validate_email("  host@stays.example.org  ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
    }

    #[test]
    fn test_validate_room_title() {
        assert!(validate_room_title("Seaside loft").is_ok());
        assert!(validate_room_title("").is_err());
        assert!(validate_room_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_parse_assigned_role() {
        assert_eq!(parse_assigned_role(Some("admin")).unwrap(), Role::Admin);
        assert_eq!(parse_assigned_role(Some("guest")).unwrap(), Role::Guest);

        // Absent or empty role must fail, leaving the stored role untouched
        assert!(matches!(
            parse_assigned_role(None),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_assigned_role(Some("  ")),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_assigned_role(Some("root")),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(12950).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_authorization_price() {
        assert!(validate_authorization_price(129.50).is_ok());
        assert!(validate_authorization_price(0.0).is_err());
        assert!(validate_authorization_price(-10.0).is_err());
        assert!(validate_authorization_price(f64::NAN).is_err());
        assert!(validate_authorization_price(f64::INFINITY).is_err());
    }
}
