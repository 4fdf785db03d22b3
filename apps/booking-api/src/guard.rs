//! Role gate: the single authorization policy.
//!
//! Every role-gated operation calls [`authorize`] before doing anything
//! else. The `Result` return makes the short-circuit explicit: a
//! `Forbidden` here means the operation body never ran.

use haven_core::{Principal, Role};
use tracing::warn;

use crate::error::{ApiError, ApiResult};

/// Checks whether a principal satisfies a role requirement.
///
/// ## Policy
/// ```text
/// required = None            → allowed (identity gate already passed)
/// principal = None           → Forbidden (no record for this identity)
/// principal.role ≠ required  → Forbidden
/// principal.role = required  → allowed
/// ```
///
/// No role implies another: an admin calling a host-gated operation is
/// refused, matching the consumer's strict per-role dashboards.
pub fn authorize(principal: Option<&Principal>, required: Option<Role>) -> ApiResult<()> {
    let Some(required) = required else {
        return Ok(());
    };

    let Some(principal) = principal else {
        warn!(required = %required, "Role gate refused: no principal record");
        return Err(ApiError::Forbidden(format!(
            "{required} access required"
        )));
    };

    if principal.role != required {
        warn!(
            email = %principal.email,
            held = %principal.role,
            required = %required,
            "Role gate refused: role mismatch"
        );
        return Err(ApiError::Forbidden(format!(
            "{required} access required"
        )));
    }

    Ok(())
}
