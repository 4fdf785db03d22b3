//! Principal service: upsert-on-write identity records and role review.
//!
//! ## Upsert Semantics
//! ```text
//! upsert(email, role?, status?)
//!    │
//!    ├─ record exists, status == requested  → update status ONLY
//!    ├─ record exists, anything else        → return stored record unchanged
//!    └─ no record                           → insert (role/status default
//!                                             none), send welcome email
//! ```
//! A principal can request elevation (`status: requested`) but never
//! self-assign an elevated role: a creation payload carrying `host` or
//! `admin` is rejected outright. Only [`PrincipalService::assign_role`]
//! elevates, and only an admin reaches it.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use haven_core::validation::{parse_assigned_role, validate_email};
use haven_core::{MemberStatus, Principal, PrincipalUpsert, Role, ValidationError};
use haven_db::Database;

use crate::error::{ApiError, ApiResult};
use crate::guard::authorize;
use crate::notify::{dispatch, EmailMessage, Notifier};

/// Service for principal lifecycle operations.
pub struct PrincipalService {
    db: Database,
    notifier: Arc<dyn Notifier>,
}

impl PrincipalService {
    /// Create a new principal service.
    pub fn new(db: Database, notifier: Arc<dyn Notifier>) -> Self {
        PrincipalService { db, notifier }
    }

    /// Create-or-update a principal keyed by email.
    ///
    /// Self-service: no role gate. Elevated roles cannot enter through
    /// here at all - existing records keep their stored role untouched,
    /// and a creation payload claiming `host` or `admin` is rejected
    /// before any write.
    pub async fn upsert(&self, payload: PrincipalUpsert) -> ApiResult<Principal> {
        validate_email(&payload.email)?;
        let repo = self.db.principals();

        if let Some(existing) = repo.find_by_email(&payload.email).await? {
            if payload.status == Some(MemberStatus::Requested) {
                info!(email = %payload.email, "Principal requested elevated access");
                repo.update_status(&payload.email, MemberStatus::Requested)
                    .await?;
                return repo
                    .find_by_email(&payload.email)
                    .await?
                    .ok_or_else(|| ApiError::NotFound(format!("Principal: {}", payload.email)));
            }
            // Known principal, nothing to change
            return Ok(existing);
        }

        let principal = Principal {
            id: Uuid::new_v4().to_string(),
            email: payload.email.clone(),
            role: creation_role(payload.role)?,
            status: payload.status.unwrap_or(MemberStatus::None),
            created_at: Utc::now(),
        };
        repo.insert(&principal).await?;
        info!(email = %principal.email, "Principal created");

        dispatch(
            self.notifier.clone(),
            principal.email.clone(),
            welcome_message(),
        );

        Ok(principal)
    }

    /// Assign a role to a principal (admin review action).
    ///
    /// The role string is parsed into the closed [`Role`] set before any
    /// write: absent or unknown values are rejected with a validation error
    /// and the stored role stays unchanged. A successful assignment always
    /// forces `status = verified`.
    pub async fn assign_role(
        &self,
        caller: Option<&Principal>,
        id: &str,
        role: Option<&str>,
    ) -> ApiResult<Principal> {
        authorize(caller, Some(Role::Admin))?;

        let role = parse_assigned_role(role)?;

        let repo = self.db.principals();
        repo.assign_role(id, role).await?;
        info!(%id, role = %role, "Role assigned");

        repo.find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Principal: {id}")))
    }

    /// List all principals (admin review queue).
    pub async fn list(&self, caller: Option<&Principal>) -> ApiResult<Vec<Principal>> {
        authorize(caller, Some(Role::Admin))?;
        Ok(self.db.principals().list_all().await?)
    }

    /// Look up one principal by email.
    ///
    /// The consumer uses this to resolve the caller's own role; a missing
    /// record is a normal answer, not an error.
    pub async fn find_by_email(&self, email: &str) -> ApiResult<Option<Principal>> {
        Ok(self.db.principals().find_by_email(email).await?)
    }
}

/// Resolves the role a brand-new principal record is created with.
///
/// `host` and `admin` only ever enter through an admin's
/// [`PrincipalService::assign_role`]; a creation payload claiming either
/// is rejected so a first upsert can never mint an elevated identity.
fn creation_role(requested: Option<Role>) -> Result<Role, ValidationError> {
    match requested {
        None | Some(Role::None) => Ok(Role::None),
        Some(Role::Guest) => Ok(Role::Guest),
        Some(Role::Host) | Some(Role::Admin) => Err(ValidationError::NotAllowed {
            field: "role".to_string(),
            allowed: vec!["none".to_string(), "guest".to_string()],
        }),
    }
}

fn welcome_message() -> EmailMessage {
    EmailMessage {
        subject: "Welcome to Haven".to_string(),
        html_body: "<h2>Welcome to Haven!</h2>\
                    <p>Your account is ready. Browse rooms and book your next stay.</p>"
            .to_string(),
    }
}
