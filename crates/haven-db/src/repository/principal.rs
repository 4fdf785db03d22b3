//! # Principal Repository
//!
//! Database operations for principals (identity records).
//!
//! ## Operations Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Principal Repository Operations                      │
//! │                                                                         │
//! │  WRITE                            READ                                  │
//! │  ─────                            ────                                  │
//! │  insert(principal)                find_by_email(email)                  │
//! │  update_status(email, status)     find_by_id(id)                        │
//! │  assign_role(id, role)            list_all()                            │
//! │                                   count()                               │
//! │                                                                         │
//! │  Principals are created on first interaction and never deleted.        │
//! │  The email column is the business key; id is the storage key.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use haven_core::{MemberStatus, Principal, Role};

use crate::error::{DbError, DbResult};

/// Repository for principal persistence operations.
#[derive(Debug, Clone)]
pub struct PrincipalRepository {
    pool: SqlitePool,
}

impl PrincipalRepository {
    /// Creates a new principal repository with the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        PrincipalRepository { pool }
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Inserts a new principal record.
    ///
    /// Fails with `UniqueViolation` if the email already exists; callers
    /// doing upsert-on-write check `find_by_email` first.
    pub async fn insert(&self, principal: &Principal) -> DbResult<()> {
        debug!(email = %principal.email, "Inserting principal");

        sqlx::query(
            r#"
            INSERT INTO principals (id, email, role, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&principal.id)
        .bind(&principal.email)
        .bind(principal.role)
        .bind(principal.status)
        .bind(principal.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates only the status of an existing principal, keyed by email.
    ///
    /// Used when a known principal re-requests elevated access; role and
    /// created_at are untouched.
    pub async fn update_status(&self, email: &str, status: MemberStatus) -> DbResult<()> {
        debug!(%email, status = %status.as_str(), "Updating principal status");

        let result = sqlx::query("UPDATE principals SET status = ? WHERE email = ?")
            .bind(status)
            .bind(email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Principal", email));
        }

        Ok(())
    }

    /// Assigns a role to a principal by id, forcing status to Verified.
    ///
    /// This is the admin review action: whatever the principal requested,
    /// an assigned role always lands with verified status.
    pub async fn assign_role(&self, id: &str, role: Role) -> DbResult<()> {
        debug!(%id, role = %role.as_str(), "Assigning principal role");

        let result = sqlx::query("UPDATE principals SET role = ?, status = ? WHERE id = ?")
            .bind(role)
            .bind(MemberStatus::Verified)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Principal", id));
        }

        Ok(())
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Finds a principal by email. Returns None if not found.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Principal>> {
        let principal = sqlx::query_as::<_, Principal>(
            "SELECT id, email, role, status, created_at FROM principals WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(principal)
    }

    /// Finds a principal by id. Returns None if not found.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Principal>> {
        let principal = sqlx::query_as::<_, Principal>(
            "SELECT id, email, role, status, created_at FROM principals WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(principal)
    }

    /// Lists all principals, newest first.
    ///
    /// Admin-only surface; the caller enforces the role gate.
    pub async fn list_all(&self) -> DbResult<Vec<Principal>> {
        let principals = sqlx::query_as::<_, Principal>(
            "SELECT id, email, role, status, created_at FROM principals ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(principals)
    }

    /// Counts all principals. Feeds the admin statistics snapshot.
    pub async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM principals")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
