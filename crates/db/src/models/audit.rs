//! Audit columns shared by every tenant-scoped table.

use kennel_core::actor::Actor;
use kennel_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Who created/updated/deleted a row and when.
///
/// Flattened into each entity both for `FromRow` and for serde, so the
/// serialized record carries `createdBy`, `createdAt`, ... at top level.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFields {
    pub created_by: Json<Actor>,
    pub updated_by: Json<Actor>,
    pub deleted_by: Option<Json<Actor>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// `None` means the row is active.
    pub deleted_at: Option<Timestamp>,
}

/// Column list for [`AuditFields`], appended to each entity's own columns.
pub const AUDIT_COLUMNS: &str =
    "created_by, updated_by, deleted_by, created_at, updated_at, deleted_at";
