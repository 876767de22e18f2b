//! Project (tenant) model.

use kennel_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::audit::AuditFields;

/// A row from the `projects` table. Every tenant-scoped row references one.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}
