//! API key model.
//!
//! Only the HMAC hash and the last four characters of a key are stored; the
//! plaintext is shown once at provisioning time.

use kennel_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::audit::AuditFields;

/// A row from the `api_keys` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: DbId,
    pub project_id: DbId,
    #[serde(skip_serializing, default)]
    pub secret_hash: String,
    pub last4: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl ApiKey {
    pub fn is_active(&self) -> bool {
        self.audit.deleted_at.is_none()
    }
}
