//! Generated or uploaded document model and DTOs.

use kennel_core::entity_kind::EntityKind;
use kennel_core::error::CoreError;
use kennel_core::types::{DbId, Timestamp};
use kennel_core::validation::{validate_optional_text, validate_required_text, MAX_NAME_LENGTH};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, SortKey};
use crate::models::audit::AuditFields;

/// A row from the `documents` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    /// Template the document was rendered from, if any.
    pub template_id: Option<String>,
    pub mime_type: Option<String>,
    pub content: Option<serde_json::Value>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    pub name: String,
    pub template_id: Option<String>,
    pub mime_type: Option<String>,
    pub content: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocument {
    pub name: Option<String>,
    pub mime_type: Option<String>,
    pub content: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFilter {
    pub template_id: Option<String>,
    pub mime_type: Option<String>,
}

fn validate_mime_type(mime: Option<&str>) -> Result<(), CoreError> {
    match mime {
        Some(m) if m.split('/').filter(|part| !part.is_empty()).count() != 2 => Err(
            CoreError::Validation(format!("mimeType '{m}' must look like 'type/subtype'")),
        ),
        _ => Ok(()),
    }
}

impl Entity for Document {
    const KIND: EntityKind = EntityKind::Document;
    const SORT_KEY: SortKey = SortKey::CreatedAt;

    type Create = CreateDocument;
    type Update = UpdateDocument;
    type Filter = DocumentFilter;

    fn id(&self) -> DbId {
        self.id
    }

    fn project_id(&self) -> DbId {
        self.project_id
    }

    fn deleted_at(&self) -> Option<Timestamp> {
        self.audit.deleted_at
    }

    fn validate_create(input: &CreateDocument) -> Result<(), CoreError> {
        validate_required_text("name", &input.name, MAX_NAME_LENGTH)?;
        validate_optional_text("templateId", input.template_id.as_deref(), MAX_NAME_LENGTH)?;
        validate_mime_type(input.mime_type.as_deref())
    }

    fn validate_update(input: &UpdateDocument) -> Result<(), CoreError> {
        validate_optional_text("name", input.name.as_deref(), MAX_NAME_LENGTH)?;
        validate_mime_type(input.mime_type.as_deref())
    }
}
