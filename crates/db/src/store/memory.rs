//! In-memory implementations of the storage seams.
//!
//! Rows are held as their serialized JSON documents, which is the same shape
//! the cache and the HTTP layer see. Used when no database is configured and
//! by the test suites.

use std::cmp::Ordering;
use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use kennel_core::actor::Actor;
use kennel_core::pagination::{PageRequest, SortOrder};
use kennel_core::types::{DbId, Timestamp};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;
use tokio::sync::RwLock;

use crate::entity::{Criteria, Entity};
use crate::models::api_key::ApiKey;
use crate::models::audit::AuditFields;
use crate::models::translation::{Translation, TranslationCriteria};
use crate::store::{ApiKeyStore, EntityStore, TranslationStore};

fn decode_err(e: serde_json::Error) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(e))
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, sqlx::Error> {
    match serde_json::to_value(value).map_err(decode_err)? {
        Value::Object(map) => Ok(map),
        other => Err(sqlx::Error::Protocol(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

fn json<T: Serialize>(value: T) -> Result<Value, sqlx::Error> {
    serde_json::to_value(value).map_err(decode_err)
}

fn timestamp_field(doc: &Value, field: &str) -> Option<Timestamp> {
    doc.get(field)
        .and_then(|v| serde_json::from_value::<Timestamp>(v.clone()).ok())
}

fn is_active(doc: &Value) -> bool {
    doc.get("deletedAt").map_or(true, Value::is_null)
}

fn is_row(doc: &Value, project_id: DbId, id: DbId) -> bool {
    doc.get("id") == Some(&Value::String(id.to_string()))
        && doc.get("projectId") == Some(&Value::String(project_id.to_string()))
}

/// [`EntityStore`] over an in-process vector of JSON documents.
pub struct MemoryStore<E> {
    rows: RwLock<Vec<Value>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, soft-deleted ones included.
    pub async fn len_including_deleted(&self) -> usize {
        self.rows.read().await.len()
    }

    fn matches(
        doc: &Value,
        project_id: DbId,
        criteria: &Criteria<E::Filter>,
        filters: &Map<String, Value>,
    ) -> bool {
        if !is_active(doc)
            || doc.get("projectId") != Some(&Value::String(project_id.to_string()))
        {
            return false;
        }
        let fields_match = filters
            .iter()
            .filter(|(_, v)| !v.is_null())
            .all(|(k, v)| doc.get(k) == Some(v));
        if !fields_match {
            return false;
        }
        let created_at = timestamp_field(doc, "createdAt");
        if let Some(after) = criteria.created_after {
            if !created_at.is_some_and(|c| c > after) {
                return false;
            }
        }
        if let Some(before) = criteria.created_before {
            if !created_at.is_some_and(|c| c < before) {
                return false;
            }
        }
        true
    }

    fn compare(a: &Value, b: &Value, order: SortOrder) -> Ordering {
        let field = E::SORT_KEY.field();
        let primary = match (timestamp_field(a, field), timestamp_field(b, field)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => {
                let x = a.get(field).and_then(Value::as_str).unwrap_or_default();
                let y = b.get(field).and_then(Value::as_str).unwrap_or_default();
                x.cmp(y)
            }
        };
        let ordering = primary.then_with(|| {
            let x = a.get("id").and_then(Value::as_str).unwrap_or_default();
            let y = b.get("id").and_then(Value::as_str).unwrap_or_default();
            x.cmp(y)
        });
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn find_by_id(&self, project_id: DbId, id: DbId) -> Result<Option<E>, sqlx::Error> {
        let rows = self.rows.read().await;
        rows.iter()
            .find(|doc| is_row(doc, project_id, id) && is_active(doc))
            .map(|doc| serde_json::from_value(doc.clone()).map_err(decode_err))
            .transpose()
    }

    async fn list(
        &self,
        project_id: DbId,
        criteria: &Criteria<E::Filter>,
        page: &PageRequest,
    ) -> Result<Vec<E>, sqlx::Error> {
        let filters = to_object(&criteria.fields)?;
        let rows = self.rows.read().await;
        let mut matched: Vec<&Value> = rows
            .iter()
            .filter(|doc| Self::matches(doc, project_id, criteria, &filters))
            .collect();
        matched.sort_by(|a, b| Self::compare(a, b, page.order));
        matched
            .into_iter()
            .skip(page.offset.max(0) as usize)
            .take(page.limit.max(0) as usize)
            .map(|doc| serde_json::from_value(doc.clone()).map_err(decode_err))
            .collect()
    }

    async fn count(
        &self,
        project_id: DbId,
        criteria: &Criteria<E::Filter>,
    ) -> Result<i64, sqlx::Error> {
        let filters = to_object(&criteria.fields)?;
        let rows = self.rows.read().await;
        let total = rows
            .iter()
            .filter(|doc| Self::matches(doc, project_id, criteria, &filters))
            .count();
        Ok(total as i64)
    }

    async fn create(
        &self,
        project_id: DbId,
        input: &E::Create,
        actor: &Actor,
    ) -> Result<E, sqlx::Error> {
        let now = Utc::now();
        let mut doc = to_object(input)?;
        doc.insert("id".into(), json(DbId::now_v7())?);
        doc.insert("projectId".into(), json(project_id)?);
        doc.insert("createdBy".into(), json(actor)?);
        doc.insert("updatedBy".into(), json(actor)?);
        doc.insert("deletedBy".into(), Value::Null);
        doc.insert("createdAt".into(), json(now)?);
        doc.insert("updatedAt".into(), json(now)?);
        doc.insert("deletedAt".into(), Value::Null);

        let entity: E = serde_json::from_value(Value::Object(doc)).map_err(decode_err)?;
        let canonical = json(&entity)?;
        self.rows.write().await.push(canonical);
        Ok(entity)
    }

    async fn update(
        &self,
        project_id: DbId,
        id: DbId,
        input: &E::Update,
        actor: &Actor,
    ) -> Result<Option<E>, sqlx::Error> {
        let patch = to_object(input)?;
        let mut rows = self.rows.write().await;
        let Some(doc) = rows
            .iter_mut()
            .find(|doc| is_row(doc, project_id, id) && is_active(doc))
        else {
            return Ok(None);
        };

        let mut merged = doc.clone();
        if let Value::Object(map) = &mut merged {
            for (k, v) in patch.into_iter().filter(|(_, v)| !v.is_null()) {
                map.insert(k, v);
            }
            map.insert("updatedBy".into(), json(actor)?);
            map.insert("updatedAt".into(), json(Utc::now())?);
        }

        let entity: E = serde_json::from_value(merged).map_err(decode_err)?;
        *doc = json(&entity)?;
        Ok(Some(entity))
    }

    async fn soft_delete(
        &self,
        project_id: DbId,
        id: DbId,
        actor: &Actor,
    ) -> Result<Option<E>, sqlx::Error> {
        let mut rows = self.rows.write().await;
        let Some(doc) = rows
            .iter_mut()
            .find(|doc| is_row(doc, project_id, id) && is_active(doc))
        else {
            return Ok(None);
        };

        let now = json(Utc::now())?;
        let mut deleted = doc.clone();
        if let Value::Object(map) = &mut deleted {
            map.insert("deletedAt".into(), now.clone());
            map.insert("deletedBy".into(), json(actor)?);
            map.insert("updatedAt".into(), now);
        }

        let entity: E = serde_json::from_value(deleted).map_err(decode_err)?;
        *doc = json(&entity)?;
        Ok(Some(entity))
    }
}

// ---------------------------------------------------------------------------
// API keys
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryApiKeyStore {
    keys: RwLock<Vec<ApiKey>>,
}

impl MemoryApiKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Soft-delete a key, revoking it.
    pub async fn revoke(&self, id: DbId, actor: &Actor) -> bool {
        let mut keys = self.keys.write().await;
        match keys.iter_mut().find(|k| k.id == id && k.is_active()) {
            Some(key) => {
                let now = Utc::now();
                key.audit.deleted_at = Some(now);
                key.audit.deleted_by = Some(Json(actor.clone()));
                key.audit.updated_at = now;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ApiKeyStore for MemoryApiKeyStore {
    async fn find_active_by_hash(&self, secret_hash: &str) -> Result<Option<ApiKey>, sqlx::Error> {
        let keys = self.keys.read().await;
        Ok(keys
            .iter()
            .find(|k| k.secret_hash == secret_hash && k.is_active())
            .cloned())
    }

    async fn create(
        &self,
        project_id: DbId,
        secret_hash: &str,
        last4: &str,
        actor: &Actor,
    ) -> Result<ApiKey, sqlx::Error> {
        let now = Utc::now();
        let key = ApiKey {
            id: DbId::now_v7(),
            project_id,
            secret_hash: secret_hash.to_string(),
            last4: last4.to_string(),
            audit: AuditFields {
                created_by: Json(actor.clone()),
                updated_by: Json(actor.clone()),
                deleted_by: None,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
        };
        self.keys.write().await.push(key.clone());
        Ok(key)
    }
}

// ---------------------------------------------------------------------------
// Translations
// ---------------------------------------------------------------------------

/// [`TranslationStore`] over an in-process vector. Seed it with
/// [`MemoryTranslationStore::insert`].
pub struct MemoryTranslationStore<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for MemoryTranslationStore<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Translation> MemoryTranslationStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, row: T) {
        self.rows.write().await.push(row);
    }

    fn matches(row: &T, criteria: &TranslationCriteria) -> bool {
        row.deleted_at().is_none()
            && criteria.parent_id.map_or(true, |p| row.parent_id() == p)
            && criteria
                .locale
                .as_deref()
                .map_or(true, |l| row.locale() == l)
    }
}

#[async_trait]
impl<T: Translation> TranslationStore<T> for MemoryTranslationStore<T> {
    async fn find_by_locale(
        &self,
        parent_id: DbId,
        locale: &str,
    ) -> Result<Option<T>, sqlx::Error> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|r| r.parent_id() == parent_id && r.locale() == locale && r.deleted_at().is_none())
            .cloned())
    }

    async fn list(
        &self,
        criteria: &TranslationCriteria,
        page: &PageRequest,
    ) -> Result<Vec<T>, sqlx::Error> {
        let rows = self.rows.read().await;
        let mut matched: Vec<&T> = rows.iter().filter(|r| Self::matches(r, criteria)).collect();
        matched.sort_by(|a, b| {
            let ordering = a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id()));
            match page.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        Ok(matched
            .into_iter()
            .skip(page.offset.max(0) as usize)
            .take(page.limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, criteria: &TranslationCriteria) -> Result<i64, sqlx::Error> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|r| Self::matches(r, criteria)).count() as i64)
    }
}
