//! Cache-aside CRUD over one entity type.
//!
//! Persistence is authoritative. The cache only accelerates
//! [`EntityService::find_by_id`] and is refreshed after every successful
//! write; events are emitted strictly after the write committed.

use std::sync::Arc;

use kennel_cache::key::{entity_cache_key, entity_event_id};
use kennel_cache::RecordCache;
use kennel_core::actor::Actor;
use kennel_core::error::CoreError;
use kennel_core::pagination::{Page, PageRequest};
use kennel_core::types::DbId;
use kennel_db::store::EntityStore;
use kennel_db::{Criteria, Entity};
use kennel_events::{DomainEvent, EventAction, EventPublisher};
use serde::Serialize;

use crate::error::AppResult;

pub struct EntityService<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
    cache: RecordCache,
    events: Arc<dyn EventPublisher>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(
        store: Arc<dyn EntityStore<E>>,
        cache: RecordCache,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            cache,
            events,
        }
    }

    /// Read through the cache. `None` when no active record exists in the
    /// tenant.
    pub async fn find_by_id(&self, project_id: DbId, id: DbId) -> AppResult<Option<E>> {
        let key = entity_cache_key(project_id, E::KIND, id);
        if let Some(hit) = self.cache.get::<E>(&key).await {
            tracing::trace!(%key, "Cache hit");
            return Ok(Some(hit));
        }

        let Some(record) = self.store.find_by_id(project_id, id).await? else {
            return Ok(None);
        };
        self.cache.set(&key, &record).await;
        Ok(Some(record))
    }

    /// Page of active records matching `criteria`. Always hits persistence;
    /// the list and the total are fetched concurrently.
    pub async fn find_all(
        &self,
        project_id: DbId,
        criteria: &Criteria<E::Filter>,
        page: &PageRequest,
    ) -> AppResult<Page<E>> {
        let (data, total) = tokio::try_join!(
            self.store.list(project_id, criteria, page),
            self.store.count(project_id, criteria),
        )?;
        Ok(Page::new(data, total, page))
    }

    pub async fn create(
        &self,
        project_id: DbId,
        input: &E::Create,
        actor: &Actor,
    ) -> AppResult<E> {
        let record = self.store.create(project_id, input, actor).await?;
        let id = record.id();

        self.cache
            .set(&entity_cache_key(project_id, E::KIND, id), &record)
            .await;

        self.events.emit(
            self.event(project_id, id, EventAction::Create)
                .with_after(snapshot(&record)),
        );

        tracing::debug!(entity = %E::KIND, %id, "Created");
        Ok(record)
    }

    /// Merge `input` into the active record. The existence check goes to
    /// persistence, never to the cache.
    pub async fn update(
        &self,
        project_id: DbId,
        id: DbId,
        input: &E::Update,
        actor: &Actor,
    ) -> AppResult<E> {
        let before = self
            .store
            .find_by_id(project_id, id)
            .await?
            .ok_or_else(|| CoreError::not_found(E::KIND.name(), id))?;

        let after = self
            .store
            .update(project_id, id, input, actor)
            .await?
            .ok_or_else(|| CoreError::not_found(E::KIND.name(), id))?;

        self.cache
            .set(&entity_cache_key(project_id, E::KIND, id), &after)
            .await;

        self.events.emit(
            self.event(project_id, id, EventAction::Update)
                .with_before(snapshot(&before))
                .with_after(snapshot(&after)),
        );

        tracing::debug!(entity = %E::KIND, %id, "Updated");
        Ok(after)
    }

    /// Soft-delete the active record and return its post-delete state.
    pub async fn delete(&self, project_id: DbId, id: DbId, actor: &Actor) -> AppResult<E> {
        let before = self
            .store
            .find_by_id(project_id, id)
            .await?
            .ok_or_else(|| CoreError::not_found(E::KIND.name(), id))?;

        let after = self
            .store
            .soft_delete(project_id, id, actor)
            .await?
            .ok_or_else(|| CoreError::not_found(E::KIND.name(), id))?;

        self.cache
            .delete(&entity_cache_key(project_id, E::KIND, id))
            .await;

        self.events.emit(
            self.event(project_id, id, EventAction::Delete)
                .with_before(snapshot(&before))
                .with_after(snapshot(&after)),
        );

        tracing::debug!(entity = %E::KIND, %id, "Deleted");
        Ok(after)
    }

    fn event(&self, project_id: DbId, id: DbId, action: EventAction) -> DomainEvent {
        DomainEvent::new(
            project_id,
            E::KIND,
            entity_event_id(project_id, E::KIND, id),
            action,
        )
    }
}

fn snapshot<T: Serialize>(record: &T) -> Option<serde_json::Value> {
    match serde_json::to_value(record) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize event snapshot");
            None
        }
    }
}
