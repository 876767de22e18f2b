//! Repository for the `domain_events` table.

use kennel_core::types::{DbId, Timestamp};
use sqlx::PgPool;

/// A domain event as stored. Mirrors the wire shape of the event bus
/// payload with the snapshots kept as JSONB.
#[derive(Debug, Clone)]
pub struct NewDomainEvent {
    pub event_id: DbId,
    pub project_id: DbId,
    pub entity: String,
    pub entity_id: String,
    pub event_name: String,
    pub action: String,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
    pub occurred_at: Timestamp,
}

/// Append-only writes to the event log.
pub struct EventRepo;

impl EventRepo {
    /// Insert an event row. Re-delivery of the same `event_id` is ignored.
    pub async fn insert(pool: &PgPool, event: &NewDomainEvent) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO domain_events \
                (event_id, project_id, entity, entity_id, event_name, action, before, after, occurred_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (event_id) DO NOTHING",
        )
        .bind(event.event_id)
        .bind(event.project_id)
        .bind(&event.entity)
        .bind(&event.entity_id)
        .bind(&event.event_name)
        .bind(&event.action)
        .bind(&event.before)
        .bind(&event.after)
        .bind(event.occurred_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
