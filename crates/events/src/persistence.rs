//! Durable event persistence service.
//!
//! [`EventPersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and appends every received [`DomainEvent`] to the
//! `domain_events` table. It runs as a long-lived background task and shuts
//! down when the bus is dropped.

use kennel_db::repositories::{EventRepo, NewDomainEvent};
use kennel_db::DbPool;
use tokio::sync::broadcast;

use crate::event::DomainEvent;

/// Background service that persists domain events to the database.
pub struct EventPersistence;

impl EventPersistence {
    /// Run the persistence loop until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = EventRepo::insert(&pool, &to_row(&event)).await {
                        tracing::error!(
                            error = %e,
                            event_name = %event.event_name,
                            entity_id = %event.entity_id,
                            "Failed to persist event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Event persistence lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }
}

fn to_row(event: &DomainEvent) -> NewDomainEvent {
    NewDomainEvent {
        event_id: event.event_id,
        project_id: event.project_id,
        entity: event.entity.name().to_string(),
        entity_id: event.entity_id.clone(),
        event_name: event.event_name.clone(),
        action: event.action.as_str().to_string(),
        before: event.before.clone(),
        after: event.after.clone(),
        occurred_at: event.occurred_at,
    }
}

#[cfg(test)]
mod tests {
    use kennel_core::entity_kind::EntityKind;
    use kennel_core::types::DbId;
    use serde_json::json;

    use super::*;
    use crate::event::EventAction;

    #[test]
    fn row_carries_every_event_field() {
        let project = DbId::new_v4();
        let event = DomainEvent::new(project, EntityKind::Customer, "Project-p/Customer-c", EventAction::Update)
            .with_before(json!({"lastName": "Byron"}))
            .with_after(json!({"lastName": "Lovelace"}));

        let row = to_row(&event);
        assert_eq!(row.event_id, event.event_id);
        assert_eq!(row.project_id, project);
        assert_eq!(row.entity, "Customer");
        assert_eq!(row.entity_id, "Project-p/Customer-c");
        assert_eq!(row.event_name, "customer.updated");
        assert_eq!(row.action, "UPDATE");
        assert_eq!(row.before, Some(json!({"lastName": "Byron"})));
        assert_eq!(row.after, Some(json!({"lastName": "Lovelace"})));
    }
}
