//! The domain event envelope.

use chrono::Utc;
use kennel_core::entity_kind::EntityKind;
use kennel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventAction {
    Create,
    Update,
    Delete,
}

impl EventAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// Past-tense verb appended to the entity's event namespace.
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// A change to one entity, carrying the state before and after it.
///
/// `before` is absent on create; `after` on delete holds the soft-deleted
/// record (with `deletedAt` set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    pub event_id: DbId,
    pub project_id: DbId,
    pub entity: EntityKind,
    /// `Project-<p>/<Kind>-<id>`.
    pub entity_id: String,
    /// Namespaced name, e.g. `resource.type.created`.
    pub event_name: String,
    pub action: EventAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
    pub occurred_at: Timestamp,
}

impl DomainEvent {
    /// Create an event without snapshots; attach them with
    /// [`with_before`](Self::with_before) and [`with_after`](Self::with_after).
    pub fn new(
        project_id: DbId,
        entity: EntityKind,
        entity_id: impl Into<String>,
        action: EventAction,
    ) -> Self {
        Self {
            event_id: DbId::new_v4(),
            project_id,
            entity,
            entity_id: entity_id.into(),
            event_name: Self::name_for(entity, action),
            action,
            before: None,
            after: None,
            occurred_at: Utc::now(),
        }
    }

    /// Accepts a bare value or an `Option`, so a failed snapshot leaves the
    /// field empty.
    pub fn with_before(mut self, before: impl Into<Option<serde_json::Value>>) -> Self {
        self.before = before.into();
        self
    }

    pub fn with_after(mut self, after: impl Into<Option<serde_json::Value>>) -> Self {
        self.after = after.into();
        self
    }

    /// `<namespace>.<verb>`, e.g. `organization.group.association.deleted`.
    pub fn name_for(entity: EntityKind, action: EventAction) -> String {
        format!("{}.{}", entity.event_namespace(), action.verb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_names_follow_namespace() {
        assert_eq!(
            DomainEvent::name_for(EntityKind::ResourceType, EventAction::Create),
            "resource.type.created"
        );
        assert_eq!(
            DomainEvent::name_for(EntityKind::StockLedger, EventAction::Delete),
            "inventory.stock_ledger.deleted"
        );
    }

    #[test]
    fn create_event_omits_before_on_the_wire() {
        let event = DomainEvent::new(DbId::nil(), EntityKind::Animal, "x", EventAction::Create)
            .with_after(json!({"name": "Rex"}));
        let wire = serde_json::to_value(&event).unwrap();

        assert_eq!(wire["action"], "CREATE");
        assert_eq!(wire["entity"], "animal");
        assert_eq!(wire["eventName"], "animal.created");
        assert!(wire.get("before").is_none());
        assert_eq!(wire["after"]["name"], "Rex");
    }

    #[test]
    fn missing_snapshot_leaves_field_empty() {
        let event = DomainEvent::new(DbId::nil(), EntityKind::Animal, "x", EventAction::Update)
            .with_before(None)
            .with_after(Some(json!({"name": "Max"})));

        assert!(event.before.is_none());
        assert_eq!(event.after, Some(json!({"name": "Max"})));
    }
}
