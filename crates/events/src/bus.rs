//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`DomainEvent`]s.
//! Services only see it through the [`EventPublisher`] capability.

use tokio::sync::broadcast;

use crate::event::DomainEvent;
use crate::pattern::EventPattern;

/// Fire-and-forget event emission.
///
/// Emission never fails from the caller's point of view and never rolls
/// back the persistence operation that preceded it.
pub trait EventPublisher: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// When the buffer is full the oldest unconsumed events are dropped and slow
/// receivers observe `RecvError::Lagged`.
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to every event published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Subscribe to events whose name matches `pattern` (see
    /// [`EventPattern`]).
    pub fn subscribe_to(&self, pattern: &str) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            pattern: EventPattern::new(pattern),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventPublisher for EventBus {
    fn emit(&self, event: DomainEvent) {
        tracing::trace!(event_name = %event.event_name, entity_id = %event.entity_id, "Emitting event");
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }
}

/// A receiver that yields only events matching its pattern.
pub struct Subscription {
    receiver: broadcast::Receiver<DomainEvent>,
    pattern: EventPattern,
}

impl Subscription {
    /// Wait for the next matching event.
    pub async fn recv(&mut self) -> Result<DomainEvent, broadcast::error::RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.pattern.matches(&event.event_name) {
                return Ok(event);
            }
        }
    }

    /// Next already-buffered matching event, without waiting.
    pub fn try_recv(&mut self) -> Result<DomainEvent, broadcast::error::TryRecvError> {
        loop {
            let event = self.receiver.try_recv()?;
            if self.pattern.matches(&event.event_name) {
                return Ok(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kennel_core::entity_kind::EntityKind;
    use kennel_core::types::DbId;

    use super::*;
    use crate::event::EventAction;

    fn event(kind: EntityKind, action: EventAction) -> DomainEvent {
        DomainEvent::new(DbId::nil(), kind, "Project-x/Kind-y", action)
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(event(EntityKind::Animal, EventAction::Create));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.event_name, "animal.created");
        assert_eq!(e1, e2);
    }

    #[test]
    fn emit_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.emit(event(EntityKind::Document, EventAction::Delete));
    }

    #[tokio::test]
    async fn pattern_subscription_skips_other_events() {
        let bus = EventBus::default();
        let mut deletes = bus.subscribe_to("**.deleted");

        bus.emit(event(EntityKind::Animal, EventAction::Create));
        bus.emit(event(EntityKind::ResourceType, EventAction::Delete));

        let received = deletes.recv().await.unwrap();
        assert_eq!(received.event_name, "resource.type.deleted");
        assert!(deletes.try_recv().is_err());
    }
}
