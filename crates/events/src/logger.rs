//! Debug logging of domain events through a pattern subscription.

use tokio::sync::broadcast;

use crate::bus::Subscription;

pub struct EventLogger;

impl EventLogger {
    /// Log every event delivered to `subscription` until the bus closes.
    pub async fn run(mut subscription: Subscription) {
        loop {
            match subscription.recv().await {
                Ok(event) => {
                    tracing::debug!(
                        event_name = %event.event_name,
                        entity_id = %event.entity_id,
                        project_id = %event.project_id,
                        "Domain event"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
