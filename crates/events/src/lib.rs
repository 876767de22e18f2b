//! Kennel domain events.
//!
//! - [`DomainEvent`]: the event envelope emitted after every successful
//!   create, update and delete.
//! - [`EventPublisher`]: the fire-and-forget capability services depend on.
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, with wildcard pattern subscriptions.
//! - [`EventPersistence`]: background task appending every event to the
//!   `domain_events` table.
//! - [`EventLogger`]: background task logging events at `debug`.

pub mod bus;
pub mod event;
pub mod logger;
pub mod pattern;
pub mod persistence;

pub use bus::{EventBus, EventPublisher, Subscription};
pub use event::{DomainEvent, EventAction};
pub use logger::EventLogger;
pub use pattern::EventPattern;
pub use persistence::EventPersistence;
