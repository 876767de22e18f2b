//! Kennel API server library.
//!
//! Exposes the building blocks (config, state, services, error handling,
//! routes) so integration tests, the server binary and the provisioning
//! binary all share them.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod search;
pub mod services;
pub mod state;
