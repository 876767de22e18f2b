//! Request extractors.
//!
//! - [`auth::AuthContext`] -- Resolves the tenant and actor from a `Bearer` API key.

pub mod auth;
