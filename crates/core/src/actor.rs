//! Actor descriptors stamped on every mutation (`createdBy`, `updatedBy`,
//! `deletedBy`).

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Who performed a mutation.
///
/// Serialized untagged so the stored JSON matches the two shapes clients
/// already know:
///
/// ```json
/// { "apiKey": "0191c3c2-..." }
/// { "service": "kennel-provision", "serviceDetail": "bootstrap" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Actor {
    /// An external caller authenticated with an API key.
    ApiKey {
        #[serde(rename = "apiKey")]
        api_key: DbId,
    },
    /// An internal service (provisioning, background jobs).
    Service {
        service: String,
        #[serde(
            rename = "serviceDetail",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        service_detail: Option<String>,
    },
}

impl Actor {
    pub fn api_key(id: DbId) -> Self {
        Self::ApiKey { api_key: id }
    }

    pub fn service(name: impl Into<String>, detail: Option<&str>) -> Self {
        Self::Service {
            service: name.into(),
            service_detail: detail.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_key_actor_uses_camel_case_field() {
        let id = DbId::nil();
        let value = serde_json::to_value(Actor::api_key(id)).unwrap();
        assert_eq!(value, json!({ "apiKey": id }));
    }

    #[test]
    fn service_actor_omits_missing_detail() {
        let value = serde_json::to_value(Actor::service("seed", None)).unwrap();
        assert_eq!(value, json!({ "service": "seed" }));
    }

    #[test]
    fn both_shapes_deserialize() {
        let key: Actor = serde_json::from_value(json!({ "apiKey": DbId::nil() })).unwrap();
        assert_eq!(key, Actor::api_key(DbId::nil()));

        let svc: Actor =
            serde_json::from_value(json!({ "service": "importer", "serviceDetail": "seed" }))
                .unwrap();
        assert_eq!(svc, Actor::service("importer", Some("seed")));
    }
}
