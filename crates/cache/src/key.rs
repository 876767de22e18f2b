//! Cache key derivation.
//!
//! Keys are pure functions of their inputs so they are stable across
//! restarts and identical on every node sharing a backend.

use kennel_core::entity_kind::EntityKind;
use kennel_core::types::DbId;

/// Entity identifier used in domain events: `Project-<p>/<Kind>-<id>`.
pub fn entity_event_id(project_id: DbId, kind: EntityKind, id: DbId) -> String {
    format!("Project-{project_id}/{}-{id}", kind.name())
}

/// Cache key for a tenant-scoped record: `Project-<p>/<Kind>-<id>/ID`.
pub fn entity_cache_key(project_id: DbId, kind: EntityKind, id: DbId) -> String {
    format!("{}/ID", entity_event_id(project_id, kind, id))
}

/// Cache key for a locale-keyed translation:
/// `<ParentKind>-<parentId>/<Kind>-<locale>/Locale`.
pub fn locale_cache_key(
    parent_kind: EntityKind,
    parent_id: DbId,
    kind: EntityKind,
    locale: &str,
) -> String {
    format!(
        "{}-{parent_id}/{}-{locale}/Locale",
        parent_kind.name(),
        kind.name()
    )
}

/// Cache key for an API key looked up by secret hash.
pub fn api_key_cache_key(secret_hash: &str) -> String {
    format!("{}-{secret_hash}/Hash", EntityKind::ApiKey.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> DbId {
        s.parse().unwrap()
    }

    #[test]
    fn entity_key_format() {
        let p = id("00000000-0000-0000-0000-000000000001");
        let r = id("00000000-0000-0000-0000-0000000000aa");
        assert_eq!(
            entity_cache_key(p, EntityKind::ResourceType, r),
            "Project-00000000-0000-0000-0000-000000000001/\
             ResourceType-00000000-0000-0000-0000-0000000000aa/ID"
        );
        assert_eq!(
            entity_event_id(p, EntityKind::ResourceType, r),
            "Project-00000000-0000-0000-0000-000000000001/\
             ResourceType-00000000-0000-0000-0000-0000000000aa"
        );
    }

    #[test]
    fn locale_key_format() {
        let s = id("00000000-0000-0000-0000-000000000007");
        assert_eq!(
            locale_cache_key(EntityKind::Species, s, EntityKind::SpeciesTranslation, "pt-BR"),
            "Species-00000000-0000-0000-0000-000000000007/SpeciesTranslation-pt-BR/Locale"
        );
    }

    #[test]
    fn keys_differ_across_tenants() {
        let r = DbId::nil();
        let a = entity_cache_key(id("00000000-0000-0000-0000-000000000001"), EntityKind::Animal, r);
        let b = entity_cache_key(id("00000000-0000-0000-0000-000000000002"), EntityKind::Animal, r);
        assert_ne!(a, b);
    }

    #[test]
    fn api_key_key_format() {
        assert_eq!(api_key_cache_key("abc"), "ApiKey-abc/Hash");
    }
}
