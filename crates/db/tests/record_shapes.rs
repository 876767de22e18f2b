//! Every stored record shape survives a JSON round trip, both directly and
//! through the record cache. Cached reads depend on this: a field that does
//! not come back identically would make a cache hit differ from a store read.

use std::fmt::Debug;

use chrono::{NaiveDate, Utc};
use kennel_cache::RecordCache;
use kennel_core::actor::Actor;
use kennel_core::types::DbId;
use kennel_db::models::animal::Animal;
use kennel_db::models::animal_relationship::{AnimalRelationship, OWNERSHIP_CO_OWNER};
use kennel_db::models::api_key::ApiKey;
use kennel_db::models::contact::Contact;
use kennel_db::models::customer::Customer;
use kennel_db::models::document::Document;
use kennel_db::models::facility::Facility;
use kennel_db::models::group::Group;
use kennel_db::models::group_association::GroupAssociation;
use kennel_db::models::project::Project;
use kennel_db::models::resource::Resource;
use kennel_db::models::resource_type::ResourceType;
use kennel_db::models::service::Service;
use kennel_db::models::stock_ledger::StockLedger;
use kennel_db::models::translation::{ReferenceValueTranslation, SpeciesTranslation};
use kennel_db::models::AuditFields;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use sqlx::types::Json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Created by a key, updated and deleted by a service with detail.
fn deleted_audit() -> AuditFields {
    let now = Utc::now();
    AuditFields {
        created_by: Json(Actor::api_key(DbId::new_v4())),
        updated_by: Json(Actor::service("kennel-provision", Some("bootstrap"))),
        deleted_by: Some(Json(Actor::service("kennel-provision", None))),
        created_at: now,
        updated_at: now,
        deleted_at: Some(now),
    }
}

fn active_audit() -> AuditFields {
    let now = Utc::now();
    AuditFields {
        created_by: Json(Actor::service("importer", None)),
        updated_by: Json(Actor::api_key(DbId::new_v4())),
        deleted_by: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn metadata() -> serde_json::Value {
    json!({"chip": "276098106543210", "tags": ["vip", 3], "nested": {"ok": true, "n": null}})
}

/// Returns the record as it comes back from the cache after asserting the
/// serialized form is a fixed point.
async fn round_trip<T>(cache: &RecordCache, record: &T) -> T
where
    T: Serialize + DeserializeOwned + Debug,
{
    let wire = serde_json::to_value(record).unwrap();
    let decoded: T = serde_json::from_value(wire.clone()).unwrap();
    assert_eq!(serde_json::to_value(&decoded).unwrap(), wire, "{record:?}");

    let key = format!("shape/{}", std::any::type_name::<T>());
    cache.set(&key, record).await;
    let cached: T = cache
        .get(&key)
        .await
        .unwrap_or_else(|| panic!("cache miss for {key}"));
    assert_eq!(serde_json::to_value(&cached).unwrap(), wire, "{record:?}");
    cached
}

async fn assert_identical<T>(cache: &RecordCache, record: T)
where
    T: Serialize + DeserializeOwned + Debug + PartialEq,
{
    let cached = round_trip(cache, &record).await;
    assert_eq!(cached, record);
}

// ---------------------------------------------------------------------------
// Tenant entities
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tenant_entities_round_trip() {
    let cache = RecordCache::in_memory(None);
    let project_id = DbId::new_v4();

    assert_identical(
        &cache,
        Animal {
            id: DbId::new_v4(),
            project_id,
            name: "Rex".into(),
            species_id: Some(DbId::new_v4()),
            sex: Some("male".into()),
            date_of_birth: NaiveDate::from_ymd_opt(2019, 2, 28),
            metadata: Some(metadata()),
            audit: deleted_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        AnimalRelationship {
            id: DbId::new_v4(),
            project_id,
            animal_id: DbId::new_v4(),
            customer_id: DbId::new_v4(),
            ownership_type: OWNERSHIP_CO_OWNER.into(),
            metadata: Some(json!({"since": "2021-04-01"})),
            audit: active_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        Customer {
            id: DbId::new_v4(),
            project_id,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("ada@example.com".into()),
            phone: None,
            metadata: Some(metadata()),
            audit: active_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        Contact {
            id: DbId::new_v4(),
            project_id,
            customer_id: DbId::new_v4(),
            name: "Byron".into(),
            email: None,
            phone: Some("+44 20 7946 0000".into()),
            relation: Some("spouse".into()),
            audit: deleted_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        Facility {
            id: DbId::new_v4(),
            project_id,
            name: "North Barn".into(),
            address: Some("1 Kennel Lane".into()),
            timezone: Some("Europe/Berlin".into()),
            audit: active_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        Group {
            id: DbId::new_v4(),
            project_id,
            name: "Franchise North".into(),
            description: None,
            audit: active_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        GroupAssociation {
            id: DbId::new_v4(),
            project_id,
            group_id: DbId::new_v4(),
            merchant_id: "merchant-0042".into(),
            metadata: None,
            audit: deleted_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        ResourceType {
            id: DbId::new_v4(),
            project_id,
            name: "Suite".into(),
            description: Some("Heated, with run".into()),
            audit: active_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        Resource {
            id: DbId::new_v4(),
            project_id,
            resource_type_id: DbId::new_v4(),
            facility_id: Some(DbId::new_v4()),
            name: "Suite 7".into(),
            description: None,
            capacity: Some(2),
            audit: active_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        Service {
            id: DbId::new_v4(),
            project_id,
            name: "Boarding night".into(),
            description: None,
            duration_minutes: Some(1440),
            price_cents: Some(9_007_199_254_740_993),
            currency: Some("EUR".into()),
            audit: active_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        StockLedger {
            id: DbId::new_v4(),
            project_id,
            sku: "FOOD-10KG".into(),
            facility_id: None,
            quantity: -3,
            reason: Some("consumption".into()),
            reference: Some("INV-2026-0007".into()),
            audit: active_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        Document {
            id: DbId::new_v4(),
            project_id,
            name: "Boarding agreement".into(),
            template_id: Some("boarding-v2".into()),
            mime_type: Some("application/json".into()),
            content: Some(metadata()),
            audit: deleted_audit(),
        },
    )
    .await;
}

// ---------------------------------------------------------------------------
// Projects, keys and dictionaries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_key_round_trips_without_its_secret_hash() {
    let cache = RecordCache::in_memory(None);
    let key = ApiKey {
        id: DbId::new_v4(),
        project_id: DbId::new_v4(),
        secret_hash: "9f86d081884c7d65".into(),
        last4: "x9Qa".into(),
        audit: active_audit(),
    };

    let cached = round_trip(&cache, &key).await;
    assert!(serde_json::to_value(&key).unwrap().get("secretHash").is_none());
    assert!(cached.secret_hash.is_empty());
    assert_eq!(cached.last4, key.last4);
    assert_eq!(cached.audit, key.audit);
}

#[tokio::test]
async fn project_and_translations_round_trip() {
    let cache = RecordCache::in_memory(None);
    let now = Utc::now();

    assert_identical(
        &cache,
        Project {
            id: DbId::new_v4(),
            name: "Happy Paws".into(),
            audit: active_audit(),
        },
    )
    .await;

    assert_identical(
        &cache,
        SpeciesTranslation {
            id: DbId::new_v4(),
            species_id: DbId::new_v4(),
            locale: "de".into(),
            name: "Hund".into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        },
    )
    .await;

    assert_identical(
        &cache,
        ReferenceValueTranslation {
            id: DbId::new_v4(),
            reference_value_id: DbId::new_v4(),
            locale: "pt-BR".into(),
            name: "Macho".into(),
            created_at: now,
            updated_at: now,
            deleted_at: Some(now),
        },
    )
    .await;
}
