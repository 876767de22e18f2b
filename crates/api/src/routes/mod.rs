pub mod health;

use axum::routing::get;
use axum::Router;
use kennel_core::entity_kind::EntityKind;
use kennel_db::models::{
    animal::Animal,
    animal_relationship::AnimalRelationship,
    contact::Contact,
    customer::Customer,
    document::Document,
    facility::Facility,
    group::Group,
    group_association::GroupAssociation,
    resource::Resource,
    resource_type::ResourceType,
    service::Service,
    stock_ledger::StockLedger,
    translation::{ReferenceValueTranslation, SpeciesTranslation, Translation},
};
use kennel_db::Entity;

use crate::handlers::{animal, entity, translation};
use crate::services::{EntityServices, Services, TranslationServices};
use crate::state::AppState;

/// Tenant entities exposed over CRUD, in mount order.
pub const CRUD_ENTITIES: &[EntityKind] = &[
    EntityKind::Animal,
    EntityKind::AnimalRelationship,
    EntityKind::Customer,
    EntityKind::Contact,
    EntityKind::Facility,
    EntityKind::Group,
    EntityKind::GroupAssociation,
    EntityKind::ResourceType,
    EntityKind::Resource,
    EntityKind::Service,
    EntityKind::StockLedger,
    EntityKind::Document,
];

/// Dictionaries exposing read-only translations.
pub const TRANSLATED_DICTIONARIES: &[EntityKind] = &[EntityKind::Species, EntityKind::ReferenceValue];

/// URL prefix under `/api/v1` for an entity kind.
pub const fn prefix(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Project => "/projects",
        EntityKind::ApiKey => "/api-keys",
        EntityKind::Animal => "/animals",
        EntityKind::AnimalRelationship => "/animal-relationships",
        EntityKind::Customer => "/customers",
        EntityKind::Contact => "/contacts",
        EntityKind::Facility => "/facilities",
        EntityKind::Group => "/groups",
        EntityKind::GroupAssociation => "/group-associations",
        EntityKind::ResourceType => "/resource-types",
        EntityKind::Resource => "/resources",
        EntityKind::Service => "/services",
        EntityKind::StockLedger => "/stock-ledgers",
        EntityKind::Document => "/documents",
        EntityKind::Species => "/species",
        EntityKind::SpeciesTranslation => "/species-translations",
        EntityKind::ReferenceValue => "/reference-values",
        EntityKind::ReferenceValueTranslation => "/reference-value-translations",
    }
}

/// One mounted route, as listed by [`route_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: &'static str,
    /// Full path including `/api/v1`.
    pub path: String,
}

/// Every route [`api_routes`] mounts, plus `/health`.
///
/// ```text
/// GET    /health
///
/// per CRUD entity, at /api/v1/<prefix>:
/// GET    /                 -> list (paged, filtered)
/// POST   /                 -> create
/// GET    /search           -> search (501 without a provider)
/// GET    /{id}             -> get_by_id
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> delete (204)
///
/// per dictionary, at /api/v1/<prefix>/{parent_id}/translations:
/// GET    /                 -> list
/// GET    /{locale}         -> get_by_locale
/// ```
pub fn route_table() -> Vec<RouteEntry> {
    let mut table = vec![RouteEntry {
        method: "GET",
        path: "/health".to_string(),
    }];

    for kind in CRUD_ENTITIES {
        let base = format!("/api/v1{}", prefix(*kind));
        for (method, suffix) in [
            ("GET", ""),
            ("POST", ""),
            ("GET", "/search"),
            ("GET", "/{id}"),
            ("PATCH", "/{id}"),
            ("DELETE", "/{id}"),
        ] {
            table.push(RouteEntry {
                method,
                path: format!("{base}{suffix}"),
            });
        }
    }

    for kind in TRANSLATED_DICTIONARIES {
        let base = format!("/api/v1{}/{{parent_id}}/translations", prefix(*kind));
        table.push(RouteEntry {
            method: "GET",
            path: base.clone(),
        });
        table.push(RouteEntry {
            method: "GET",
            path: format!("{base}/{{locale}}"),
        });
    }

    table
}

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    let animals = Router::new()
        .route("/", get(entity::list::<Animal>).post(animal::create))
        .merge(item_routes::<Animal>());

    Router::new()
        .nest(prefix(Animal::KIND), animals)
        .nest(prefix(AnimalRelationship::KIND), entity_routes::<AnimalRelationship>())
        .nest(prefix(Customer::KIND), entity_routes::<Customer>())
        .nest(prefix(Contact::KIND), entity_routes::<Contact>())
        .nest(prefix(Facility::KIND), entity_routes::<Facility>())
        .nest(prefix(Group::KIND), entity_routes::<Group>())
        .nest(prefix(GroupAssociation::KIND), entity_routes::<GroupAssociation>())
        .nest(prefix(ResourceType::KIND), entity_routes::<ResourceType>())
        .nest(prefix(Resource::KIND), entity_routes::<Resource>())
        .nest(prefix(Service::KIND), entity_routes::<Service>())
        .nest(prefix(StockLedger::KIND), entity_routes::<StockLedger>())
        .nest(prefix(Document::KIND), entity_routes::<Document>())
        .nest(
            prefix(SpeciesTranslation::PARENT_KIND),
            translation_routes::<SpeciesTranslation>(),
        )
        .nest(
            prefix(ReferenceValueTranslation::PARENT_KIND),
            translation_routes::<ReferenceValueTranslation>(),
        )
}

fn entity_routes<E>() -> Router<AppState>
where
    E: Entity,
    Services: EntityServices<E>,
{
    Router::new()
        .route("/", get(entity::list::<E>).post(entity::create::<E>))
        .merge(item_routes::<E>())
}

/// Everything but `/`, shared with entities that customize collection routes.
fn item_routes<E>() -> Router<AppState>
where
    E: Entity,
    Services: EntityServices<E>,
{
    Router::new()
        .route("/search", get(entity::search::<E>))
        .route(
            "/{id}",
            get(entity::get_by_id::<E>)
                .patch(entity::update::<E>)
                .delete(entity::delete::<E>),
        )
}

fn translation_routes<T>() -> Router<AppState>
where
    T: Translation,
    Services: TranslationServices<T>,
{
    Router::new()
        .route("/{parent_id}/translations", get(translation::list::<T>))
        .route(
            "/{parent_id}/translations/{locale}",
            get(translation::get_by_locale::<T>),
        )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_crud_entity_has_six_routes() {
        let table = route_table();
        assert_eq!(table.len(), 1 + CRUD_ENTITIES.len() * 6 + TRANSLATED_DICTIONARIES.len() * 2);

        let unique: HashSet<_> = table.iter().map(|r| (r.method, r.path.as_str())).collect();
        assert_eq!(unique.len(), table.len());
    }

    #[test]
    fn prefixes_are_distinct() {
        let prefixes: HashSet<_> = CRUD_ENTITIES
            .iter()
            .chain(TRANSLATED_DICTIONARIES)
            .map(|k| prefix(*k))
            .collect();
        assert_eq!(prefixes.len(), CRUD_ENTITIES.len() + TRANSLATED_DICTIONARIES.len());
    }

    #[test]
    fn table_lists_nested_entity_paths() {
        let table = route_table();
        assert!(table.contains(&RouteEntry {
            method: "DELETE",
            path: "/api/v1/group-associations/{id}".into(),
        }));
        assert!(table.contains(&RouteEntry {
            method: "GET",
            path: "/api/v1/reference-values/{parent_id}/translations/{locale}".into(),
        }));
    }
}
