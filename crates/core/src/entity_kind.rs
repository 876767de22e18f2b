//! The closed set of entity kinds handled by the platform.
//!
//! A kind carries the naming conventions every other layer derives from it:
//! the display name used in cache keys and derived entity ids, the
//! dot-separated event namespace, and the search index name.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    ApiKey,
    Animal,
    AnimalRelationship,
    Customer,
    Contact,
    Facility,
    Group,
    GroupAssociation,
    ResourceType,
    Resource,
    Service,
    StockLedger,
    Document,
    Species,
    SpeciesTranslation,
    ReferenceValue,
    ReferenceValueTranslation,
}

impl EntityKind {
    /// PascalCase name used in cache keys, derived entity ids and
    /// `NotFound` messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::ApiKey => "ApiKey",
            Self::Animal => "Animal",
            Self::AnimalRelationship => "AnimalRelationship",
            Self::Customer => "Customer",
            Self::Contact => "Contact",
            Self::Facility => "Facility",
            Self::Group => "Group",
            Self::GroupAssociation => "GroupAssociation",
            Self::ResourceType => "ResourceType",
            Self::Resource => "Resource",
            Self::Service => "Service",
            Self::StockLedger => "StockLedger",
            Self::Document => "Document",
            Self::Species => "Species",
            Self::SpeciesTranslation => "SpeciesTranslation",
            Self::ReferenceValue => "ReferenceValue",
            Self::ReferenceValueTranslation => "ReferenceValueTranslation",
        }
    }

    /// Dot-separated event namespace; event names append the action verb
    /// (`resource.type` + `created` -> `resource.type.created`).
    pub const fn event_namespace(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::ApiKey => "project.api_key",
            Self::Animal => "animal",
            Self::AnimalRelationship => "animal.relationship",
            Self::Customer => "customer",
            Self::Contact => "customer.contact",
            Self::Facility => "organization.facility",
            Self::Group => "organization.group",
            Self::GroupAssociation => "organization.group.association",
            Self::ResourceType => "resource.type",
            Self::Resource => "resource",
            Self::Service => "service",
            Self::StockLedger => "inventory.stock_ledger",
            Self::Document => "document",
            Self::Species => "dictionary.species",
            Self::SpeciesTranslation => "dictionary.species.translation",
            Self::ReferenceValue => "dictionary.reference_value",
            Self::ReferenceValueTranslation => "dictionary.reference_value.translation",
        }
    }

    /// Name of the backing table, also used as the search index name.
    pub const fn table(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::ApiKey => "api_keys",
            Self::Animal => "animals",
            Self::AnimalRelationship => "animal_relationships",
            Self::Customer => "customers",
            Self::Contact => "contacts",
            Self::Facility => "facilities",
            Self::Group => "organization_groups",
            Self::GroupAssociation => "group_associations",
            Self::ResourceType => "resource_types",
            Self::Resource => "resources",
            Self::Service => "services",
            Self::StockLedger => "stock_ledgers",
            Self::Document => "documents",
            Self::Species => "species",
            Self::SpeciesTranslation => "species_translations",
            Self::ReferenceValue => "reference_values",
            Self::ReferenceValueTranslation => "reference_value_translations",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_namespaces_share_their_parent_prefix() {
        assert!(EntityKind::AnimalRelationship
            .event_namespace()
            .starts_with(EntityKind::Animal.event_namespace()));
        assert!(EntityKind::GroupAssociation
            .event_namespace()
            .starts_with(EntityKind::Group.event_namespace()));
    }

    #[test]
    fn serializes_as_snake_case_tag() {
        let json = serde_json::to_string(&EntityKind::ResourceType).unwrap();
        assert_eq!(json, "\"resource_type\"");
    }
}
