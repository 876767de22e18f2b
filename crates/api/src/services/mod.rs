//! Service layer and its composition root.
//!
//! [`Services`] owns one [`EntityService`] per tenant entity and one
//! [`TranslationService`] per dictionary, all wired to the same cache and
//! event publisher. Handlers reach them through [`EntityServices`] and
//! [`TranslationServices`] so the CRUD handlers can stay generic.

use std::sync::Arc;

use kennel_cache::RecordCache;
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
use kennel_db::store::{
    ApiKeyStore, EntityStore, MemoryApiKeyStore, MemoryStore, MemoryTranslationStore,
    PgApiKeyStore, PgEntity, PgStore, PgTranslationStore, TranslationStore,
};
use kennel_db::{DbPool, Entity};
use kennel_events::EventPublisher;

use crate::search::SearchProvider;

pub mod entity;
pub mod translation;

pub use entity::EntityService;
pub use translation::TranslationService;

/// Where records live.
#[derive(Clone)]
pub enum StorageBackend {
    Postgres(DbPool),
    Memory,
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory => "memory",
        }
    }

    pub async fn is_healthy(&self) -> bool {
        match self {
            Self::Postgres(pool) => kennel_db::health_check(pool).await.is_ok(),
            Self::Memory => true,
        }
    }

    fn entity_store<E: PgEntity>(&self) -> Arc<dyn EntityStore<E>> {
        match self {
            Self::Postgres(pool) => Arc::new(PgStore::<E>::new(pool.clone())),
            Self::Memory => Arc::new(MemoryStore::<E>::new()),
        }
    }

    fn translation_store<T: Translation>(&self) -> Arc<dyn TranslationStore<T>> {
        match self {
            Self::Postgres(pool) => Arc::new(PgTranslationStore::<T>::new(pool.clone())),
            Self::Memory => Arc::new(MemoryTranslationStore::<T>::new()),
        }
    }

    fn api_key_store(&self) -> Arc<dyn ApiKeyStore> {
        match self {
            Self::Postgres(pool) => Arc::new(PgApiKeyStore::new(pool.clone())),
            Self::Memory => Arc::new(MemoryApiKeyStore::new()),
        }
    }
}

pub struct Services {
    pub storage: StorageBackend,
    pub cache: RecordCache,
    pub api_keys: Arc<dyn ApiKeyStore>,
    pub search: Option<Arc<dyn SearchProvider>>,
    /// HMAC key applied to bearer secrets before lookup.
    pub api_key_pepper: String,

    pub animals: EntityService<Animal>,
    pub animal_relationships: EntityService<AnimalRelationship>,
    pub customers: EntityService<Customer>,
    pub contacts: EntityService<Contact>,
    pub facilities: EntityService<Facility>,
    pub groups: EntityService<Group>,
    pub group_associations: EntityService<GroupAssociation>,
    pub resource_types: EntityService<ResourceType>,
    pub resources: EntityService<Resource>,
    pub services: EntityService<Service>,
    pub stock_ledgers: EntityService<StockLedger>,
    pub documents: EntityService<Document>,

    pub species_translations: TranslationService<SpeciesTranslation>,
    pub reference_value_translations: TranslationService<ReferenceValueTranslation>,
}

impl Services {
    pub fn new(
        storage: StorageBackend,
        cache: RecordCache,
        events: Arc<dyn EventPublisher>,
        search: Option<Arc<dyn SearchProvider>>,
        api_key_pepper: impl Into<String>,
    ) -> Self {
        fn entity<E: PgEntity>(
            storage: &StorageBackend,
            cache: &RecordCache,
            events: &Arc<dyn EventPublisher>,
        ) -> EntityService<E> {
            EntityService::new(storage.entity_store::<E>(), cache.clone(), Arc::clone(events))
        }

        Self {
            api_keys: storage.api_key_store(),
            search,
            api_key_pepper: api_key_pepper.into(),

            animals: entity(&storage, &cache, &events),
            animal_relationships: entity(&storage, &cache, &events),
            customers: entity(&storage, &cache, &events),
            contacts: entity(&storage, &cache, &events),
            facilities: entity(&storage, &cache, &events),
            groups: entity(&storage, &cache, &events),
            group_associations: entity(&storage, &cache, &events),
            resource_types: entity(&storage, &cache, &events),
            resources: entity(&storage, &cache, &events),
            services: entity(&storage, &cache, &events),
            stock_ledgers: entity(&storage, &cache, &events),
            documents: entity(&storage, &cache, &events),

            species_translations: TranslationService::new(
                storage.translation_store(),
                cache.clone(),
            ),
            reference_value_translations: TranslationService::new(
                storage.translation_store(),
                cache.clone(),
            ),

            storage,
            cache,
        }
    }
}

/// Typed access to the [`EntityService`] for `E`.
pub trait EntityServices<E: Entity> {
    fn entity_service(&self) -> &EntityService<E>;
}

/// Typed access to the [`TranslationService`] for `T`.
pub trait TranslationServices<T: Translation> {
    fn translation_service(&self) -> &TranslationService<T>;
}

macro_rules! entity_services {
    ($($field:ident: $entity:ty),* $(,)?) => {
        $(
            impl EntityServices<$entity> for Services {
                fn entity_service(&self) -> &EntityService<$entity> {
                    &self.$field
                }
            }
        )*
    };
}

entity_services! {
    animals: Animal,
    animal_relationships: AnimalRelationship,
    customers: Customer,
    contacts: Contact,
    facilities: Facility,
    groups: Group,
    group_associations: GroupAssociation,
    resource_types: ResourceType,
    resources: Resource,
    services: Service,
    stock_ledgers: StockLedger,
    documents: Document,
}

impl TranslationServices<SpeciesTranslation> for Services {
    fn translation_service(&self) -> &TranslationService<SpeciesTranslation> {
        &self.species_translations
    }
}

impl TranslationServices<ReferenceValueTranslation> for Services {
    fn translation_service(&self) -> &TranslationService<ReferenceValueTranslation> {
        &self.reference_value_translations
    }
}
