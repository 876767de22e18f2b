//! Read-only dictionary translations.

use std::sync::Arc;

use kennel_cache::key::locale_cache_key;
use kennel_cache::RecordCache;
use kennel_core::pagination::{Page, PageRequest};
use kennel_core::types::DbId;
use kennel_db::models::translation::{Translation, TranslationCriteria};
use kennel_db::store::TranslationStore;

use crate::error::AppResult;

pub struct TranslationService<T: Translation> {
    store: Arc<dyn TranslationStore<T>>,
    cache: RecordCache,
}

impl<T: Translation> TranslationService<T> {
    pub fn new(store: Arc<dyn TranslationStore<T>>, cache: RecordCache) -> Self {
        Self { store, cache }
    }

    /// Translation of `parent_id` into `locale`, read through the cache.
    pub async fn find_by_locale(&self, parent_id: DbId, locale: &str) -> AppResult<Option<T>> {
        let key = locale_cache_key(T::PARENT_KIND, parent_id, T::KIND, locale);
        if let Some(hit) = self.cache.get::<T>(&key).await {
            return Ok(Some(hit));
        }

        let Some(row) = self.store.find_by_locale(parent_id, locale).await? else {
            return Ok(None);
        };
        self.cache.set(&key, &row).await;
        Ok(Some(row))
    }

    pub async fn find_all(
        &self,
        criteria: &TranslationCriteria,
        page: &PageRequest,
    ) -> AppResult<Page<T>> {
        let (data, total) = tokio::try_join!(
            self.store.list(criteria, page),
            self.store.count(criteria),
        )?;
        Ok(Page::new(data, total, page))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use kennel_db::models::translation::SpeciesTranslation;
    use kennel_db::store::MemoryTranslationStore;

    use super::*;

    fn row(species_id: DbId, locale: &str, name: &str) -> SpeciesTranslation {
        SpeciesTranslation {
            id: DbId::new_v4(),
            species_id,
            locale: locale.into(),
            name: name.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn locale_lookup_populates_cache() {
        let store = Arc::new(MemoryTranslationStore::<SpeciesTranslation>::new());
        let dog = DbId::new_v4();
        store.insert(row(dog, "de", "Hund")).await;
        let cache = RecordCache::in_memory(None);
        let svc = TranslationService::new(store, cache.clone());

        let found = svc.find_by_locale(dog, "de").await.unwrap().unwrap();
        assert_eq!(found.name, "Hund");

        let key = locale_cache_key(
            SpeciesTranslation::PARENT_KIND,
            dog,
            SpeciesTranslation::KIND,
            "de",
        );
        assert_eq!(cache.get::<SpeciesTranslation>(&key).await, Some(found));
        assert!(svc.find_by_locale(dog, "fr").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_is_scoped_to_parent() {
        let store = Arc::new(MemoryTranslationStore::<SpeciesTranslation>::new());
        let dog = DbId::new_v4();
        let cat = DbId::new_v4();
        store.insert(row(dog, "de", "Hund")).await;
        store.insert(row(dog, "fr", "Chien")).await;
        store.insert(row(cat, "de", "Katze")).await;
        let svc = TranslationService::new(store, RecordCache::in_memory(None));

        let page = svc
            .find_all(&TranslationCriteria::for_parent(dog), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.meta.total, 2);
        let names: Vec<_> = page.data.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Chien", "Hund"]);
    }
}
