#![allow(dead_code)]

use async_trait::async_trait;
use newsdesk_core::{
    ArticleRepository, CategoryRepository, Document, DocumentStore, InMemoryDocumentStore,
    Language, NewArticle, NewCategory, SortDirection, StoreError, StoreResult, WriteFields,
};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory store with switchable faults and call recording.
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryDocumentStore,
    pub fail_counts: AtomicBool,
    pub fail_lists: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_count_value: Mutex<Option<String>>,
    pub insert_budget: Mutex<Option<usize>>,
    pub count_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub removed: Mutex<Vec<(String, String)>>,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_fail_counts(&self, fail: bool) {
        self.fail_counts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Fails only count queries filtered on this exact value.
    pub fn fail_count_for(&self, value: &str) {
        *self.fail_count_value.lock().unwrap() = Some(value.to_string());
    }

    /// Lets the next `n` inserts through, then fails every insert.
    pub fn allow_inserts(&self, n: usize) {
        *self.insert_budget.lock().unwrap() = Some(n);
    }

    pub fn removed(&self) -> Vec<(String, String)> {
        self.removed.lock().unwrap().clone()
    }

    pub fn inner(&self) -> &InMemoryDocumentStore {
        &self.inner
    }

    fn transport(op: &str) -> StoreError {
        StoreError::Transport(format!("injected {op} failure"))
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn insert(&self, collection: &str, fields: WriteFields) -> StoreResult<String> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::transport("insert"));
        }
        if let Some(budget) = self.insert_budget.lock().unwrap().as_mut() {
            if *budget == 0 {
                return Err(Self::transport("insert"));
            }
            *budget -= 1;
        }
        self.inner.insert(collection, fields).await
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn list_all(
        &self,
        collection: &str,
        order_by: &str,
        direction: SortDirection,
    ) -> StoreResult<Vec<Document>> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(Self::transport("list"));
        }
        self.inner.list_all(collection, order_by, direction).await
    }

    async fn merge_update(
        &self,
        collection: &str,
        id: &str,
        fields: WriteFields,
    ) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::transport("update"));
        }
        self.inner.merge_update(collection, id, fields).await
    }

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::transport("remove"));
        }
        self.removed
            .lock()
            .unwrap()
            .push((collection.to_string(), id.to_string()));
        self.inner.remove(collection, id).await
    }

    async fn count(&self, collection: &str, field: &str, value: &Value) -> StoreResult<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(Self::transport("count"));
        }
        let targeted = self.fail_count_value.lock().unwrap().clone();
        if targeted.as_deref().is_some_and(|target| value.as_str() == Some(target)) {
            return Err(Self::transport("count"));
        }
        self.inner.count(collection, field, value).await
    }
}

pub fn repos(store: Arc<FlakyStore>) -> (ArticleRepository, CategoryRepository) {
    let articles = ArticleRepository::new(store.clone());
    let categories = CategoryRepository::new(store, articles.clone());
    (articles, categories)
}

pub fn article_in(category: &str, title: &str) -> NewArticle {
    NewArticle::draft(title, format!("{title} body"), category, Language::English)
}

pub fn category(name: &str) -> NewCategory {
    NewCategory::new(name, format!("{name} (hi)"))
}
