//! Article repository over the `articles` collection.
//!
//! # Responsibility
//! - Provide create/list/update/delete and view tracking for articles.
//! - Serve the per-category count query the category side depends on.
//!
//! # Invariants
//! - New articles are written with `views = 0` and server timestamps.
//! - Every mutation refreshes `updatedAt`.
//! - Delete never checks other entities.
//! - A document whose language/status is outside the known spellings fails
//!   the whole `list()` with `InvalidData` rather than being dropped.

use super::{RepoError, RepoResult, FIELD_CREATED_AT, FIELD_UPDATED_AT};
use crate::model::article::{Article, ArticlePatch, ArticleStatus, Language, NewArticle};
use crate::store::{
    resolve_timestamp, to_write_fields, Document, DocumentStore, SortDirection, StoreError,
    WriteFields, WriteValue,
};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const ARTICLES_COLLECTION: &str = "articles";

const FIELD_CATEGORY: &str = "category";
const FIELD_VIEWS: &str = "views";

/// Stored shape of an article, without id and timestamps.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredArticle {
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    summary: String,
    category: String,
    language: Language,
    status: ArticleStatus,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    views: u64,
}

/// Repository for the `articles` collection.
#[derive(Clone)]
pub struct ArticleRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl ArticleRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_collection(store, ARTICLES_COLLECTION)
    }

    pub fn with_collection(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persists a new article and returns its store-assigned id.
    ///
    /// Performs no validation; callers validate before calling.
    pub async fn create(&self, article: &NewArticle) -> RepoResult<String> {
        let mut fields =
            to_write_fields(article).map_err(|err| RepoError::write("article_create", err))?;
        fields.insert(FIELD_VIEWS.to_string(), WriteValue::Value(Value::from(0u64)));
        fields.insert(FIELD_CREATED_AT.to_string(), WriteValue::ServerTimestamp);
        fields.insert(FIELD_UPDATED_AT.to_string(), WriteValue::ServerTimestamp);

        let id = self
            .store
            .insert(&self.collection, fields)
            .await
            .map_err(|err| RepoError::write("article_create", err))?;
        debug!("event=article_create module=repo status=ok id={id}");
        Ok(id)
    }

    /// Lists every article, most recently created first.
    pub async fn list(&self) -> RepoResult<Vec<Article>> {
        let documents = self
            .store
            .list_all(&self.collection, FIELD_CREATED_AT, SortDirection::Descending)
            .await
            .map_err(|err| RepoError::read("article_list", err))?;

        let read_at = Utc::now();
        documents
            .into_iter()
            .map(|document| parse_article(document, read_at))
            .collect()
    }

    /// Merges `patch` into an existing article and refreshes `updatedAt`.
    pub async fn update(&self, id: &str, patch: &ArticlePatch) -> RepoResult<()> {
        let mut fields =
            to_write_fields(patch).map_err(|err| RepoError::write("article_update", err))?;
        fields.insert(FIELD_UPDATED_AT.to_string(), WriteValue::ServerTimestamp);
        self.merge(id, fields, "article_update").await
    }

    /// Removes an article unconditionally.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .remove(&self.collection, id)
            .await
            .map_err(|err| RepoError::write("article_delete", err))?;
        debug!("event=article_delete module=repo status=ok id={id}");
        Ok(())
    }

    /// Adds one view and returns the new counter value.
    ///
    /// Read-then-write: concurrent increments of the same article can lose
    /// updates. A store with an atomic increment primitive should replace
    /// this sequence.
    pub async fn increment_views(&self, id: &str) -> RepoResult<u64> {
        let document = self
            .store
            .get(&self.collection, id)
            .await
            .map_err(|err| RepoError::read("article_increment_views", err))?
            .ok_or_else(|| {
                RepoError::write(
                    "article_increment_views",
                    StoreError::NotFound {
                        collection: self.collection.clone(),
                        id: id.to_string(),
                    },
                )
            })?;

        let current = document
            .fields
            .get(FIELD_VIEWS)
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let next = current.saturating_add(1);

        let mut fields = WriteFields::new();
        fields.insert(FIELD_VIEWS.to_string(), WriteValue::Value(Value::from(next)));
        fields.insert(FIELD_UPDATED_AT.to_string(), WriteValue::ServerTimestamp);
        self.merge(id, fields, "article_increment_views").await?;
        Ok(next)
    }

    /// Counts articles whose `category` equals `category_name`.
    pub async fn count_by_category(&self, category_name: &str) -> RepoResult<u64> {
        self.store
            .count(
                &self.collection,
                FIELD_CATEGORY,
                &Value::String(category_name.to_string()),
            )
            .await
            .map_err(|err| RepoError::read("article_count", err))
    }

    async fn merge(&self, id: &str, fields: WriteFields, event: &'static str) -> RepoResult<()> {
        self.store
            .merge_update(&self.collection, id, fields)
            .await
            .map_err(|err| RepoError::write(event, err))?;
        debug!("event={event} module=repo status=ok id={id}");
        Ok(())
    }
}

fn parse_article(document: Document, read_at: DateTime<Utc>) -> RepoResult<Article> {
    let created_at = resolve_timestamp(document.fields.get(FIELD_CREATED_AT), read_at);
    let updated_at = resolve_timestamp(document.fields.get(FIELD_UPDATED_AT), read_at);
    let Document { id, fields } = document;

    let stored: StoredArticle = serde_json::from_value(Value::Object(fields)).map_err(|err| {
        RepoError::InvalidData(format!("article `{id}` cannot be decoded: {err}"))
    })?;

    Ok(Article {
        id,
        title: stored.title,
        content: stored.content,
        summary: stored.summary,
        category: stored.category,
        language: stored.language,
        status: stored.status,
        thumbnail: stored.thumbnail.filter(|url| !url.is_empty()),
        views: stored.views,
        created_at,
        updated_at,
    })
}
