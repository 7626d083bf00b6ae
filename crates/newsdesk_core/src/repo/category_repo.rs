//! Category repository over the `categories` collection.
//!
//! # Responsibility
//! - Provide create/list/update/delete for categories.
//! - Derive live article counts through `ArticleRepository`.
//! - Seed the default category set into an empty collection.
//!
//! # Invariants
//! - `article_count` fails open (0) and `can_delete` fails closed (`false`).
//! - A failed `list()` aborts `list_with_counts` and `seed_defaults`.
//! - No "deletable" state is cached; every check issues a fresh count.

use super::article_repo::ArticleRepository;
use super::{RepoError, RepoResult, FIELD_CREATED_AT, FIELD_UPDATED_AT};
use crate::model::category::{
    default_categories, Category, CategoryPatch, CategoryWithCount, NewCategory,
};
use crate::store::{
    resolve_timestamp, to_write_fields, Document, DocumentStore, SortDirection, WriteValue,
};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const CATEGORIES_COLLECTION: &str = "categories";

const FIELD_NAME: &str = "name";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCategory {
    name: String,
    #[serde(default)]
    name_hindi: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    is_active: bool,
}

/// Repository for the `categories` collection.
#[derive(Clone)]
pub struct CategoryRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
    articles: ArticleRepository,
}

impl CategoryRepository {
    /// Creates a repository sharing the article repository's store client.
    pub fn new(store: Arc<dyn DocumentStore>, articles: ArticleRepository) -> Self {
        Self::with_collection(store, CATEGORIES_COLLECTION, articles)
    }

    pub fn with_collection(
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
        articles: ArticleRepository,
    ) -> Self {
        Self {
            store,
            collection: collection.into(),
            articles,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persists a new category. Duplicate names are accepted.
    pub async fn create(&self, category: &NewCategory) -> RepoResult<String> {
        let mut fields =
            to_write_fields(category).map_err(|err| RepoError::write("category_create", err))?;
        fields.insert(FIELD_CREATED_AT.to_string(), WriteValue::ServerTimestamp);
        fields.insert(FIELD_UPDATED_AT.to_string(), WriteValue::ServerTimestamp);

        let id = self
            .store
            .insert(&self.collection, fields)
            .await
            .map_err(|err| RepoError::write("category_create", err))?;
        debug!("event=category_create module=repo status=ok id={id}");
        Ok(id)
    }

    /// Lists every category ordered by name ascending.
    pub async fn list(&self) -> RepoResult<Vec<Category>> {
        let documents = self
            .store
            .list_all(&self.collection, FIELD_NAME, SortDirection::Ascending)
            .await
            .map_err(|err| RepoError::read("category_list", err))?;

        let read_at = Utc::now();
        documents
            .into_iter()
            .map(|document| parse_category(document, read_at))
            .collect()
    }

    /// Loads one category by id, `None` when it does not exist.
    pub async fn find(&self, id: &str) -> RepoResult<Option<Category>> {
        let document = self
            .store
            .get(&self.collection, id)
            .await
            .map_err(|err| RepoError::read("category_get", err))?;
        document
            .map(|document| parse_category(document, Utc::now()))
            .transpose()
    }

    /// Merges `patch` into an existing category and refreshes `updatedAt`.
    pub async fn update(&self, id: &str, patch: &CategoryPatch) -> RepoResult<()> {
        let mut fields =
            to_write_fields(patch).map_err(|err| RepoError::write("category_update", err))?;
        fields.insert(FIELD_UPDATED_AT.to_string(), WriteValue::ServerTimestamp);

        self.store
            .merge_update(&self.collection, id, fields)
            .await
            .map_err(|err| RepoError::write("category_update", err))?;
        debug!("event=category_update module=repo status=ok id={id}");
        Ok(())
    }

    /// Removes a category without checking for referencing articles.
    ///
    /// Use `CategoryService::delete_category` for the guarded path.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .remove(&self.collection, id)
            .await
            .map_err(|err| RepoError::write("category_delete", err))?;
        debug!("event=category_delete module=repo status=ok id={id}");
        Ok(())
    }

    /// Fresh count of articles referencing `category_name`, propagating errors.
    pub async fn try_article_count(&self, category_name: &str) -> RepoResult<u64> {
        self.articles.count_by_category(category_name).await
    }

    /// Number of articles referencing `category_name`.
    ///
    /// Returns 0 when the count query fails.
    pub async fn article_count(&self, category_name: &str) -> u64 {
        match self.try_article_count(category_name).await {
            Ok(count) => count,
            Err(err) => {
                warn!(
                    "event=category_article_count module=repo status=degraded fallback=0 error={err}"
                );
                0
            }
        }
    }

    /// Whether no article references `category_name`.
    ///
    /// Returns `false` when the count query fails.
    pub async fn can_delete(&self, category_name: &str) -> bool {
        match self.try_article_count(category_name).await {
            Ok(count) => count == 0,
            Err(err) => {
                warn!(
                    "event=category_can_delete module=repo status=degraded fallback=false error={err}"
                );
                false
            }
        }
    }

    /// Lists categories joined with their live article counts.
    ///
    /// Count queries run concurrently; a failed count reads as 0.
    pub async fn list_with_counts(&self) -> RepoResult<Vec<CategoryWithCount>> {
        let categories = self.list().await?;
        let counts = join_all(
            categories
                .iter()
                .map(|category| self.article_count(&category.name)),
        )
        .await;

        Ok(categories
            .into_iter()
            .zip(counts)
            .map(|(category, article_count)| CategoryWithCount {
                category,
                article_count,
            })
            .collect())
    }

    /// Names of active categories, in `list()` order.
    pub async fn active_names(&self) -> RepoResult<Vec<String>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|category| category.is_active)
            .map(|category| category.name)
            .collect())
    }

    /// Inserts the default categories when the collection is empty.
    ///
    /// Returns how many categories were inserted. A failed insert does not
    /// roll back the ones that succeeded.
    pub async fn seed_defaults(&self) -> RepoResult<usize> {
        let existing = match self.list().await {
            Ok(existing) => existing,
            Err(err) => {
                error!("event=category_seed module=repo status=error stage=list error={err}");
                return Err(err);
            }
        };
        if !existing.is_empty() {
            debug!(
                "event=category_seed module=repo status=skipped existing={}",
                existing.len()
            );
            return Ok(0);
        }

        let defaults = default_categories();
        let results = join_all(defaults.iter().map(|category| self.create(category))).await;
        let inserted = results.iter().filter(|result| result.is_ok()).count();
        if let Some(Err(err)) = results.into_iter().find(Result::is_err) {
            let partial = inserted > 0;
            error!(
                "event=category_seed module=repo status=error stage=insert inserted={inserted} partial={partial} error={err}"
            );
            return Err(err);
        }

        info!("event=category_seed module=repo status=ok inserted={inserted}");
        Ok(inserted)
    }
}

fn parse_category(document: Document, read_at: DateTime<Utc>) -> RepoResult<Category> {
    let created_at = resolve_timestamp(document.fields.get(FIELD_CREATED_AT), read_at);
    let updated_at = resolve_timestamp(document.fields.get(FIELD_UPDATED_AT), read_at);
    let Document { id, fields } = document;

    let stored: StoredCategory = serde_json::from_value(Value::Object(fields)).map_err(|err| {
        RepoError::InvalidData(format!("category `{id}` cannot be decoded: {err}"))
    })?;

    Ok(Category {
        id,
        name: stored.name,
        name_hindi: stored.name_hindi,
        description: stored.description,
        is_active: stored.is_active,
        created_at,
        updated_at,
    })
}
