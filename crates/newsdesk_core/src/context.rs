//! Wiring of one store client into both repositories and services.
//!
//! # Invariants
//! - Both repositories share the same injected store client.
//! - The category side counts articles in the configured articles collection.

use crate::config::CoreConfig;
use crate::repo::article_repo::ArticleRepository;
use crate::repo::category_repo::CategoryRepository;
use crate::service::article_service::ArticleService;
use crate::service::category_service::CategoryService;
use crate::store::DocumentStore;
use std::sync::Arc;

/// Services built over one shared store client.
pub struct ContentCore {
    pub articles: ArticleService,
    pub categories: CategoryService,
}

impl ContentCore {
    pub fn new(store: Arc<dyn DocumentStore>, config: &CoreConfig) -> Self {
        let articles =
            ArticleRepository::with_collection(store.clone(), config.articles_collection.as_str());
        let categories = CategoryRepository::with_collection(
            store,
            config.categories_collection.as_str(),
            articles.clone(),
        );
        Self {
            articles: ArticleService::new(articles),
            categories: CategoryService::new(categories),
        }
    }

    /// Seeds default categories when `seed_on_start` is enabled.
    pub async fn start(&self, config: &CoreConfig) -> usize {
        if config.seed_on_start {
            self.categories.ensure_seeded().await
        } else {
            0
        }
    }
}
