//! Content data-access core for the newsdesk admin panel.
//! Articles and categories over a remote document store, plus the
//! category deletion guard that keeps them consistent.

pub mod config;
pub mod context;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use context::ContentCore;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::article::{
    auto_summary, Article, ArticlePatch, ArticleStatus, Language, NewArticle,
};
pub use model::category::{Category, CategoryPatch, CategoryWithCount, NewCategory};
pub use model::validation::ValidationError;
pub use repo::article_repo::ArticleRepository;
pub use repo::category_repo::CategoryRepository;
pub use repo::{RepoError, RepoResult};
pub use service::article_service::{
    ArticleListQuery, ArticleService, ArticleServiceError, ArticleStats,
};
pub use service::category_service::{CategoryService, CategoryServiceError};
pub use store::{
    Document, DocumentStore, InMemoryDocumentStore, SortDirection, StoreError, StoreResult,
    WriteFields, WriteValue,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
