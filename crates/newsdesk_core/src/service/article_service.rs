//! Article use-case service.
//!
//! # Responsibility
//! - Validate article payloads before they reach the repository.
//! - Provide filtered listing and dashboard totals for management views.
//!
//! # Invariants
//! - Filtering never reorders: results keep `createdAt DESC`.
//! - Stats are computed from a single list snapshot.

use crate::model::article::{Article, ArticlePatch, ArticleStatus, Language, NewArticle};
use crate::model::validation::ValidationError;
use crate::repo::article_repo::ArticleRepository;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from article service operations.
#[derive(Debug)]
pub enum ArticleServiceError {
    /// Payload rejected before persistence.
    Validation(ValidationError),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ArticleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ArticleServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ArticleServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ArticleServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Exact-match filters for article listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleListQuery {
    pub language: Option<Language>,
    pub status: Option<ArticleStatus>,
}

impl ArticleListQuery {
    fn matches(&self, article: &Article) -> bool {
        self.language.map_or(true, |language| article.language == language)
            && self.status.map_or(true, |status| article.status == status)
    }
}

/// Dashboard totals over all articles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
    pub total_views: u64,
}

/// Article service facade over `ArticleRepository`.
pub struct ArticleService {
    repo: ArticleRepository,
}

impl ArticleService {
    pub fn new(repo: ArticleRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &ArticleRepository {
        &self.repo
    }

    /// Validates and persists a new article, returning its id.
    pub async fn create_article(&self, article: &NewArticle) -> Result<String, ArticleServiceError> {
        article.validate()?;
        Ok(self.repo.create(article).await?)
    }

    /// Lists articles matching `query`, newest first.
    pub async fn list_articles(&self, query: &ArticleListQuery) -> RepoResult<Vec<Article>> {
        let mut articles = self.repo.list().await?;
        articles.retain(|article| query.matches(article));
        Ok(articles)
    }

    pub async fn update_article(&self, id: &str, patch: &ArticlePatch) -> RepoResult<()> {
        self.repo.update(id, patch).await
    }

    /// Switches an article between draft and published.
    pub async fn set_status(&self, id: &str, status: ArticleStatus) -> RepoResult<()> {
        self.repo.update(id, &ArticlePatch::status(status)).await
    }

    pub async fn delete_article(&self, id: &str) -> RepoResult<()> {
        self.repo.delete(id).await
    }

    pub async fn record_view(&self, id: &str) -> RepoResult<u64> {
        self.repo.increment_views(id).await
    }

    /// Totals for the dashboard cards.
    pub async fn stats(&self) -> RepoResult<ArticleStats> {
        let articles = self.repo.list().await?;
        Ok(articles
            .iter()
            .fold(ArticleStats::default(), |mut stats, article| {
                stats.total += 1;
                if article.is_published() {
                    stats.published += 1;
                } else {
                    stats.drafts += 1;
                }
                stats.total_views = stats.total_views.saturating_add(article.views);
                stats
            }))
    }
}
