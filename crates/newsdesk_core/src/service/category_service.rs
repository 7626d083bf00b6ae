//! Category use-case service.
//!
//! # Responsibility
//! - Guard category deletion against referencing articles.
//! - Provide authoring choices and page-load seeding for views.
//!
//! # Invariants
//! - `delete_category` resolves the category name from the stored document,
//!   issues a fresh count on every call and never reaches the store's remove
//!   when the count is nonzero or unknown.
//! - Count-then-remove is not atomic; an article created between the two
//!   calls is not detected.

use crate::model::category::{
    default_category_names, CategoryPatch, CategoryWithCount, NewCategory,
};
use crate::model::validation::ValidationError;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::{RepoError, RepoResult};
use crate::store::StoreError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from category service operations.
#[derive(Debug)]
pub enum CategoryServiceError {
    /// Payload rejected before persistence.
    Validation(ValidationError),
    /// Category is still referenced by articles.
    HasArticles { name: String, count: u64 },
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for CategoryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::HasArticles { name, count } => write!(
                f,
                "category `{name}` cannot be deleted: {count} article(s) still reference it"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CategoryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::HasArticles { .. } => None,
        }
    }
}

impl From<ValidationError> for CategoryServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CategoryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Category service facade over `CategoryRepository`.
pub struct CategoryService {
    repo: CategoryRepository,
}

impl CategoryService {
    pub fn new(repo: CategoryRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &CategoryRepository {
        &self.repo
    }

    /// Validates and persists a new category, returning its id.
    pub async fn create_category(
        &self,
        category: &NewCategory,
    ) -> Result<String, CategoryServiceError> {
        category.validate()?;
        Ok(self.repo.create(category).await?)
    }

    pub async fn update_category(&self, id: &str, patch: &CategoryPatch) -> RepoResult<()> {
        self.repo.update(id, patch).await
    }

    /// Shows or hides a category in the authoring form.
    pub async fn set_active(&self, id: &str, is_active: bool) -> RepoResult<()> {
        self.repo.update(id, &CategoryPatch::active(is_active)).await
    }

    pub async fn list_with_counts(&self) -> RepoResult<Vec<CategoryWithCount>> {
        self.repo.list_with_counts().await
    }

    /// Deletes category `id` if no article references its stored name.
    ///
    /// # Errors
    /// - `Repo(RepoError::Write(NotFound))` when the category does not exist.
    /// - `HasArticles` when the fresh count is nonzero; nothing is removed.
    /// - `Repo(RepoError::Read)` when loading or counting fails; nothing is
    ///   removed.
    /// - `Repo(RepoError::Write)` when the remove itself fails.
    pub async fn delete_category(&self, id: &str) -> Result<(), CategoryServiceError> {
        let category = self.repo.find(id).await?.ok_or_else(|| {
            RepoError::write(
                "category_delete",
                StoreError::NotFound {
                    collection: self.repo.collection().to_string(),
                    id: id.to_string(),
                },
            )
        })?;

        let count = self.repo.try_article_count(&category.name).await?;
        if count > 0 {
            warn!(
                "event=category_delete module=service status=rejected id={id} article_count={count}"
            );
            return Err(CategoryServiceError::HasArticles {
                name: category.name,
                count,
            });
        }

        self.repo.delete(id).await?;
        info!("event=category_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Active category names for the authoring form.
    ///
    /// Falls back to the default names when listing fails.
    pub async fn authoring_categories(&self) -> Vec<String> {
        match self.repo.active_names().await {
            Ok(names) => names,
            Err(err) => {
                warn!(
                    "event=authoring_categories module=service status=degraded fallback=defaults error={err}"
                );
                default_category_names()
            }
        }
    }

    /// Seeds defaults for a page load; failures are logged, not returned.
    pub async fn ensure_seeded(&self) -> usize {
        match self.repo.seed_defaults().await {
            Ok(inserted) => inserted,
            Err(err) => {
                warn!("event=category_seed module=service status=skipped error={err}");
                0
            }
        }
    }
}
