//! Article domain model.
//!
//! # Responsibility
//! - Define the short news article record and its write payloads.
//! - Provide the 60-word auto summary used by the authoring form.
//!
//! # Invariants
//! - `views` starts at 0 and is never decremented.
//! - `id`, `created_at` and `views` are never part of a create payload.
//! - `id`, `created_at` and `views` are never part of a patch; the counter
//!   only moves through `ArticleRepository::increment_views`.

use super::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Word budget for article summaries.
pub const SUMMARY_WORD_LIMIT: usize = 60;

/// Supported article languages.
///
/// Written as `English`/`Hindi`; lowercase and uppercase spellings from
/// other clients are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(alias = "english", alias = "ENGLISH")]
    English,
    #[serde(alias = "hindi", alias = "HINDI")]
    Hindi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Hindi];
}

/// Publication state, written as `draft`/`published`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    #[serde(alias = "Draft", alias = "DRAFT")]
    Draft,
    #[serde(alias = "Published", alias = "PUBLISHED")]
    Published,
}

/// A persisted article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    /// Category name; a weak reference.
    pub category: String,
    pub language: Language,
    pub status: ArticleStatus,
    pub thumbnail: Option<String>,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }
}

/// Create payload for an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub category: String,
    pub language: Language,
    pub status: ArticleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl NewArticle {
    /// Creates a draft with empty summary and no thumbnail.
    pub fn draft(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            summary: String::new(),
            category: category.into(),
            language,
            status: ArticleStatus::Draft,
            thumbnail: None,
        }
    }

    /// Replaces `summary` with the first words of `content`.
    pub fn with_auto_summary(mut self) -> Self {
        self.summary = auto_summary(&self.content);
        self
    }

    /// Checks the fields the authoring form marks as required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::BlankCategory);
        }
        Ok(())
    }
}

/// Partial article update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ArticlePatch {
    pub fn status(status: ArticleStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }
}

/// Builds a summary from the first `SUMMARY_WORD_LIMIT` space-separated words.
///
/// Appends `...` when the limit was reached.
pub fn auto_summary(content: &str) -> String {
    let words: Vec<&str> = content.split(' ').take(SUMMARY_WORD_LIMIT).collect();
    let mut summary = words.join(" ");
    if words.len() == SUMMARY_WORD_LIMIT {
        summary.push_str("...");
    }
    summary
}

/// Counts whitespace-separated words, for the summary length hint.
pub fn summary_word_count(summary: &str) -> usize {
    summary.split_whitespace().count()
}
