//! Category domain model and the default seed set.
//!
//! # Invariants
//! - `name` is unique by convention only.
//! - `article_count` is derived on demand and never persisted.

use super::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default categories as `(name, name_hindi, description)`.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 7] = [
    (
        "Politics",
        "राजनीति",
        "Political news and government updates",
    ),
    ("Sports", "खेल", "Sports news, matches, and player updates"),
    (
        "Technology",
        "प्रौद्योगिकी",
        "Tech news, gadgets, and innovations",
    ),
    (
        "Entertainment",
        "मनोरंजन",
        "Movies, TV shows, celebrity news",
    ),
    (
        "Business",
        "व्यापार",
        "Business news, market updates, economy",
    ),
    (
        "Health",
        "स्वास्थ्य",
        "Health news, medical updates, wellness",
    ),
    ("Science", "विज्ञान", "Scientific discoveries and research"),
];

/// A persisted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub name_hindi: String,
    pub description: String,
    /// Offered when authoring new articles.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category joined with its live article count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub article_count: u64,
}

/// Create payload for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub name_hindi: String,
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
}

impl NewCategory {
    /// Creates an active category with an empty description.
    pub fn new(name: impl Into<String>, name_hindi: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_hindi: name_hindi.into(),
            description: String::new(),
            is_active: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        if self.name_hindi.trim().is_empty() {
            return Err(ValidationError::BlankNameHindi);
        }
        Ok(())
    }
}

/// Partial category update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_hindi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CategoryPatch {
    /// Patch that only flips `is_active`.
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}

/// The default category set as create payloads.
pub fn default_categories() -> Vec<NewCategory> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, name_hindi, description)| NewCategory {
            name: (*name).to_string(),
            name_hindi: (*name_hindi).to_string(),
            description: (*description).to_string(),
            is_active: true,
        })
        .collect()
}

/// English names of the default category set.
pub fn default_category_names() -> Vec<String> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, _, _)| (*name).to_string())
        .collect()
}
