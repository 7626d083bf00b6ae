//! Core configuration.
//!
//! # Responsibility
//! - Hold collection names, logging options and the seed-on-start switch.
//! - Load overrides from environment variables or a JSON document.
//!
//! # Invariants
//! - Collection names are never blank.
//! - Unknown environment values are reported, not silently ignored.

use crate::logging::default_log_level;
use crate::repo::article_repo::ARTICLES_COLLECTION;
use crate::repo::category_repo::CATEGORIES_COLLECTION;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const ENV_ARTICLES_COLLECTION: &str = "NEWSDESK_ARTICLES_COLLECTION";
pub const ENV_CATEGORIES_COLLECTION: &str = "NEWSDESK_CATEGORIES_COLLECTION";
pub const ENV_LOG_LEVEL: &str = "NEWSDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NEWSDESK_LOG_DIR";
pub const ENV_SEED_ON_START: &str = "NEWSDESK_SEED_ON_START";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// JSON document could not be parsed.
    Parse(String),
    /// A setting has an unusable value.
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid configuration document: {message}"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for `{key}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Runtime settings for the content core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub articles_collection: String,
    pub categories_collection: String,
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<String>,
    pub seed_on_start: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            articles_collection: ARTICLES_COLLECTION.to_string(),
            categories_collection: CATEGORIES_COLLECTION.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            seed_on_start: true,
        }
    }
}

impl CoreConfig {
    /// Defaults overlaid with `NEWSDESK_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parses a JSON document; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_ARTICLES_COLLECTION) {
            config.articles_collection = value;
        }
        if let Some(value) = lookup(ENV_CATEGORIES_COLLECTION) {
            config.categories_collection = value;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            config.log_level = value;
        }
        if let Some(value) = lookup(ENV_LOG_DIR) {
            config.log_dir = Some(value).filter(|dir| !dir.trim().is_empty());
        }
        if let Some(value) = lookup(ENV_SEED_ON_START) {
            config.seed_on_start = parse_bool(ENV_SEED_ON_START, &value)?;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.articles_collection.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "articles_collection",
                value: self.articles_collection.clone(),
            });
        }
        if self.categories_collection.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "categories_collection",
                value: self.categories_collection.clone(),
            });
        }
        Ok(())
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
