//! Document store client contract.
//!
//! # Responsibility
//! - Define the async primitives both repositories consume.
//! - Keep remote transport details behind one injectable trait object.
//!
//! # Invariants
//! - Documents are addressed by collection name + store-assigned id.
//! - `WriteValue::ServerTimestamp` is resolved by the store, never the caller.
//! - Implementations are shareable across concurrent calls (`Send + Sync`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;

pub use memory::InMemoryDocumentStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Field map of a stored document as returned by reads.
pub type Fields = Map<String, Value>;

/// Field map for writes; values may carry the server timestamp sentinel.
pub type WriteFields = BTreeMap<String, WriteValue>;

/// Transport or query failure reported by a store client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Network, permission or backend failure.
    Transport(String),
    /// Target document does not exist.
    NotFound { collection: String, id: String },
    /// Request could not be expressed for this store.
    InvalidArgument(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "store transport failure: {message}"),
            Self::NotFound { collection, id } => {
                write!(f, "document not found: {collection}/{id}")
            }
            Self::InvalidArgument(message) => write!(f, "invalid store request: {message}"),
        }
    }
}

impl Error for StoreError {}

/// One value in a write request.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteValue {
    Value(Value),
    /// Replaced by the store's clock at write time.
    ServerTimestamp,
}

impl From<Value> for WriteValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Sort direction for `list_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A stored document with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// Async client for a remote document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document and returns the store-assigned id.
    async fn insert(&self, collection: &str, fields: WriteFields) -> StoreResult<String>;

    /// Fetches one document, `None` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Lists every document of a collection ordered by one field.
    async fn list_all(
        &self,
        collection: &str,
        order_by: &str,
        direction: SortDirection,
    ) -> StoreResult<Vec<Document>>;

    /// Merges fields into an existing document.
    ///
    /// Fails with `StoreError::NotFound` when the document is absent.
    async fn merge_update(&self, collection: &str, id: &str, fields: WriteFields)
        -> StoreResult<()>;

    /// Removes a document. Removing an absent document is not an error.
    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Counts documents whose `field` equals `value`.
    async fn count(&self, collection: &str, field: &str, value: &Value) -> StoreResult<u64>;
}

/// Serializes a model into write fields.
///
/// `value` must serialize to a JSON object.
pub fn to_write_fields<T: Serialize>(value: &T) -> StoreResult<WriteFields> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, WriteValue::Value(value)))
            .collect()),
        Ok(other) => Err(StoreError::InvalidArgument(format!(
            "expected an object, got `{other}`"
        ))),
        Err(err) => Err(StoreError::InvalidArgument(err.to_string())),
    }
}

/// Resolves a stored timestamp field to a concrete instant.
///
/// Pending, missing or unparsable values resolve to `read_at`.
pub fn resolve_timestamp(value: Option<&Value>, read_at: DateTime<Utc>) -> DateTime<Utc> {
    value
        .and_then(Value::as_str)
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
        .unwrap_or(read_at)
}
