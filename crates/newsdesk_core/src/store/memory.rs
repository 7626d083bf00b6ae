//! In-process document store.
//!
//! # Responsibility
//! - Implement `DocumentStore` without a network, for tests and local runs.
//! - Mirror remote-store semantics: generated ids, server timestamps,
//!   merge updates and equality count queries.
//!
//! # Invariants
//! - Server timestamps are strictly increasing within one store instance.
//! - The internal lock is never held across an `.await`.

use super::{
    Document, DocumentStore, Fields, SortDirection, StoreError, StoreResult, WriteFields,
    WriteValue,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct StoreState {
    collections: HashMap<String, BTreeMap<String, Fields>>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl StoreState {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::nanoseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }

    fn resolve(&mut self, fields: WriteFields) -> Fields {
        let mut resolved = Fields::new();
        let mut timestamp = None;
        for (key, value) in fields {
            let value = match value {
                WriteValue::Value(value) => value,
                // One write gets one server time for every sentinel field.
                WriteValue::ServerTimestamp => {
                    let at = *timestamp.get_or_insert_with(|| self.next_timestamp());
                    Value::String(at.to_rfc3339_opts(SecondsFormat::Nanos, true))
                }
            };
            resolved.insert(key, value);
        }
        resolved
    }
}

/// `DocumentStore` backed by process memory.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    state: Mutex<StoreState>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.lock()
            .map(|state| state.collections.get(collection).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Transport("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, fields: WriteFields) -> StoreResult<String> {
        let mut state = self.lock()?;
        let id = Uuid::new_v4().simple().to_string();
        let resolved = state.resolve(fields);
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), resolved);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let state = self.lock()?;
        Ok(state
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn list_all(
        &self,
        collection: &str,
        order_by: &str,
        direction: SortDirection,
    ) -> StoreResult<Vec<Document>> {
        let state = self.lock()?;
        let mut documents: Vec<Document> = state
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        documents.sort_by(|a, b| {
            let ordering =
                compare_field(a.fields.get(order_by), b.fields.get(order_by)).then(a.id.cmp(&b.id));
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        Ok(documents)
    }

    async fn merge_update(
        &self,
        collection: &str,
        id: &str,
        fields: WriteFields,
    ) -> StoreResult<()> {
        let mut state = self.lock()?;
        let exists = state
            .collections
            .get(collection)
            .is_some_and(|docs| docs.contains_key(id));
        if !exists {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }

        let resolved = state.resolve(fields);
        if let Some(document) = state
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
        {
            document.extend(resolved);
        }
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut state = self.lock()?;
        if let Some(docs) = state.collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn count(&self, collection: &str, field: &str, value: &Value) -> StoreResult<u64> {
        let state = self.lock()?;
        let count = state.collections.get(collection).map_or(0, |docs| {
            docs.values()
                .filter(|fields| fields.get(field) == Some(value))
                .count()
        });
        Ok(count as u64)
    }
}

/// Orders missing/null < bool < number < string < everything else.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}
