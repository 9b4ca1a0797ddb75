//! In-memory document store (for development/testing).
//!
//! Mirrors the single-document semantics of the MongoDB backend for the
//! operations the router uses: equality filters (a `null` filter value also
//! matches a missing field), `$set` updates, and upserts seeded from the filter.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::{Bson, Document, doc, oid::ObjectId};
use coffee_core::{DeleteOutcome, ID_FIELD, InsertOutcome, UpdateOutcome};
use parking_lot::{Mutex, RwLock};

use super::convert::bson_to_json;
use super::{DocumentCollection, DocumentStore, StoreError};

/// In-memory store holding any number of named collections.
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Arc<MemoryCollection>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        let mut collections = self.collections.lock();
        let collection = collections
            .entry(name.to_owned())
            .or_insert_with(|| Arc::new(MemoryCollection::new(name)));
        Arc::clone(collection) as Arc<dyn DocumentCollection>
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A single collection; documents kept in insertion order.
pub struct MemoryCollection {
    name: String,
    documents: RwLock<Vec<Document>>,
}

impl MemoryCollection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            documents: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents.read().clone())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self
            .documents
            .read()
            .iter()
            .find(|document| matches(document, &filter))
            .cloned())
    }

    async fn insert_one(&self, document: Document) -> Result<InsertOutcome, StoreError> {
        let mut documents = self.documents.write();

        let document = with_id(document);
        let id = document.get(ID_FIELD).cloned().unwrap_or(Bson::Null);

        if documents.iter().any(|existing| existing.get(ID_FIELD) == Some(&id)) {
            return Err(StoreError::DuplicateKey {
                collection: self.name.clone(),
                id: id.to_string(),
            });
        }

        documents.push(document);
        Ok(InsertOutcome::new(bson_to_json(id)))
    }

    async fn update_one(
        &self,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut documents = self.documents.write();

        if let Some(existing) = documents
            .iter_mut()
            .find(|document| matches(document, &filter))
        {
            let mut modified = false;
            for (key, value) in set {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateOutcome::new(1, u64::from(modified), None));
        }

        if !upsert {
            return Ok(UpdateOutcome::unmatched());
        }

        let mut seeded = filter;
        for (key, value) in set {
            seeded.insert(key, value);
        }
        let document = with_id(seeded);
        let id = document.get(ID_FIELD).cloned().unwrap_or(Bson::Null);
        documents.push(document);

        Ok(UpdateOutcome::new(0, 0, Some(bson_to_json(id))))
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteOutcome, StoreError> {
        let mut documents = self.documents.write();

        let position = documents
            .iter()
            .position(|document| matches(document, &filter));

        Ok(position.map_or_else(
            || DeleteOutcome::new(0),
            |index| {
                documents.remove(index);
                DeleteOutcome::new(1)
            },
        ))
    }
}

/// Equality match on every filter field.
fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match document.get(key) {
        Some(actual) => actual == expected,
        None => *expected == Bson::Null,
    })
}

/// Ensure `_id` is present and first, generating one if needed.
fn with_id(document: Document) -> Document {
    if document.contains_key(ID_FIELD) {
        return document;
    }
    let mut stored = doc! { ID_FIELD: ObjectId::new() };
    for (key, value) in document {
        stored.insert(key, value);
    }
    stored
}
