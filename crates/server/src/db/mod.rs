//! Document store access for the `coffee` and `users` collections.
//!
//! # Collections
//!
//! - `coffee` - Coffee items (`name`, `supplier`, `category`, `chef`, `taste`,
//!   `details`, `photo`), free-form beyond that
//! - `users` - User records keyed for updates by `email`
//!
//! No schema is enforced here. Documents travel as BSON [`Document`]s and each
//! request performs exactly one collection operation.
//!
//! # Backends
//!
//! - [`mongo::MongoStore`] - MongoDB through one long-lived client
//! - [`memory::MemoryStore`] - Process-local collections for development and tests

pub mod convert;
pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use bson::{Document, doc, oid::ObjectId};
use coffee_core::{DeleteOutcome, ID_FIELD, InsertOutcome, UpdateOutcome};
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Errors from document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver or server error from MongoDB.
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A request body could not be represented as BSON.
    #[error("cannot encode document: {0}")]
    Encoding(#[from] bson::ser::Error),

    /// An insert supplied an `_id` that already exists.
    #[error("duplicate key in {collection}: {id}")]
    DuplicateKey { collection: String, id: String },
}

/// One collection of schema-less documents.
///
/// Filters are equality matches on top-level fields. Every method maps to a
/// single store operation; none of them compose.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Collection name, used in logs.
    fn name(&self) -> &str;

    /// Every document in the collection, in natural order.
    async fn list_all(&self) -> Result<Vec<Document>, StoreError>;

    /// First document matching `filter`.
    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError>;

    /// Insert `document`, assigning an `_id` if it has none.
    async fn insert_one(&self, document: Document) -> Result<InsertOutcome, StoreError>;

    /// Apply `set` as a `$set` update to the first document matching `filter`.
    ///
    /// With `upsert`, a missing match inserts a new document built from the
    /// filter's fields and `set`.
    async fn update_one(
        &self,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete the first document matching `filter`.
    async fn delete_one(&self, filter: Document) -> Result<DeleteOutcome, StoreError>;
}

/// A database handle shared by every request.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Handle to the named collection.
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection>;

    /// Round-trip to the server to confirm connectivity.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create the store selected by configuration.
///
/// For MongoDB this parses the connection string (resolving SRV records) and
/// builds the client. It does not wait for a server to answer; call
/// [`DocumentStore::ping`] for that.
///
/// # Errors
///
/// Returns `StoreError::Mongo` if the connection string cannot be parsed or
/// resolved.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match &config.backend {
        StoreBackend::Mongo { uri } => {
            let store = MongoStore::connect(uri, &config.database).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Create the configured store and wait for the deployment to answer.
///
/// The MongoDB client connects lazily, so the ping is the first contact with
/// a server. Either step failing fails the whole startup sequence.
///
/// # Errors
///
/// Returns the error from [`connect`] or from the ping.
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    verify(connect(config).await?).await
}

/// Ping `store`, handing it back only if it answered.
///
/// # Errors
///
/// Returns the ping error.
pub async fn verify(store: Arc<dyn DocumentStore>) -> Result<Arc<dyn DocumentStore>, StoreError> {
    store.ping().await?;
    tracing::info!("Pinged your deployment. You successfully connected to MongoDB!");
    Ok(store)
}

/// Filter selecting a document by its primary key.
#[must_use]
pub fn by_id(id: impl Into<ObjectId>) -> Document {
    let id: ObjectId = id.into();
    doc! { ID_FIELD: id }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Memory-backed store whose deployment never answers.
    struct Unreachable(MemoryStore);

    #[async_trait]
    impl DocumentStore for Unreachable {
        fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
            self.0.collection(name)
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Encoding(<bson::ser::Error as serde::ser::Error>::custom(
                "server selection timed out",
            )))
        }
    }

    #[tokio::test]
    async fn test_verify_keeps_answering_store() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        assert!(verify(store).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_rejects_silent_store() {
        let store: Arc<dyn DocumentStore> = Arc::new(Unreachable(MemoryStore::new()));
        let err = verify(store).await.err().unwrap();
        assert!(err.to_string().contains("server selection timed out"));
    }

    #[tokio::test]
    async fn test_open_memory_backend() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            database: "coffeeDB".to_string(),
        };
        let store = open(&config).await.unwrap();
        assert!(store.collection("coffee").list_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_by_id_filter() {
        let id = ObjectId::new();
        assert_eq!(by_id(id), doc! { "_id": id });
    }
}
