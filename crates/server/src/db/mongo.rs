//! MongoDB backend.
//!
//! One `Client` is built at startup and shared by every request. The driver
//! pools connections internally, so collection handles are cheap clones of it.
//! The client is configured with Stable API v1 (strict, deprecation errors).

use std::sync::Arc;

use async_trait::async_trait;
use bson::{Document, doc};
use coffee_core::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};
use secrecy::{ExposeSecret, SecretString};

use super::convert::bson_to_json;
use super::{DocumentCollection, DocumentStore, StoreError};

/// Store backed by a MongoDB deployment.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Parse `uri` and build the shared client for `database`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Mongo` if the connection string is invalid or its
    /// SRV record cannot be resolved.
    pub async fn connect(uri: &SecretString, database: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri.expose_secret()).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options)?;
        let database = client.database(database);

        tracing::info!(database = %database.name(), "MongoDB client created");
        Ok(Self { client, database })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(MongoCollection {
            inner: self.database.collection::<Document>(name),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

/// Handle to one MongoDB collection of raw documents.
pub struct MongoCollection {
    inner: Collection<Document>,
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn list_all(&self) -> Result<Vec<Document>, StoreError> {
        let cursor = self.inner.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self.inner.find_one(filter).await?)
    }

    async fn insert_one(&self, document: Document) -> Result<InsertOutcome, StoreError> {
        let result = self.inner.insert_one(document).await?;
        Ok(InsertOutcome::new(bson_to_json(result.inserted_id)))
    }

    async fn update_one(
        &self,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .inner
            .update_one(filter, doc! { "$set": set })
            .upsert(upsert)
            .await?;

        Ok(UpdateOutcome::new(
            result.matched_count,
            result.modified_count,
            result.upserted_id.map(bson_to_json),
        ))
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteOutcome, StoreError> {
        let result = self.inner.delete_one(filter).await?;
        Ok(DeleteOutcome::new(result.deleted_count))
    }
}
