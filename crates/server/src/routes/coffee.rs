//! Coffee route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use bson::{Bson, Document};
use coffee_core::{COFFEE_FIELDS, CoffeeId, DeleteOutcome, InsertOutcome, UpdateOutcome};
use serde_json::{Map, Value};

use crate::db::{self, convert};
use crate::error::Result;
use crate::state::AppState;

/// List every coffee item.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>> {
    let documents = state.coffee().list_all().await?;
    Ok(Json(
        documents.into_iter().map(convert::document_to_json).collect(),
    ))
}

/// Fetch one coffee item; `null` when no document has the id.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let id = CoffeeId::parse(&id)?;
    let document = state.coffee().find_one(db::by_id(id)).await?;
    Ok(Json(document.map_or(Value::Null, convert::document_to_json)))
}

/// Insert the request body as a new coffee item.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<InsertOutcome>> {
    let document = convert::object_to_document(&body)?;
    let outcome = state.coffee().insert_one(document).await?;
    tracing::debug!(inserted_id = %outcome.inserted_id, "Coffee created");
    Ok(Json(outcome))
}

/// Replace the coffee fields of one item, creating it if absent.
///
/// Only [`COFFEE_FIELDS`] are copied from the body.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<UpdateOutcome>> {
    let id = CoffeeId::parse(&id)?;
    let set = coffee_fields(&body)?;
    let outcome = state.coffee().update_one(db::by_id(id), set, true).await?;
    Ok(Json(outcome))
}

/// Delete one coffee item. A missing id reports `deletedCount: 0`.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>> {
    let id = CoffeeId::parse(&id)?;
    let outcome = state.coffee().delete_one(db::by_id(id)).await?;
    Ok(Json(outcome))
}

/// Build the `$set` document for a replace: each whitelisted field, `null`
/// when the body omits it.
fn coffee_fields(body: &Map<String, Value>) -> std::result::Result<Document, db::StoreError> {
    let mut set = Document::new();
    for field in COFFEE_FIELDS {
        let value = match body.get(field) {
            Some(value) => convert::value_to_bson(value)?,
            None => Bson::Null,
        };
        set.insert(field, value);
    }
    Ok(set)
}
