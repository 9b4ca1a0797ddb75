//! User route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use bson::{Bson, doc};
use coffee_core::{
    DeleteOutcome, InsertOutcome, USER_EMAIL_FIELD, USER_LAST_SIGN_IN_FIELD, UpdateOutcome,
    UserId,
};
use serde_json::{Map, Value};

use crate::db::{self, convert};
use crate::error::Result;
use crate::state::AppState;

/// List every user record.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>> {
    let documents = state.users().list_all().await?;
    Ok(Json(
        documents.into_iter().map(convert::document_to_json).collect(),
    ))
}

/// Insert the request body as a new user record.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<InsertOutcome>> {
    let document = convert::object_to_document(&body)?;
    let outcome = state.users().insert_one(document).await?;
    tracing::debug!(inserted_id = %outcome.inserted_id, "User created");
    Ok(Json(outcome))
}

/// Set `lastSignIn` on the first user whose `email` matches the body's.
///
/// Never inserts: an unknown email reports `matchedCount: 0`.
pub async fn record_sign_in(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<UpdateOutcome>> {
    let email = field(&body, USER_EMAIL_FIELD)?;
    let last_sign_in = field(&body, USER_LAST_SIGN_IN_FIELD)?;

    let outcome = state
        .users()
        .update_one(
            doc! { USER_EMAIL_FIELD: email },
            doc! { USER_LAST_SIGN_IN_FIELD: last_sign_in },
            false,
        )
        .await?;

    if outcome.matched_count == 0 {
        tracing::debug!(collection = state.users().name(), "Sign-in update matched no user");
    }
    Ok(Json(outcome))
}

/// Delete one user record. A missing id reports `deletedCount: 0`.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>> {
    let id = UserId::parse(&id)?;
    let outcome = state.users().delete_one(db::by_id(id)).await?;
    Ok(Json(outcome))
}

/// A body field as BSON, `null` when absent.
fn field(body: &Map<String, Value>, key: &str) -> std::result::Result<Bson, db::StoreError> {
    body.get(key).map_or(Ok(Bson::Null), convert::value_to_bson)
}
