//! Write results returned to clients.
//!
//! These mirror the acknowledgement objects the document store reports for
//! single-document writes. Ids are carried as JSON values because an inserted
//! body may supply its own `_id` of any type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of inserting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

impl InsertOutcome {
    #[must_use]
    pub const fn new(inserted_id: Value) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Result of updating (or upserting) one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Value>,
}

impl UpdateOutcome {
    /// Build an outcome from the store's counters.
    ///
    /// `upserted_count` is derived from the presence of `upserted_id`.
    #[must_use]
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<Value>) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }

    /// No document matched and nothing was inserted.
    #[must_use]
    pub fn unmatched() -> Self {
        Self::new(0, 0, None)
    }
}

/// Result of deleting one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    #[must_use]
    pub const fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
