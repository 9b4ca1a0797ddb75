//! Core types for the coffee store.
//!
//! This module provides type-safe wrappers for store identifiers and the
//! shapes of write results returned to clients.

pub mod collection;
pub mod id;
pub mod outcome;

pub use collection::*;
pub use id::*;
pub use outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
