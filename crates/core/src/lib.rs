//! Coffee Core - Shared types library.
//!
//! This crate provides the types shared by the coffee store components:
//! - `server` - HTTP API over the `coffee` and `users` collections
//! - `integration-tests` - Black-box tests against the assembled router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Record identifiers, write outcomes, and collection field names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
