//! Application state shared across handlers.

use std::sync::Arc;

use coffee_core::{COFFEE_COLLECTION, USERS_COLLECTION};

use crate::db::{DocumentCollection, DocumentStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store handle inside is
/// created once at startup and reused by every request; it is never torn down.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn DocumentStore>,
    coffee: Arc<dyn DocumentCollection>,
    users: Arc<dyn DocumentCollection>,
}

impl AppState {
    /// Create a new application state over an already connected store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let coffee = store.collection(COFFEE_COLLECTION);
        let users = store.collection(USERS_COLLECTION);

        Self {
            inner: Arc::new(AppStateInner {
                store,
                coffee,
                users,
            }),
        }
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    /// Get the `coffee` collection.
    #[must_use]
    pub fn coffee(&self) -> &dyn DocumentCollection {
        self.inner.coffee.as_ref()
    }

    /// Get the `users` collection.
    #[must_use]
    pub fn users(&self) -> &dyn DocumentCollection {
        self.inner.users.as_ref()
    }
}
