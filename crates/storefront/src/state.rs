//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::DocumentStore;
use crate::models::{Bike, User};
use crate::services::{AccountService, CatalogService, PasswordHasher};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and hands out the collaborators
/// each request's services borrow.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: Arc<dyn DocumentStore<User>>,
    bikes: Arc<dyn DocumentStore<Bike>>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `users` - The `users` collection
    /// * `bikes` - The `bikes` collection
    /// * `hasher` - Password hasher used for registration and login
    #[must_use]
    pub fn new(
        users: Arc<dyn DocumentStore<User>>,
        bikes: Arc<dyn DocumentStore<Bike>>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                users,
                bikes,
                hasher,
            }),
        }
    }

    /// The `users` collection.
    #[must_use]
    pub fn users(&self) -> &dyn DocumentStore<User> {
        self.inner.users.as_ref()
    }

    /// The `bikes` collection.
    #[must_use]
    pub fn bikes(&self) -> &dyn DocumentStore<Bike> {
        self.inner.bikes.as_ref()
    }

    #[must_use]
    pub fn hasher(&self) -> &dyn PasswordHasher {
        self.inner.hasher.as_ref()
    }

    /// Account service over this state's collaborators.
    #[must_use]
    pub fn accounts(&self) -> AccountService<'_> {
        AccountService::new(self.users(), self.hasher())
    }

    /// Catalog service over this state's bike collection.
    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self.bikes())
    }
}
