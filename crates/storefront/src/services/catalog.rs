//! Bike catalog service.

use thiserror::Error;

use royal_bike_core::BikeId;

use crate::db::{DocumentStore, RepositoryError};
use crate::models::Bike;

/// Errors from catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No bike with that id (including ids that are not UUIDs).
    #[error("Bike not found")]
    NotFound,

    /// The bike collection could not be read.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),
}

/// Read-only access to the bike catalog.
pub struct CatalogService<'a> {
    bikes: &'a dyn DocumentStore<Bike>,
}

impl<'a> CatalogService<'a> {
    #[must_use]
    pub const fn new(bikes: &'a dyn DocumentStore<Bike>) -> Self {
        Self { bikes }
    }

    /// Every bike in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StoreUnavailable` if the store fails.
    pub async fn list_bikes(&self) -> Result<Vec<Bike>, CatalogError> {
        Ok(self.bikes.find_all().await?)
    }

    /// Look up a bike by its opaque id string.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id is malformed or unknown.
    /// Returns `CatalogError::StoreUnavailable` if the store fails.
    pub async fn get_bike(&self, id: &str) -> Result<Bike, CatalogError> {
        let Some(id) = BikeId::parse(id) else {
            tracing::debug!(bike_id = id, "Malformed bike id");
            return Err(CatalogError::NotFound);
        };

        self.bikes
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::db::MemoryStore;
    use crate::models::NewBike;

    fn bike(name: &str, rate: i64) -> NewBike {
        NewBike {
            name: name.to_string(),
            description: String::new(),
            rental_price: Decimal::from(rate),
            price: Decimal::from(rate * 80),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_list_bikes_in_catalog_order() {
        let store = MemoryStore::<Bike>::new();
        store.insert(bike("Roadster", 10)).await.unwrap();
        store.insert(bike("Cruiser", 8)).await.unwrap();
        let catalog = CatalogService::new(&store);

        let names: Vec<_> = catalog
            .list_bikes()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Roadster", "Cruiser"]);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let store = MemoryStore::<Bike>::new();
        let catalog = CatalogService::new(&store);

        assert!(catalog.list_bikes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_bike_by_id() {
        let store = MemoryStore::<Bike>::new();
        let roadster = store.insert(bike("Roadster", 10)).await.unwrap();
        let catalog = CatalogService::new(&store);

        let found = catalog.get_bike(&roadster.id.to_string()).await.unwrap();
        assert_eq!(found, roadster);
    }

    #[tokio::test]
    async fn test_get_bike_missing_is_not_found() {
        let store = MemoryStore::<Bike>::new();
        store.insert(bike("Roadster", 10)).await.unwrap();
        let catalog = CatalogService::new(&store);

        let unknown = BikeId::generate().to_string();
        for id in [unknown.as_str(), "not-a-uuid", ""] {
            let err = catalog.get_bike(id).await.unwrap_err();
            assert!(matches!(err, CatalogError::NotFound), "{id:?}");
        }
    }
}
