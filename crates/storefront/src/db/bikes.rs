//! Bike catalog repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use royal_bike_core::{BikeId, Price};

use super::{Document, DocumentStore, RepositoryError, conflict_or_database};
use crate::models::{Bike, BikeField, NewBike};

const BIKE_COLUMNS: &str = "id, name, description, rental_price, price, image_url, created_at";

impl Document for Bike {
    type Id = BikeId;
    type Draft = NewBike;
    type Field = BikeField;

    const COLLECTION: &'static str = "bikes";

    fn id(&self) -> BikeId {
        self.id
    }

    fn new_id() -> BikeId {
        BikeId::generate()
    }

    fn field_value(&self, field: BikeField) -> &str {
        match field {}
    }

    fn materialize(id: BikeId, draft: NewBike, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            rental_price: Price::usd(draft.rental_price),
            price: Price::usd(draft.price),
            image_url: draft.image_url,
            created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BikeRow {
    id: Uuid,
    name: String,
    description: String,
    rental_price: Decimal,
    price: Decimal,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<BikeRow> for Bike {
    fn from(row: BikeRow) -> Self {
        Self {
            id: BikeId::from(row.id),
            name: row.name,
            description: row.description,
            rental_price: Price::usd(row.rental_price),
            price: Price::usd(row.price),
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// Repository for the `bikes` collection.
#[derive(Clone)]
pub struct BikeRepository {
    pool: PgPool,
}

impl BikeRepository {
    /// Create a new bike repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove every bike from the catalog.
    ///
    /// Used by the seeding CLI before a fresh import.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM bikes").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl DocumentStore<Bike> for BikeRepository {
    async fn insert(&self, draft: NewBike) -> Result<Bike, RepositoryError> {
        let sql = format!(
            "INSERT INTO bikes (id, name, description, rental_price, price, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {BIKE_COLUMNS}"
        );

        let row: BikeRow = sqlx::query_as(&sql)
            .bind(Bike::new_id().as_uuid())
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.rental_price)
            .bind(draft.price)
            .bind(&draft.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_or_database(e, "bike"))?;

        Ok(Bike::from(row))
    }

    async fn find_by_id(&self, id: BikeId) -> Result<Option<Bike>, RepositoryError> {
        let sql = format!("SELECT {BIKE_COLUMNS} FROM bikes WHERE id = $1");

        let row: Option<BikeRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Bike::from))
    }

    async fn find_all(&self) -> Result<Vec<Bike>, RepositoryError> {
        let sql = format!("SELECT {BIKE_COLUMNS} FROM bikes ORDER BY created_at, id");

        let rows: Vec<BikeRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Bike::from).collect())
    }

    async fn find_one(
        &self,
        field: BikeField,
        _value: &str,
    ) -> Result<Option<Bike>, RepositoryError> {
        match field {}
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        super::ping(&self.pool).await
    }
}
