//! Bike catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use royal_bike_core::{BikeId, Price};

/// A bike in the catalog.
///
/// Read-only from the web server's point of view; bikes are created by the
/// seeding CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bike {
    /// Store-assigned id.
    pub id: BikeId,
    pub name: String,
    pub description: String,
    /// Per-day rental rate.
    pub rental_price: Price,
    /// Outright purchase price.
    pub price: Price,
    pub image_url: Option<String>,
    /// Creation time; defines the catalog's natural order.
    pub created_at: DateTime<Utc>,
}

/// A bike that has not been persisted yet.
///
/// Deserializable so catalog seed files map onto it directly.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBike {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rental_price: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Fields of a [`Bike`] that can be looked up directly.
///
/// Bikes are only ever fetched by id, so there are none.
#[allow(clippy::empty_enum)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BikeField {}
