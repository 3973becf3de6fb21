//! Catalog inspection commands.

use royal_bike_storefront::db::{BikeRepository, DocumentStore};

use super::{CliError, connect};

/// Log every bike in catalog order.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn list() -> Result<(), CliError> {
    let pool = connect().await?;
    let bikes = BikeRepository::new(pool).find_all().await?;

    tracing::info!("Bike catalog ({} bikes)", bikes.len());
    for bike in bikes {
        tracing::info!(
            "  {}  {:<20} {:>10}/day {:>10}",
            bike.id,
            bike.name,
            bike.rental_price.display(),
            bike.price.display()
        );
    }

    Ok(())
}
