//! Seed the bike catalog from a YAML file.
//!
//! The file is a list of bikes:
//!
//! ```yaml
//! - name: Roadster
//!   description: Lightweight road bike
//!   rental_price: "10.00"
//!   price: "899.00"
//!   image_url: /static/images/roadster.jpg
//! ```

use rust_decimal::Decimal;
use tracing::info;

use royal_bike_storefront::db::{BikeRepository, DocumentStore};
use royal_bike_storefront::models::{Bike, NewBike};

use super::{CliError, connect};

/// Seed bikes from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog
/// * `clear_existing` - If true, delete every existing bike first
///
/// # Errors
///
/// Returns an error if the file cannot be read or validated, or if database
/// operations fail.
pub async fn bikes(file_path: &str, clear_existing: bool) -> Result<(), CliError> {
    info!(path = %file_path, "Loading bikes from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CliError::Io {
            path: file_path.to_owned(),
            source,
        })?;
    let catalog = parse_catalog(&content)?;
    info!(bikes = catalog.len(), "Catalog validated");

    let repository = BikeRepository::new(connect().await?);

    if clear_existing {
        let removed = repository.delete_all().await?;
        info!(removed, "Cleared existing bikes");
    }

    let inserted = insert_catalog(&repository, catalog).await?;
    info!("Seeding complete! Bikes inserted: {inserted}");

    Ok(())
}

/// Decimal places the `bikes` price columns keep.
const PRICE_SCALE: u32 = 2;

/// Parse and validate a YAML catalog.
fn parse_catalog(content: &str) -> Result<Vec<NewBike>, CliError> {
    let catalog: Vec<NewBike> = serde_yaml::from_str(content)?;

    for (index, bike) in catalog.iter().enumerate() {
        let reason = if bike.name.trim().is_empty() {
            Some("name is empty")
        } else if bike.rental_price < Decimal::ZERO {
            Some("rental_price is negative")
        } else if bike.price < Decimal::ZERO {
            Some("price is negative")
        } else if bike.rental_price.normalize().scale() > PRICE_SCALE {
            Some("rental_price has more than 2 decimal places")
        } else if bike.price.normalize().scale() > PRICE_SCALE {
            Some("price has more than 2 decimal places")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(CliError::InvalidBike {
                index: index + 1,
                name: bike.name.clone(),
                reason,
            });
        }
    }

    Ok(catalog)
}

/// Insert every bike, in file order, through the collection capability.
async fn insert_catalog(
    store: &dyn DocumentStore<Bike>,
    catalog: Vec<NewBike>,
) -> Result<usize, CliError> {
    let mut inserted = 0;
    for draft in catalog {
        let bike = store.insert(draft).await?;
        tracing::debug!(bike_id = %bike.id, name = %bike.name, "Inserted bike");
        inserted += 1;
    }
    Ok(inserted)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use royal_bike_storefront::db::MemoryStore;

    use super::*;

    const SAMPLE: &str = include_str!("../../seed/bikes.yaml");

    #[test]
    fn test_sample_catalog_parses() {
        let catalog = parse_catalog(SAMPLE).unwrap();

        let roadster = catalog.iter().find(|b| b.name == "Roadster").unwrap();
        assert_eq!(roadster.rental_price, Decimal::from(10));
        assert!(catalog.iter().any(|b| b.image_url.is_none()));
    }

    #[test]
    fn test_rejects_invalid_entries() {
        let yaml = r#"
- name: Good
  rental_price: "5"
  price: "100"
- name: ""
  rental_price: "5"
  price: "100"
"#;
        let err = parse_catalog(yaml).unwrap_err();
        assert!(matches!(err, CliError::InvalidBike { index: 2, .. }));

        let yaml = r#"
- name: Backwards
  rental_price: "-1"
  price: "100"
"#;
        assert!(matches!(
            parse_catalog(yaml).unwrap_err(),
            CliError::InvalidBike { reason: "rental_price is negative", .. }
        ));
    }

    #[test]
    fn test_rejects_sub_cent_prices() {
        let yaml = r#"
- name: Fractional
  rental_price: "9.999"
  price: "100"
"#;
        assert!(matches!(
            parse_catalog(yaml).unwrap_err(),
            CliError::InvalidBike { index: 1, reason: "rental_price has more than 2 decimal places", .. }
        ));

        let yaml = r#"
- name: Fractional
  rental_price: "10"
  price: "899.005"
"#;
        assert!(matches!(
            parse_catalog(yaml).unwrap_err(),
            CliError::InvalidBike { reason: "price has more than 2 decimal places", .. }
        ));

        // Trailing zeros are not extra precision
        let yaml = r#"
- name: Padded
  rental_price: "10.5000"
  price: "899.00"
"#;
        assert_eq!(parse_catalog(yaml).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_missing_fields() {
        let yaml = "- name: NoPrice\n";
        assert!(matches!(parse_catalog(yaml).unwrap_err(), CliError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_insert_catalog_keeps_file_order() {
        let store = MemoryStore::<Bike>::new();
        let catalog = parse_catalog(SAMPLE).unwrap();
        let expected: Vec<_> = catalog.iter().map(|b| b.name.clone()).collect();

        let inserted = insert_catalog(&store, catalog).await.unwrap();

        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(inserted, expected.len());
        assert_eq!(names, expected);
    }
}
