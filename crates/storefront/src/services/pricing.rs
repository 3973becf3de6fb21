//! Rental quotes and purchase receipts.
//!
//! Nothing here is persisted. Every rental step re-derives its quote through
//! [`price_rental`] from the bike id and duration it was handed, so a total
//! posted back by the browser is only ever compared, never used.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use royal_bike_core::{BikeId, Price, RentalDays, RentalDaysError};

use crate::models::Bike;

/// Errors from pricing a rental.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The requested duration is not a valid number of days.
    #[error(transparent)]
    InvalidDays(#[from] RentalDaysError),

    /// The total does not fit in a decimal.
    #[error("rental total overflowed")]
    Overflow,
}

/// The canonical price of renting one bike for a number of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalQuote {
    pub bike_id: BikeId,
    pub bike_name: String,
    pub daily_rate: Price,
    pub days: RentalDays,
    pub total: Price,
}

impl RentalQuote {
    /// Whether a client-reported total agrees with this quote.
    ///
    /// Accepts plain decimals and a leading currency symbol ("30", "$30.00").
    #[must_use]
    pub fn matches_total(&self, reported: &str) -> bool {
        let reported = reported
            .trim()
            .trim_start_matches(self.total.currency_code.symbol());

        Decimal::from_str(reported).is_ok_and(|amount| amount == self.total.amount)
    }
}

/// What the buyer sees after a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub card_name: String,
    pub bike_name: String,
    pub price: Price,
}

/// Price a rental of `bike` for `days`.
///
/// # Errors
///
/// Returns `PricingError::Overflow` if the total does not fit.
pub fn price_rental(bike: &Bike, days: RentalDays) -> Result<RentalQuote, PricingError> {
    let total = bike
        .rental_price
        .checked_times(days.get())
        .ok_or(PricingError::Overflow)?;

    Ok(RentalQuote {
        bike_id: bike.id,
        bike_name: bike.name.clone(),
        daily_rate: bike.rental_price,
        days,
        total,
    })
}

/// Receipt for buying `bike` outright.
#[must_use]
pub fn quote_purchase(bike: &Bike, card_name: &str) -> PurchaseReceipt {
    PurchaseReceipt {
        card_name: card_name.trim().to_owned(),
        bike_name: bike.name.clone(),
        price: bike.price,
    }
}
