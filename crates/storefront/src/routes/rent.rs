//! Rental route handlers.
//!
//! Every step of the rental flow is handed a bike id and a duration and
//! re-derives the quote through [`price_rental`]. Totals posted back by the
//! browser are compared against the quote and otherwise ignored.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use royal_bike_core::RentalDays;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CurrentUserName;
use crate::routes::required_bike_id;
use crate::services::{PricingError, RentalQuote, price_rental};
use crate::state::AppState;

use super::shop::{BikeView, PaymentTemplate};

// =============================================================================
// View Types
// =============================================================================

/// Rental quote display data for templates.
#[derive(Clone)]
pub struct QuoteView {
    pub bike_id: String,
    pub bike_name: String,
    pub daily_rate: String,
    pub days: u32,
    pub total: String,
}

impl From<&RentalQuote> for QuoteView {
    fn from(quote: &RentalQuote) -> Self {
        Self {
            bike_id: quote.bike_id.to_string(),
            bike_name: quote.bike_name.clone(),
            daily_rate: quote.daily_rate.display(),
            days: quote.days.get(),
            total: quote.total.display(),
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Duration posted from the rental detail page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DaysForm {
    pub days: String,
}

/// Query parameters for the checkout page.
#[derive(Debug, Deserialize)]
pub struct CheckoutQuery {
    pub days: Option<String>,
}

/// Rental step form data, posted by the checkout and payment pages.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RentalForm {
    pub bike_id: Option<String>,
    pub days: String,
    pub total_price: Option<String>,
}

/// Final rental confirmation form data.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompleteRentForm {
    pub user_name: String,
    pub bike_id: Option<String>,
    pub number_of_days: String,
    pub total_payment: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Rental listing template.
#[derive(Template, WebTemplate)]
#[template(path = "rent.html")]
pub struct RentTemplate {
    pub user_name: Option<String>,
    pub bikes: Vec<BikeView>,
}

/// "Rent now" listing template.
#[derive(Template, WebTemplate)]
#[template(path = "rent_now.html")]
pub struct RentNowTemplate {
    pub user_name: Option<String>,
    pub bikes: Vec<BikeView>,
}

/// Rental detail template with the duration form.
#[derive(Template, WebTemplate)]
#[template(path = "rent_details.html")]
pub struct RentDetailsTemplate {
    pub user_name: Option<String>,
    pub bike: BikeView,
    pub max_days: u32,
}

/// Checkout template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub user_name: Option<String>,
    pub quote: QuoteView,
}

/// Rental payment template.
#[derive(Template, WebTemplate)]
#[template(path = "rent_payment.html")]
pub struct RentPaymentTemplate {
    pub user_name: Option<String>,
    pub quote: QuoteView,
}

/// Rental confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "thank_you_rent.html")]
pub struct ThankYouRentTemplate {
    pub user_name: Option<String>,
    pub quote: QuoteView,
}

// =============================================================================
// Helpers
// =============================================================================

/// Look up the bike and price the rental.
async fn quote_rental(state: &AppState, bike_id: &str, days: RentalDays) -> Result<RentalQuote> {
    let bike = state.catalog().get_bike(bike_id).await?;
    Ok(price_rental(&bike, days)?)
}

/// Parse a posted duration, surfacing failures as 400.
fn parse_days(raw: &str) -> Result<RentalDays> {
    RentalDays::parse(raw).map_err(|e| PricingError::from(e).into())
}

/// Log when the browser's idea of the total disagrees with the quote.
fn check_reported_total(quote: &RentalQuote, reported: Option<&str>) {
    if let Some(reported) = reported
        && !quote.matches_total(reported)
    {
        tracing::warn!(
            bike_id = %quote.bike_id,
            reported,
            expected = %quote.total,
            "Client total does not match quote"
        );
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the rental listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CurrentUserName(user_name): CurrentUserName,
) -> Result<impl IntoResponse> {
    let bikes = state.catalog().list_bikes().await?;

    Ok(RentTemplate {
        user_name,
        bikes: bikes.iter().map(BikeView::from).collect(),
    })
}

/// Display the "rent now" listing.
#[instrument(skip(state))]
pub async fn rent_now(
    State(state): State<AppState>,
    CurrentUserName(user_name): CurrentUserName,
) -> Result<impl IntoResponse> {
    let bikes = state.catalog().list_bikes().await?;

    Ok(RentNowTemplate {
        user_name,
        bikes: bikes.iter().map(BikeView::from).collect(),
    })
}

/// Display a bike's rental detail.
#[instrument(skip(state))]
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUserName(user_name): CurrentUserName,
) -> Result<impl IntoResponse> {
    let bike = state.catalog().get_bike(&id).await?;

    Ok(RentDetailsTemplate {
        user_name,
        bike: BikeView::from(&bike),
        max_days: RentalDays::MAX,
    })
}

/// Handle the duration form and show the checkout.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUserName(user_name): CurrentUserName,
    Form(form): Form<DaysForm>,
) -> Result<impl IntoResponse> {
    let days = parse_days(&form.days)?;
    let quote = quote_rental(&state, &id, days).await?;

    Ok(CheckoutTemplate {
        user_name,
        quote: QuoteView::from(&quote),
    })
}

/// Display the checkout for a linked bike, one day unless `?days=` says otherwise.
///
/// A blank `?days=` counts as absent.
#[instrument(skip(state))]
pub async fn checkout_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CheckoutQuery>,
    CurrentUserName(user_name): CurrentUserName,
) -> Result<impl IntoResponse> {
    let days = match query.days.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => parse_days(raw)?,
        None => RentalDays::ONE,
    };
    let quote = quote_rental(&state, &id, days).await?;

    Ok(CheckoutTemplate {
        user_name,
        quote: QuoteView::from(&quote),
    })
}

/// Handle the checkout form and show the payment page.
#[instrument(skip(state))]
pub async fn process_rental(
    State(state): State<AppState>,
    CurrentUserName(user_name): CurrentUserName,
    Form(form): Form<RentalForm>,
) -> Result<impl IntoResponse> {
    let bike_id = required_bike_id(form.bike_id.as_deref())?;
    let days = parse_days(&form.days)?;

    let bike = state.catalog().get_bike(bike_id).await?;
    let quote = price_rental(&bike, days)?;
    check_reported_total(&quote, form.total_price.as_deref());

    Ok(PaymentTemplate {
        user_name,
        bike: BikeView::from(&bike),
        quote: Some(QuoteView::from(&quote)),
    })
}

/// Display the rental payment form.
#[instrument(skip(state))]
pub async fn rent_payment(
    State(state): State<AppState>,
    CurrentUserName(user_name): CurrentUserName,
    Form(form): Form<RentalForm>,
) -> Result<impl IntoResponse> {
    let bike_id = required_bike_id(form.bike_id.as_deref())?;
    let days = parse_days(&form.days)?;
    let quote = quote_rental(&state, bike_id, days).await?;
    check_reported_total(&quote, form.total_price.as_deref());

    Ok(RentPaymentTemplate {
        user_name,
        quote: QuoteView::from(&quote),
    })
}

/// Handle the rental payment form and show the confirmation.
///
/// The renter's name comes from the form, falling back to the session.
#[instrument(skip(state))]
pub async fn complete_rent(
    State(state): State<AppState>,
    CurrentUserName(session_name): CurrentUserName,
    Form(form): Form<CompleteRentForm>,
) -> Result<impl IntoResponse> {
    let bike_id = required_bike_id(form.bike_id.as_deref())?;
    let days = parse_days(&form.number_of_days)?;
    let quote = quote_rental(&state, bike_id, days).await?;
    check_reported_total(&quote, form.total_payment.as_deref());

    let user_name = Some(form.user_name.trim().to_owned())
        .filter(|n| !n.is_empty())
        .or(session_name);

    add_breadcrumb("rent", "Rental confirmed", Some(&[("bike_id", bike_id)]));
    tracing::info!(bike_id = %quote.bike_id, days = quote.days.get(), "Rental confirmed");

    Ok(ThankYouRentTemplate {
        user_name,
        quote: QuoteView::from(&quote),
    })
}
