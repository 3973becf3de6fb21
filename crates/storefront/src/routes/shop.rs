//! Purchase route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CurrentUserName;
use crate::models::Bike;
use crate::routes::required_bike_id;
use crate::services::{CatalogError, PurchaseReceipt, quote_purchase};
use crate::state::AppState;

use super::rent::QuoteView;

// =============================================================================
// View Types
// =============================================================================

/// Bike display data for templates.
#[derive(Clone)]
pub struct BikeView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rental_price: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl From<&Bike> for BikeView {
    fn from(bike: &Bike) -> Self {
        Self {
            id: bike.id.to_string(),
            name: bike.name.clone(),
            description: bike.description.clone(),
            rental_price: bike.rental_price.display(),
            price: bike.price.display(),
            image_url: bike.image_url.clone(),
        }
    }
}

/// Purchase confirmation display data.
#[derive(Clone)]
pub struct ReceiptView {
    pub card_name: String,
    pub bike_name: String,
    pub price: String,
}

impl From<&PurchaseReceipt> for ReceiptView {
    fn from(receipt: &PurchaseReceipt) -> Self {
        Self {
            card_name: receipt.card_name.clone(),
            bike_name: receipt.bike_name.clone(),
            price: receipt.price.display(),
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Query parameters for the payment page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    pub bike_id: Option<String>,
}

/// Purchase form data.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseForm {
    pub card_name: String,
    pub bike_id: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Shop listing template.
#[derive(Template, WebTemplate)]
#[template(path = "shop.html")]
pub struct ShopTemplate {
    pub user_name: Option<String>,
    pub bikes: Vec<BikeView>,
}

/// Purchase detail template.
#[derive(Template, WebTemplate)]
#[template(path = "buy_now.html")]
pub struct BuyNowTemplate {
    pub user_name: Option<String>,
    pub bike: BikeView,
}

/// Payment page template.
///
/// Rendered for a purchase (no quote) and by the rental flow (with quote).
#[derive(Template, WebTemplate)]
#[template(path = "payment.html")]
pub struct PaymentTemplate {
    pub user_name: Option<String>,
    pub bike: BikeView,
    pub quote: Option<QuoteView>,
}

/// Purchase confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "thank_you.html")]
pub struct ThankYouTemplate {
    pub user_name: Option<String>,
    pub receipt: ReceiptView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the bike listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CurrentUserName(user_name): CurrentUserName,
) -> Result<impl IntoResponse> {
    let bikes = state.catalog().list_bikes().await?;

    Ok(ShopTemplate {
        user_name,
        bikes: bikes.iter().map(BikeView::from).collect(),
    })
}

/// Display a bike's purchase detail.
///
/// A missing bike sends the shopper back to the listing.
#[instrument(skip(state))]
pub async fn buy_now(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUserName(user_name): CurrentUserName,
) -> Result<Response> {
    match state.catalog().get_bike(&id).await {
        Ok(bike) => Ok(BuyNowTemplate {
            user_name,
            bike: BikeView::from(&bike),
        }
        .into_response()),
        Err(CatalogError::NotFound) => {
            tracing::debug!(bike_id = %id, "Bike not found, redirecting to shop");
            Ok(Redirect::to("/shop").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Display the purchase payment form.
#[instrument(skip(state))]
pub async fn payment(
    State(state): State<AppState>,
    Query(query): Query<PaymentQuery>,
    CurrentUserName(user_name): CurrentUserName,
) -> Result<impl IntoResponse> {
    let bike_id = required_bike_id(query.bike_id.as_deref())?;
    let bike = state.catalog().get_bike(bike_id).await?;

    Ok(PaymentTemplate {
        user_name,
        bike: BikeView::from(&bike),
        quote: None,
    })
}

/// Handle the purchase form and show the confirmation.
#[instrument(skip(state, form))]
pub async fn process_purchase(
    State(state): State<AppState>,
    CurrentUserName(user_name): CurrentUserName,
    Form(form): Form<PurchaseForm>,
) -> Result<impl IntoResponse> {
    let bike_id = required_bike_id(form.bike_id.as_deref())?;
    let bike = state.catalog().get_bike(bike_id).await?;
    let receipt = quote_purchase(&bike, &form.card_name);

    add_breadcrumb("shop", "Purchase confirmed", Some(&[("bike_id", bike_id)]));
    tracing::info!(bike_id = %bike.id, "Purchase confirmed");

    Ok(ThankYouTemplate {
        user_name,
        receipt: ReceiptView::from(&receipt),
    })
}
