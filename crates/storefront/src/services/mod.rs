//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Bike listing and lookup
//! - `auth` - Registration, login and the session display name
//! - `pricing` - Rental quotes and purchase receipts
//! - `session` - The per-request session capability passed into services
//!
//! Services borrow their collaborators from `AppState` for the duration of
//! one request and hold no state of their own.

pub mod auth;
pub mod catalog;
pub mod pricing;
pub mod session;

pub use auth::{AccountService, Argon2Hasher, AuthError, PasswordHasher, Registration};
pub use catalog::{CatalogError, CatalogService};
pub use pricing::{PricingError, PurchaseReceipt, RentalQuote, price_rental, quote_purchase};
pub use session::{SessionError, SessionStore};
