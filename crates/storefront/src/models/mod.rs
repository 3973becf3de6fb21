//! Domain models for the storefront.
//!
//! These are validated domain values, separate from database row types.
//! Both collections are owned by the document store; handlers look records
//! up per request and never cache them.

pub mod bike;
pub mod session;
pub mod user;

pub use bike::{Bike, BikeField, NewBike};
pub use session::keys as session_keys;
pub use user::{NewUser, User, UserField};
