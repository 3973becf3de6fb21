//! Royal Bike Club Core - Shared types library.
//!
//! This crate provides the domain value types used across the workspace:
//! - `storefront` - Public rental and shop site
//! - `cli` - Migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. Validation that has to hold everywhere (emails, rental
//! durations, money) lives here so every layer parses the same way.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, prices and rental durations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
