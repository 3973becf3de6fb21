//! Session-related types.
//!
//! The session bag carries a single field: the authenticated user's first
//! name, used to personalize pages.

/// Session keys for authentication data.
pub mod keys {
    /// Key for the display name (first name) of the logged-in user.
    pub const USER_NAME: &str = "userName";
}
