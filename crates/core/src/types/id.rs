//! Newtype document ids for type-safe record references.
//!
//! Records in both collections are keyed by store-assigned UUIDs. Use the
//! `define_id!` macro to create wrappers that prevent passing a user id
//! where a bike id is expected.

/// Macro to define a type-safe document id wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `generate()`, `parse()`, `as_uuid()`
/// - `Display` (hyphenated lowercase) and `From<Uuid>` conversions
///
/// # Example
///
/// ```rust
/// # use royal_bike_core::define_id;
/// define_id!(UserId);
/// define_id!(BikeId);
///
/// let user_id = UserId::generate();
/// assert_eq!(UserId::parse(&user_id.to_string()), Some(user_id));
///
/// // These are different types, so this won't compile:
/// // let _: BikeId = user_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a fresh random id.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Parse an id from its textual form.
            ///
            /// Returns `None` for anything that is not a UUID, so callers can
            /// treat a malformed id exactly like an unknown one.
            #[must_use]
            pub fn parse(s: &str) -> Option<Self> {
                ::uuid::Uuid::parse_str(s.trim()).ok().map(Self)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId);
define_id!(BikeId);
