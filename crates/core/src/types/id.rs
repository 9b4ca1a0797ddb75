//! Newtype IDs for type-safe record references.
//!
//! Records are addressed by store-generated `ObjectId`s. Use the `define_id!`
//! macro to create wrappers that prevent mixing ids from different collections.

use bson::oid::ObjectId;

/// Error returned when a path segment is not a well-formed store identifier.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid record id {input:?}: {reason}")]
pub struct RecordIdError {
    /// The rejected input.
    pub input: String,
    /// Why the identifier parser rejected it.
    pub reason: String,
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`ObjectId`] with:
/// - `Serialize`/`Deserialize` as the 24-character hex string
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `parse()`, `as_object_id()`
/// - `From<ObjectId>` and `Into<ObjectId>` implementations
///
/// # Example
///
/// ```rust
/// # use coffee_core::define_id;
/// define_id!(TeaId);
///
/// let id = TeaId::parse("64b7f0c2a1b2c3d4e5f60718").unwrap();
/// assert_eq!(id.to_string(), "64b7f0c2a1b2c3d4e5f60718");
/// assert!(TeaId::parse("not-an-id").is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(::bson::oid::ObjectId);

        impl $name {
            /// Generate a fresh identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(::bson::oid::ObjectId::new())
            }

            /// Parse an identifier from its hex representation.
            ///
            /// # Errors
            ///
            /// Returns [`RecordIdError`](crate::RecordIdError) if the input is
            /// not a 24-character hex string.
            pub fn parse(input: &str) -> ::core::result::Result<Self, $crate::RecordIdError> {
                ::bson::oid::ObjectId::parse_str(input)
                    .map(Self)
                    .map_err(|e| $crate::RecordIdError {
                        input: input.to_owned(),
                        reason: e.to_string(),
                    })
            }

            /// Get the underlying `ObjectId`.
            #[must_use]
            pub const fn as_object_id(&self) -> ::bson::oid::ObjectId {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0.to_hex())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::RecordIdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<::bson::oid::ObjectId> for $name {
            fn from(id: ::bson::oid::ObjectId) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::bson::oid::ObjectId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0.to_hex())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&raw).map_err(::serde::de::Error::custom)
            }
        }
    };
}

define_id!(CoffeeId);
define_id!(UserId);

/// Render an `ObjectId` the way ids appear in JSON responses.
#[must_use]
pub fn object_id_hex(id: &ObjectId) -> String {
    id.to_hex()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const VALID: &str = "64b7f0c2a1b2c3d4e5f60718";

    #[test]
    fn test_parse_valid_id() {
        let id = CoffeeId::parse(VALID).unwrap();
        assert_eq!(id.to_string(), VALID);
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for input in ["", "123", "not-an-object-id", "64b7f0c2a1b2c3d4e5f6071z", "64b7f0c2a1b2c3d4e5f607189"] {
            let err = UserId::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let id = CoffeeId::parse(VALID).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{VALID}\""));

        let back: CoffeeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        let result: Result<UserId, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(CoffeeId::new(), CoffeeId::new());
    }

    #[test]
    fn test_object_id_round_trip() {
        let oid = ObjectId::parse_str(VALID).unwrap();
        let id = UserId::from(oid);
        assert_eq!(ObjectId::from(id), oid);
        assert_eq!(object_id_hex(&id.as_object_id()), VALID);
    }
}
