// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for enum token conversion.

use std::fmt;

/// Convenient alias for API results using the public [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by enum token operations.
///
/// All variants are terminal: each one indicates malformed input or a
/// misconfigured type registry, never a transient condition. Messages name
/// the offending literal or type and carry no other state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Token string is empty, ambiguous, or has an unparsable shape.
    MalformedToken(String),
    /// Type name absent from the known-type map and the entire searched
    /// container set, including transitively referenced containers.
    TypeNotFound(String),
    /// A type with the requested name exists but is not an enumeration.
    NotAnEnum(String),
    /// Concrete type found but the literal is not one of its declared
    /// members. `literal` is `None` when no literal was supplied at all.
    LiteralUndefined {
        type_name: String,
        literal: Option<String>,
    },
    /// A raw number was supplied where only a qualified literal can
    /// disambiguate the concrete type.
    NumericNotConvertible(String),
    /// Record field name not declared on the struct descriptor.
    FieldNotFound(String),
    /// Record value shape does not match the declared field kind.
    TypeMismatch { expected: String, found: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedToken(token) => write!(f, "Malformed enum token: '{}'", token),
            Error::TypeNotFound(name) => write!(f, "Cannot find type '{}'", name),
            Error::NotAnEnum(name) => write!(f, "Type '{}' is not an enum", name),
            Error::LiteralUndefined {
                type_name,
                literal: Some(literal),
            } => write!(f, "Value '{}' is not part of enum: {}", literal, type_name),
            Error::LiteralUndefined {
                type_name,
                literal: None,
            } => write!(f, "Literal cannot be empty for enum: {}", type_name),
            Error::NumericNotConvertible(value) => {
                write!(f, "Value '{}' cannot be converted to type: Enum", value)
            }
            Error::FieldNotFound(name) => write!(f, "Field not found: {}", name),
            Error::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_offender() {
        let err = Error::LiteralUndefined {
            type_name: "Durability".into(),
            literal: Some("NonExisting".into()),
        };
        assert_eq!(
            err.to_string(),
            "Value 'NonExisting' is not part of enum: Durability"
        );

        let err = Error::TypeNotFound("Ghost".into());
        assert_eq!(err.to_string(), "Cannot find type 'Ghost'");
    }

    #[test]
    fn test_display_missing_literal() {
        let err = Error::LiteralUndefined {
            type_name: "Durability".into(),
            literal: None,
        };
        assert_eq!(err.to_string(), "Literal cannot be empty for enum: Durability");
    }
}
