// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compound token parsing: `"<TypeName>.<Literal>"` or bare `"<Literal>"`.

use crate::error::{Error, Result};
use std::fmt;

/// Separator between type name and literal name in a qualified token.
pub const SEPARATOR: char = '.';

/// A parsed enum token.
///
/// `type_name` is `None` for the literal-only form. Splitting happens on the
/// FIRST separator occurrence; neither half may be empty. No escaping is
/// defined, so type and literal names must not contain the separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumToken {
    /// Type name, absent in the literal-only form.
    pub type_name: Option<String>,
    /// Literal name.
    pub literal: String,
}

impl EnumToken {
    /// Parse a token string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedToken`] for empty or whitespace-only input
    /// and for qualified tokens with an empty type or literal half.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(Error::MalformedToken(input.to_string()));
        }

        match input.split_once(SEPARATOR) {
            Some((type_name, literal)) => {
                if type_name.is_empty() || literal.is_empty() {
                    return Err(Error::MalformedToken(input.to_string()));
                }
                Ok(Self {
                    type_name: Some(type_name.to_string()),
                    literal: literal.to_string(),
                })
            }
            None => Ok(Self {
                type_name: None,
                literal: input.to_string(),
            }),
        }
    }

    /// Create a qualified token.
    pub fn qualified(type_name: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            literal: literal.into(),
        }
    }

    /// Create a literal-only token.
    pub fn bare(literal: impl Into<String>) -> Self {
        Self {
            type_name: None,
            literal: literal.into(),
        }
    }

    /// Check if the token carries a type name.
    pub fn is_qualified(&self) -> bool {
        self.type_name.is_some()
    }
}

impl fmt::Display for EnumToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_name {
            Some(type_name) => write!(f, "{}{}{}", type_name, SEPARATOR, self.literal),
            None => write!(f, "{}", self.literal),
        }
    }
}
