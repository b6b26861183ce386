// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Literal validation against declared and resolved types.

use crate::descriptor::{DeclaredType, EnumDescriptor, TypeDescriptor, TypeKind};
use crate::error::{Error, Result};

/// Check that a literal is one of the declared members of an enum.
///
/// A missing literal fails explicitly: a literal must be present to
/// validate.
pub fn check_enum_literal(descriptor: &EnumDescriptor, literal: Option<&str>) -> Result<()> {
    let literal = literal.ok_or_else(|| Error::LiteralUndefined {
        type_name: descriptor.name.clone(),
        literal: None,
    })?;
    if descriptor.variant(literal).is_none() {
        return Err(Error::LiteralUndefined {
            type_name: descriptor.name.clone(),
            literal: Some(literal.to_string()),
        });
    }
    Ok(())
}

/// Check a literal against a resolved type declaration.
///
/// Fails with `NotAnEnum` when the declaration is not an enumeration.
pub fn check_literal(descriptor: &TypeDescriptor, literal: Option<&str>) -> Result<()> {
    match &descriptor.kind {
        TypeKind::Enum(e) => check_enum_literal(e, literal),
        TypeKind::Opaque => Err(Error::NotAnEnum(descriptor.name.clone())),
    }
}

/// Check a literal against a statically declared field type.
///
/// The abstract placeholder has no member set, so validation is deferred
/// until a concrete type is known and succeeds here.
pub fn check_declared(declared: &DeclaredType, literal: Option<&str>) -> Result<()> {
    match declared {
        DeclaredType::Any => Ok(()),
        DeclaredType::Concrete(descriptor) => check_enum_literal(descriptor, literal),
    }
}
