// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime enum type information.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Numeric storage kinds for enum underlying values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnderlyingKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    #[default]
    I32,
    I64,
}

impl UnderlyingKind {
    /// Get the size in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
            Self::U64 | Self::I64 => 8,
        }
    }

    /// Returns `true` for signed kinds.
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Reinterpret a raw constant in this storage kind.
    ///
    /// Truncates to the kind's width and re-extends, so an out-of-range
    /// constant lands on the value a cast through the narrow type yields.
    pub fn reinterpret(&self, value: i64) -> i64 {
        match self {
            Self::U8 => i64::from(value as u8),
            Self::U16 => i64::from(value as u16),
            Self::U32 => i64::from(value as u32),
            Self::U64 => value as u64 as i64,
            Self::I8 => i64::from(value as i8),
            Self::I16 => i64::from(value as i16),
            Self::I32 => i64::from(value as i32),
            Self::I64 => value,
        }
    }
}

/// Enum variant: a named literal with a numeric constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    /// Literal name.
    pub name: String,
    /// Literal value.
    pub value: i64,
}

impl EnumVariant {
    /// Create an enum variant.
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Concrete enumeration type: a fixed, named, closed set of literal members
/// with an underlying numeric representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    /// Simple type name (no namespace qualification).
    pub name: String,
    /// Declared literal members.
    pub variants: Vec<EnumVariant>,
    /// Underlying storage kind (default i32).
    pub underlying: UnderlyingKind,
}

impl EnumDescriptor {
    /// Create an enum descriptor with the default underlying kind.
    pub fn new(name: impl Into<String>, variants: Vec<EnumVariant>) -> Self {
        Self {
            name: name.into(),
            variants,
            underlying: UnderlyingKind::default(),
        }
    }

    /// Set the underlying storage kind.
    pub fn with_underlying(mut self, underlying: UnderlyingKind) -> Self {
        self.underlying = underlying;
        self
    }

    /// Get variant by literal name (case-sensitive).
    pub fn variant(&self, name: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Get variant by numeric value.
    pub fn variant_by_value(&self, value: i64) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.value == value)
    }

    /// Iterate declared literal names.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }
}

/// Kind of a type declared in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Enumeration.
    Enum(Arc<EnumDescriptor>),
    /// Any non-enumeration declaration (structs, aliases, ...). Resolving
    /// an enum token against one fails with `NotAnEnum`.
    Opaque,
}

/// A named type declaration inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Simple type name.
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create an enum type declaration (name taken from the descriptor).
    pub fn enum_type(descriptor: Arc<EnumDescriptor>) -> Self {
        Self {
            name: descriptor.name.clone(),
            kind: TypeKind::Enum(descriptor),
        }
    }

    /// Create an opaque (non-enum) type declaration.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Opaque,
        }
    }

    /// Get the enum descriptor if this is an enumeration.
    pub fn as_enum(&self) -> Option<&Arc<EnumDescriptor>> {
        match &self.kind {
            TypeKind::Enum(e) => Some(e),
            TypeKind::Opaque => None,
        }
    }

    /// Check if this is an enumeration.
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }
}

/// A concrete runtime enum value: descriptor plus numeric constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    descriptor: Arc<EnumDescriptor>,
    value: i64,
}

impl EnumValue {
    /// Create a value from a declared literal name.
    pub fn new(descriptor: &Arc<EnumDescriptor>, literal: &str) -> Result<Self> {
        let variant = descriptor
            .variant(literal)
            .ok_or_else(|| Error::LiteralUndefined {
                type_name: descriptor.name.clone(),
                literal: Some(literal.to_string()),
            })?;
        Ok(Self {
            descriptor: descriptor.clone(),
            value: variant.value,
        })
    }

    /// Create a value from a raw numeric constant (unvalidated; the value
    /// may not correspond to any declared member).
    pub fn from_value(descriptor: &Arc<EnumDescriptor>, value: i64) -> Self {
        Self {
            descriptor: descriptor.clone(),
            value,
        }
    }

    /// Get the concrete type descriptor.
    pub fn descriptor(&self) -> &Arc<EnumDescriptor> {
        &self.descriptor
    }

    /// Get the concrete type name.
    pub fn type_name(&self) -> &str {
        &self.descriptor.name
    }

    /// Get the numeric constant.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Get the declared literal name for this value, if any.
    pub fn literal_name(&self) -> Option<&str> {
        self.descriptor
            .variant_by_value(self.value)
            .map(|v| v.name.as_str())
    }

    /// Get the declared literal name, failing with `LiteralUndefined` when
    /// the raw value has no declared member.
    pub fn literal(&self) -> Result<&str> {
        self.literal_name().ok_or_else(|| Error::LiteralUndefined {
            type_name: self.descriptor.name.clone(),
            literal: Some(self.value.to_string()),
        })
    }
}

/// Statically declared field type at an encode/decode position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// Abstract placeholder: holds any concrete enum value but carries no
    /// member set of its own.
    Any,
    /// Concrete enumeration type.
    Concrete(Arc<EnumDescriptor>),
}

impl DeclaredType {
    /// Check if this is the abstract placeholder.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Get the concrete descriptor, if declared.
    pub fn descriptor(&self) -> Option<&Arc<EnumDescriptor>> {
        match self {
            Self::Any => None,
            Self::Concrete(d) => Some(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn durability() -> Arc<EnumDescriptor> {
        Arc::new(EnumDescriptor::new(
            "Durability",
            vec![
                EnumVariant::new("Volatile", 0),
                EnumVariant::new("TransientLocal", 1),
            ],
        ))
    }

    #[test]
    fn test_underlying_size() {
        assert_eq!(UnderlyingKind::U8.size(), 1);
        assert_eq!(UnderlyingKind::I32.size(), 4);
        assert_eq!(UnderlyingKind::U64.size(), 8);
        assert!(UnderlyingKind::I16.is_signed());
        assert!(!UnderlyingKind::U16.is_signed());
    }

    #[test]
    fn test_underlying_reinterpret() {
        assert_eq!(UnderlyingKind::U8.reinterpret(300), 44);
        assert_eq!(UnderlyingKind::I8.reinterpret(255), -1);
        assert_eq!(UnderlyingKind::I64.reinterpret(-5), -5);
        assert_eq!(UnderlyingKind::U32.reinterpret(-1), 4_294_967_295);
    }

    #[test]
    fn test_variant_lookup() {
        let desc = durability();
        assert_eq!(desc.variant("Volatile").map(|v| v.value), Some(0));
        assert_eq!(
            desc.variant_by_value(1).map(|v| v.name.as_str()),
            Some("TransientLocal")
        );
        assert!(desc.variant("volatile").is_none()); // case-sensitive
        assert!(desc.variant_by_value(7).is_none());
    }

    #[test]
    fn test_enum_value_by_literal() {
        let desc = durability();
        let value = EnumValue::new(&desc, "TransientLocal").expect("declared literal");
        assert_eq!(value.value(), 1);
        assert_eq!(value.literal_name(), Some("TransientLocal"));
        assert_eq!(value.type_name(), "Durability");

        let err = EnumValue::new(&desc, "Persistent").unwrap_err();
        assert_eq!(
            err,
            Error::LiteralUndefined {
                type_name: "Durability".into(),
                literal: Some("Persistent".into()),
            }
        );
    }

    #[test]
    fn test_enum_value_raw() {
        let desc = durability();
        let value = EnumValue::from_value(&desc, 42);
        assert_eq!(value.literal_name(), None);
        assert!(value.literal().is_err());
    }

    #[test]
    fn test_declared_type() {
        assert!(DeclaredType::Any.is_abstract());
        assert!(DeclaredType::Any.descriptor().is_none());

        let declared = DeclaredType::Concrete(durability());
        assert!(!declared.is_abstract());
        assert_eq!(declared.descriptor().map(|d| d.name.as_str()), Some("Durability"));
    }

    #[test]
    fn test_type_descriptor() {
        let desc = TypeDescriptor::enum_type(durability());
        assert_eq!(desc.name, "Durability");
        assert!(desc.is_enum());

        let opaque = TypeDescriptor::opaque("SensorReading");
        assert!(!opaque.is_enum());
        assert!(opaque.as_enum().is_none());
    }
}
