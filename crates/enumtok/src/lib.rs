// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # enumtok - Type-qualified enum token codec for JSON
//!
//! A serialization adapter that lets a value known only as an abstract enum
//! supertype round-trip through JSON while preserving its concrete runtime
//! type. Values encode as `"<TypeName>.<Literal>"`; on read the type name is
//! resolved through a prioritized, cached search over registered type
//! containers and the literal is validated against the resolved descriptor.
//!
//! # Quick Start
//!
//! ```rust
//! use enumtok::{
//!     Converter, DeclaredType, EnumDescriptor, EnumValue, EnumVariant, TypeContainer,
//!     TypeDescriptor,
//! };
//! use std::sync::Arc;
//!
//! let color = Arc::new(EnumDescriptor::new(
//!     "Color",
//!     vec![EnumVariant::new("Red", 0), EnumVariant::new("Green", 1)],
//! ));
//!
//! let container = Arc::new(
//!     TypeContainer::new("palette").with_type(Arc::new(TypeDescriptor::enum_type(color.clone()))),
//! );
//!
//! let converter = Converter::builder().container(container).build();
//!
//! let value = EnumValue::new(&color, "Green")?;
//! let token = converter.encode_value(Some(&value), &DeclaredType::Any)?;
//! assert_eq!(token, serde_json::json!("Color.Green"));
//!
//! let decoded = converter.decode_value(&token, &DeclaredType::Any)?;
//! assert_eq!(decoded, Some(value));
//! # Ok::<(), enumtok::Error>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! encode: value -> behavior gate -> literal check -> representative -> name codec -> token
//! decode: token -> parser -> known types / container search (cached) -> literal check -> value
//! ```
//!
//! The two process-wide concerns -- the resolution cache and the
//! representative cache -- are owned by each [`Converter`] rather than held
//! in ambient state, so independent configurations never cross-contaminate.

/// Delegate enum-by-name codec (literal name <-> JSON scalar).
pub mod codec;
/// Type containers, reference loading, and the prioritized search set.
pub mod container;
/// Converter facade and behavior configuration.
pub mod convert;
/// Runtime enum type descriptors and values.
pub mod descriptor;
/// Error types.
pub mod error;
/// Representative synthesis for qualified encoding.
pub mod representative;
/// Type name resolution: allow-list, cache, container search.
pub mod resolve;
/// Record-level integration over struct schemas.
pub mod schema;
/// Compound token parsing.
pub mod token;
/// Literal validation.
pub mod validate;

pub use container::{ContainerLoader, ContainerSet, MapContainerLoader, TypeContainer};
pub use convert::{Behavior, Converter, ConverterBuilder};
pub use descriptor::{
    DeclaredType, EnumDescriptor, EnumValue, EnumVariant, TypeDescriptor, TypeKind, UnderlyingKind,
};
pub use error::{Error, Result};
pub use representative::RepresentativeCache;
pub use resolve::{KnownTypes, LookupStats, TypeCache, TypeResolver};
pub use schema::{FieldDescriptor, FieldKind, FieldValue, Record, StructDescriptor};
pub use token::{EnumToken, SEPARATOR};
