// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Representative synthesis for qualified encoding.
//!
//! The delegate name codec prints values strictly through "declared member
//! name for this concrete type" lookups; it cannot be told to print an
//! assumed name for a foreign value. A representative is a minimal one-off
//! enum descriptor whose sole variant is named with the full qualified token
//! `"<TypeName>.<Literal>"`, so delegating a representative value yields
//! exactly the qualified text with no codec-side prefixing.
//!
//! Representatives are memoized by the qualified token: each distinct
//! literal gets exactly one descriptor for the cache's lifetime, and entries
//! are never mutated once created -- the same instance may serve unrelated
//! concurrent writes.

use crate::descriptor::{EnumDescriptor, EnumValue, EnumVariant, UnderlyingKind};
use crate::token::SEPARATOR;
use dashmap::DashMap;
use std::sync::Arc;

/// Append-only cache of representative descriptors keyed by qualified token.
#[derive(Debug, Default)]
pub struct RepresentativeCache {
    entries: DashMap<String, Arc<EnumDescriptor>>,
}

impl RepresentativeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or build the representative value for `(type_name, literal)`.
    ///
    /// The stored constant is `value` reinterpreted in `underlying`, so the
    /// representative matches the original value's numeric storage.
    pub fn synthesize(
        &self,
        type_name: &str,
        underlying: UnderlyingKind,
        literal: &str,
        value: i64,
    ) -> EnumValue {
        let key = format!("{}{}{}", type_name, SEPARATOR, literal);
        let stored = underlying.reinterpret(value);
        let descriptor = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| {
                log::debug!("synthesizing representative for '{}'", key);
                Arc::new(
                    EnumDescriptor::new(type_name, vec![EnumVariant::new(key.clone(), stored)])
                        .with_underlying(underlying),
                )
            })
            .value()
            .clone();
        EnumValue::from_value(&descriptor, stored)
    }

    /// Number of cached representatives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been synthesized yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesize_single_qualified_variant() {
        let cache = RepresentativeCache::new();
        let rep = cache.synthesize("Durability", UnderlyingKind::I32, "Volatile", 0);

        assert_eq!(rep.type_name(), "Durability");
        assert_eq!(rep.value(), 0);
        assert_eq!(rep.literal_name(), Some("Durability.Volatile"));
        assert_eq!(rep.descriptor().variants.len(), 1);
    }

    #[test]
    fn test_synthesize_is_memoized() {
        let cache = RepresentativeCache::new();
        let first = cache.synthesize("Durability", UnderlyingKind::I32, "Volatile", 0);
        let second = cache.synthesize("Durability", UnderlyingKind::I32, "Volatile", 0);

        assert!(Arc::ptr_eq(first.descriptor(), second.descriptor()));
        assert_eq!(cache.len(), 1);

        cache.synthesize("Durability", UnderlyingKind::I32, "TransientLocal", 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_synthesize_reinterprets_underlying() {
        let cache = RepresentativeCache::new();
        let rep = cache.synthesize("Flags", UnderlyingKind::U8, "Overflow", 300);
        assert_eq!(rep.value(), 44);
        assert_eq!(rep.descriptor().underlying, UnderlyingKind::U8);
    }
}
