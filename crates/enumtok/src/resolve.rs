// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type name resolution: known-type allow-list, concurrent cache, and the
//! prioritized container search.
//!
//! The cache is keyed by `(container identity, type name)` and records both
//! positive and negative outcomes. Entries are insert-if-absent and never
//! evicted; racing resolutions for the same key compute the same answer, so
//! duplicate work is tolerated and last-write-wins is acceptable.

use crate::container::ContainerSet;
use crate::descriptor::{EnumDescriptor, TypeDescriptor, TypeKind};
use crate::error::{Error, Result};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Explicit type name -> enum descriptor allow-list.
///
/// Consulted before any search or cache access; an entry here always wins
/// over an identically named type in the container set. Read-only after
/// configuration.
#[derive(Debug, Default)]
pub struct KnownTypes {
    types: HashMap<String, Arc<EnumDescriptor>>,
}

impl KnownTypes {
    /// Create an empty allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its own type name.
    pub fn register(&mut self, descriptor: Arc<EnumDescriptor>) {
        self.types.insert(descriptor.name.clone(), descriptor);
    }

    /// Look up a descriptor by type name.
    pub fn lookup(&self, type_name: &str) -> Option<&Arc<EnumDescriptor>> {
        self.types.get(type_name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the allow-list is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
}

/// Composite cache key: container identity plus simple type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    container: Arc<str>,
    type_name: Arc<str>,
}

impl CacheKey {
    fn new(container: &str, type_name: &str) -> Self {
        Self {
            container: container.into(),
            type_name: type_name.into(),
        }
    }
}

/// Concurrent resolution cache.
///
/// `Some(descriptor)` records a positive result, `None` a fully scanned
/// container without a match. Grows monotonically; entries are immutable
/// once present.
#[derive(Debug, Default)]
pub struct TypeCache {
    entries: DashMap<CacheKey, Option<Arc<TypeDescriptor>>>,
    stats: RwLock<LookupStats>,
}

impl TypeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached outcome for `(container, type_name)`.
    ///
    /// Outer `None` means the key was never resolved; inner `None` is a
    /// recorded negative.
    pub fn lookup(&self, container: &str, type_name: &str) -> Option<Option<Arc<TypeDescriptor>>> {
        let entry = self
            .entries
            .get(&CacheKey::new(container, type_name))
            .map(|e| e.value().clone());
        let mut stats = self.stats.write();
        match entry {
            Some(_) => stats.hits += 1,
            None => stats.misses += 1,
        }
        entry
    }

    /// Record an outcome, keeping any existing entry (insert-if-absent).
    pub fn record(
        &self,
        container: &str,
        type_name: &str,
        outcome: Option<Arc<TypeDescriptor>>,
    ) {
        self.entries
            .entry(CacheKey::new(container, type_name))
            .or_insert(outcome);
    }

    /// Number of cached keys (positive and negative).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of hit/miss counters.
    pub fn stats(&self) -> LookupStats {
        *self.stats.read()
    }
}

/// Resolves bare type names to concrete enum descriptors.
#[derive(Debug)]
pub struct TypeResolver {
    containers: ContainerSet,
    known: KnownTypes,
    cache: TypeCache,
}

impl TypeResolver {
    /// Create a resolver over a configured container set and allow-list.
    pub fn new(containers: ContainerSet, known: KnownTypes) -> Self {
        Self {
            containers,
            known,
            cache: TypeCache::new(),
        }
    }

    /// Resolve a type name to its concrete enum descriptor.
    ///
    /// Order: known-type allow-list (no search, no cache write), then the
    /// container set by priority -- cache-check phase across all roots
    /// first, then a scan phase over each root's declared types and its
    /// precomputed reference closure. The first match wins and is cached
    /// under the root container's key.
    ///
    /// # Errors
    ///
    /// [`Error::TypeNotFound`] when the name is absent everywhere;
    /// [`Error::NotAnEnum`] when the resolved declaration is not an
    /// enumeration.
    pub fn resolve(&self, type_name: &str) -> Result<Arc<EnumDescriptor>> {
        if let Some(descriptor) = self.known.lookup(type_name) {
            log::trace!("known-type hit for '{}'", type_name);
            return Ok(descriptor.clone());
        }

        let found = self.search(type_name)?;
        match &found.kind {
            TypeKind::Enum(e) => Ok(e.clone()),
            TypeKind::Opaque => Err(Error::NotAnEnum(found.name.clone())),
        }
    }

    /// Snapshot of cache hit/miss counters.
    pub fn cache_stats(&self) -> LookupStats {
        self.cache.stats()
    }

    /// Number of cached resolution keys.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn search(&self, type_name: &str) -> Result<Arc<TypeDescriptor>> {
        let roots = self.containers.roots();

        // Phase 1: serve any cached positive before scanning anything; a
        // cached negative exempts that root from the scan phase.
        let mut negative = vec![false; roots.len()];
        for (i, root) in roots.iter().enumerate() {
            match self.cache.lookup(root.container.name(), type_name) {
                Some(Some(found)) => return Ok(found),
                Some(None) => negative[i] = true,
                None => {}
            }
        }

        // Phase 2: scan in priority order, root's own declarations first,
        // then its reference closure in BFS order.
        for (i, root) in roots.iter().enumerate() {
            if negative[i] {
                continue;
            }
            let found = root.container.find(type_name).or_else(|| {
                root.closure
                    .iter()
                    .find_map(|container| container.find(type_name))
            });
            match found {
                Some(descriptor) => {
                    log::debug!(
                        "resolved '{}' via container '{}'",
                        type_name,
                        root.container.name()
                    );
                    let descriptor = descriptor.clone();
                    self.cache
                        .record(root.container.name(), type_name, Some(descriptor.clone()));
                    return Ok(descriptor);
                }
                None => {
                    self.cache.record(root.container.name(), type_name, None);
                }
            }
        }

        Err(Error::TypeNotFound(type_name.to_string()))
    }
}
