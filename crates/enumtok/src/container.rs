// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type containers and the prioritized, de-duplicated search set.
//!
//! A [`TypeContainer`] owns a set of declared types plus by-name references
//! to other containers. A [`ContainerSet`] is the ordered search sequence
//! handed to the resolver; insertion order is the search priority, and the
//! transitive reference closure of each root is expanded once, breadth-first,
//! at construction time. Per-call resolution therefore never tracks visited
//! containers.

use crate::descriptor::TypeDescriptor;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// A loadable collection of declared types with references to other
/// containers.
///
/// Container identity is its name; de-duplication in a [`ContainerSet`] and
/// cycle handling during closure expansion both key on it.
#[derive(Debug, Clone, Default)]
pub struct TypeContainer {
    name: String,
    types: Vec<Arc<TypeDescriptor>>,
    references: Vec<String>,
}

impl TypeContainer {
    /// Create an empty container.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Declare a type in this container.
    pub fn with_type(mut self, descriptor: Arc<TypeDescriptor>) -> Self {
        self.types.push(descriptor);
        self
    }

    /// Add a by-name reference to another container.
    pub fn with_reference(mut self, name: impl Into<String>) -> Self {
        self.references.push(name.into());
        self
    }

    /// Container identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared types, in declaration order.
    pub fn types(&self) -> &[Arc<TypeDescriptor>] {
        &self.types
    }

    /// Referenced container names.
    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Find a declared type by simple name. Case-sensitive exact match;
    /// the first declaration wins.
    pub fn find(&self, type_name: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.iter().find(|t| t.name == type_name)
    }
}

/// Resolves a container reference name to the container itself.
///
/// Supplied by the host environment; loading is assumed to be a bounded,
/// synchronous operation. A `None` return means the reference cannot be
/// supplied and the branch is skipped.
pub trait ContainerLoader {
    /// Look up a container by name. Returns `None` if unknown.
    fn load(&self, name: &str) -> Option<Arc<TypeContainer>>;
}

/// Simple `HashMap`-backed [`ContainerLoader`].
#[derive(Debug, Default)]
pub struct MapContainerLoader {
    containers: std::collections::HashMap<String, Arc<TypeContainer>>,
}

impl MapContainerLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container under its own name.
    pub fn register(&mut self, container: Arc<TypeContainer>) {
        self.containers
            .insert(container.name().to_string(), container);
    }

    /// Number of registered containers.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Returns `true` if no containers are registered.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

impl ContainerLoader for MapContainerLoader {
    fn load(&self, name: &str) -> Option<Arc<TypeContainer>> {
        self.containers.get(name).cloned()
    }
}

/// A root container together with its precomputed reference closure.
#[derive(Debug)]
pub(crate) struct RootEntry {
    pub(crate) container: Arc<TypeContainer>,
    /// Transitively referenced containers in BFS order, root excluded.
    pub(crate) closure: Vec<Arc<TypeContainer>>,
}

/// Ordered, de-duplicated sequence of root containers searched by priority.
///
/// Immutable for the lifetime of one converter configuration.
#[derive(Debug)]
pub struct ContainerSet {
    roots: Vec<RootEntry>,
}

impl ContainerSet {
    /// Build the search set.
    ///
    /// Roots are de-duplicated by identity, first occurrence winning. When
    /// `deep_search` is enabled the reference closure of each root is
    /// expanded here via the loader; references the loader cannot supply
    /// are skipped.
    pub fn new(
        containers: Vec<Arc<TypeContainer>>,
        deep_search: bool,
        loader: Option<&dyn ContainerLoader>,
    ) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut roots = Vec::new();
        for container in containers {
            if !seen.insert(container.name().to_string()) {
                continue;
            }
            let closure = if deep_search {
                Self::closure_of(&container, loader)
            } else {
                Vec::new()
            };
            roots.push(RootEntry { container, closure });
        }
        Self { roots }
    }

    /// Number of root containers.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns `true` if the set holds no containers.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub(crate) fn roots(&self) -> &[RootEntry] {
        &self.roots
    }

    fn closure_of(
        root: &Arc<TypeContainer>,
        loader: Option<&dyn ContainerLoader>,
    ) -> Vec<Arc<TypeContainer>> {
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(root.name().to_string());

        let mut queue: VecDeque<String> = root.references().iter().cloned().collect();
        let mut closure = Vec::new();

        while let Some(name) = queue.pop_front() {
            if !visited.insert(name.clone()) {
                continue;
            }
            let Some(loader) = loader else {
                log::debug!("container reference '{}' skipped: no loader configured", name);
                continue;
            };
            match loader.load(&name) {
                Some(container) => {
                    queue.extend(container.references().iter().cloned());
                    closure.push(container);
                }
                None => log::debug!("container reference '{}' could not be loaded", name),
            }
        }

        closure
    }
}
