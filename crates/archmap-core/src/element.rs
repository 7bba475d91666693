//! Code elements and dependency edges as delivered by an extractor.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind of code element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A class (or any other type-level declaration).
    Class,
    /// A package / namespace.
    Package,
}

/// A class or package identified by its dot-separated qualified name.
///
/// Equality, ordering and hashing only look at the qualified name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeElement {
    name: String,
    kind: ElementKind,
}

impl CodeElement {
    /// Creates a new element.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Creates a class element.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Class)
    }

    /// Creates a package element.
    #[must_use]
    pub fn package(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Package)
    }

    /// Returns the qualified name (e.g. `com.example.domain.User`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element kind.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Iterates over the dot-separated segments of the qualified name.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }

    /// Names of the enclosing packages, innermost first.
    ///
    /// `a.b.C` yields `a.b` then `a`.
    pub fn ancestors(&self) -> impl Iterator<Item = &str> {
        let name = self.name.as_str();
        name.match_indices('.')
            .map(move |(i, _)| &name[..i])
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
    }
}

impl PartialEq for CodeElement {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CodeElement {}

impl Hash for CodeElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for CodeElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CodeElement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for CodeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A directed dependency: `origin` depends on `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    origin: CodeElement,
    target: CodeElement,
}

impl DependencyEdge {
    /// Creates a new edge.
    #[must_use]
    pub fn new(origin: CodeElement, target: CodeElement) -> Self {
        Self { origin, target }
    }

    /// The depending element.
    #[must_use]
    pub fn origin(&self) -> &CodeElement {
        &self.origin
    }

    /// The element depended upon.
    #[must_use]
    pub fn target(&self) -> &CodeElement {
        &self.target
    }

    /// True when either endpoint has the given qualified name.
    #[must_use]
    pub fn involves(&self, name: &str) -> bool {
        self.origin.name() == name || self.target.name() == name
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.origin, self.target)
    }
}
