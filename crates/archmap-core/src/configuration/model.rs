//! The persisted configuration value.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::rules::{self, CompiledRules};

/// A named analysis setup: project name, scanned locations and rule text.
///
/// Only these three fields take part in equality and persistence. The
/// derived judge and annotation matcher are kept by
/// [`DerivedCache`](super::DerivedCache).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeExplorerConfiguration {
    name: String,
    locations: Vec<PathBuf>,
    rules: String,
}

impl CodeExplorerConfiguration {
    /// Creates a configuration. All fields are kept verbatim.
    #[must_use]
    pub fn new(name: impl Into<String>, locations: Vec<PathBuf>, rules: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locations,
            rules: rules.into(),
        }
    }

    /// Project name; may be empty or contain tabs and newlines.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source locations in the order given; duplicates are kept.
    #[must_use]
    pub fn locations(&self) -> &[PathBuf] {
        &self.locations
    }

    /// Raw rule text.
    #[must_use]
    pub fn rules(&self) -> &str {
        &self.rules
    }

    /// Returns a copy with a different name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns a copy with different rule text.
    #[must_use]
    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = rules.into();
        self
    }

    /// Returns a copy with one more location appended.
    #[must_use]
    pub fn with_location(mut self, location: impl AsRef<Path>) -> Self {
        self.locations.push(location.as_ref().to_path_buf());
        self
    }

    /// Compiles the rule text. Pure; see
    /// [`DerivedCache::initialize`](super::DerivedCache::initialize) for the cached form.
    #[must_use]
    pub fn compile(&self) -> CompiledRules {
        rules::compile(&self.rules)
    }
}
