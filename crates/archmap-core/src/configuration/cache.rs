//! Lazily computed, non-persisted data derived from configurations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::rules::{self, CompiledRules};

use super::model::CodeExplorerConfiguration;

/// Side map from rule text to its compiled judge and annotation matcher.
///
/// Configurations with identical rule text share one entry.
#[derive(Debug, Default)]
pub struct DerivedCache {
    compiled: HashMap<String, Arc<CompiledRules>>,
}

impl DerivedCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled rules for `config`, computing them on first use.
    ///
    /// Repeated calls return the same `Arc` and never modify `config`.
    pub fn initialize(&mut self, config: &CodeExplorerConfiguration) -> Arc<CompiledRules> {
        if let Some(compiled) = self.compiled.get(config.rules()) {
            return Arc::clone(compiled);
        }
        tracing::debug!(configuration = config.name(), "initializing derived rules");
        let compiled = Arc::new(rules::compile(config.rules()));
        self.compiled
            .insert(config.rules().to_string(), Arc::clone(&compiled));
        compiled
    }

    /// Returns cached data without computing it.
    #[must_use]
    pub fn get(&self, config: &CodeExplorerConfiguration) -> Option<Arc<CompiledRules>> {
        self.compiled.get(config.rules()).cloned()
    }

    /// Drops entries whose rule text no longer belongs to any of `configs`.
    pub fn retain_for(&mut self, configs: &[CodeExplorerConfiguration]) {
        self.compiled
            .retain(|text, _| configs.iter().any(|c| c.rules() == text));
    }

    /// Number of distinct compiled rule texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// True if nothing has been compiled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
