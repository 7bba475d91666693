//! Add command implementation.

use anyhow::{bail, Context, Result};
use archmap_core::CodeExplorerConfiguration;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;

/// Runs the add command.
pub fn run(
    source: &ConfigSource,
    name: String,
    locations: Vec<PathBuf>,
    rules: Option<String>,
    rules_file: Option<&Path>,
) -> Result<()> {
    let mut store = super::load(source);

    if store.position(&name).is_some() {
        bail!(
            "A configuration named `{name}` already exists in {}",
            store.path().display()
        );
    }

    let rules = match (rules, rules_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules from {}", path.display()))?,
        (None, None) => String::new(),
    };

    let config = CodeExplorerConfiguration::new(name, locations, rules);
    let errors = config.compile().errors;
    if !errors.is_empty() {
        tracing::warn!(
            "{} malformed rule line(s); run `archmap rules {}` for details",
            errors.len(),
            config.name()
        );
    }

    let name = config.name().to_string();
    store.add(config);
    store
        .save()
        .with_context(|| format!("Failed to save {}", store.path().display()))?;

    println!("Added `{name}` to {}", store.path().display());
    Ok(())
}
