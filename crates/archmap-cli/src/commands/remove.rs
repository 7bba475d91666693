//! Remove command implementation.

use anyhow::{Context, Result};

use crate::config_resolver::ConfigSource;

/// Runs the remove command.
pub fn run(source: &ConfigSource, selector: &str) -> Result<()> {
    let mut store = super::load(source);
    let index = super::select(&store, selector)?;

    let Some(removed) = store.remove(index) else {
        anyhow::bail!("configuration {index} disappeared while removing");
    };
    store
        .save()
        .with_context(|| format!("Failed to save {}", store.path().display()))?;

    println!("Removed `{}`", removed.name());
    Ok(())
}
