//! Subcommand implementations.

pub mod add;
pub mod check;
pub mod classify;
pub mod list;
mod output;
pub mod remove;
pub mod rules;

use anyhow::{anyhow, Result};
use archmap_core::CodeExplorerConfigurations;

use crate::config_resolver::ConfigSource;

/// Loads the configurations file the CLI operates on.
fn load(source: &ConfigSource) -> CodeExplorerConfigurations {
    CodeExplorerConfigurations::load(source.path())
}

/// Resolves `NAME|INDEX` to a position in `store`.
///
/// A name match wins over an index so a configuration literally named `0`
/// stays reachable.
fn select(store: &CodeExplorerConfigurations, selector: &str) -> Result<usize> {
    if let Some(index) = store.position(selector) {
        return Ok(index);
    }
    selector
        .parse::<usize>()
        .ok()
        .filter(|i| *i < store.len())
        .ok_or_else(|| {
            anyhow!(
                "No configuration named or numbered `{selector}` in {}",
                store.path().display()
            )
        })
}
