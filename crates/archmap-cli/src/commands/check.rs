//! Check command implementation.

use anyhow::{Context, Result};
use archmap_core::analysis::{self, CancellationToken};

use crate::config_resolver::ConfigSource;
use crate::snapshot::SnapshotExtractor;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(source: &ConfigSource, selector: &str, format: OutputFormat) -> Result<()> {
    let store = super::load(source);
    let index = super::select(&store, selector)?;
    let config = store
        .get(index)
        .context("selected configuration is missing")?;

    let compiled = config.compile();
    if !compiled.errors.is_empty() {
        tracing::warn!(
            "Ignoring {} malformed rule line(s) in `{}`",
            compiled.errors.len(),
            config.name()
        );
    }

    tracing::info!(
        "Analyzing `{}` ({} location(s))",
        config.name(),
        config.locations().len()
    );

    let extractor = SnapshotExtractor::new();
    let report = analysis::analyze(
        &extractor,
        &compiled.judge,
        config.locations(),
        &CancellationToken::new(),
    )
    .context("Analysis failed")?;

    super::output::print(&report, format)?;

    if report.has_violations() {
        std::process::exit(1);
    }

    Ok(())
}
