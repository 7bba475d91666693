//! Classify command: judges a single dependency.

use anyhow::{Context, Result};
use archmap_core::{CodeElement, DependencyEdge};

use crate::config_resolver::ConfigSource;

/// Runs the classify command.
pub fn run(source: &ConfigSource, selector: &str, origin: &str, target: &str) -> Result<()> {
    let store = super::load(source);
    let index = super::select(&store, selector)?;
    let config = store
        .get(index)
        .context("selected configuration is missing")?;

    let judge = config.compile().judge;
    let edge = DependencyEdge::new(CodeElement::class(origin), CodeElement::class(target));
    let verdict = judge.judge(&edge);

    match verdict.rule {
        Some(i) => {
            let rule = &judge.rules()[i];
            println!(
                "{edge}: {} (rule on line {}: {rule})",
                verdict.classification,
                rule.line()
            );
        }
        None => println!("{edge}: {}", verdict.classification),
    }

    Ok(())
}
