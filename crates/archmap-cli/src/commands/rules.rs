//! Rules command: validates a configuration's rule text.

use anyhow::{Context, Result};

use crate::config_resolver::ConfigSource;

/// Runs the rules command.
pub fn run(source: &ConfigSource, selector: &str) -> Result<()> {
    let store = super::load(source);
    let index = super::select(&store, selector)?;
    let config = store
        .get(index)
        .context("selected configuration is missing")?;

    let compiled = config.compile();

    for rule in compiled.judge.rules() {
        println!("{:>4}  {rule}", rule.line());
    }
    for pattern in compiled.annotation_matcher.patterns() {
        println!("      annotation {pattern}");
    }

    if compiled.errors.is_empty() {
        println!(
            "\x1b[32m{} rule(s) OK\x1b[0m",
            compiled.judge.rules().len()
        );
        return Ok(());
    }

    for error in &compiled.errors {
        let report = miette::Report::new(error.diagnostic(config.rules()));
        eprintln!("{report:?}");
    }
    println!(
        "\x1b[31mFound {} malformed rule line(s)\x1b[0m",
        compiled.errors.len()
    );
    std::process::exit(1);
}
