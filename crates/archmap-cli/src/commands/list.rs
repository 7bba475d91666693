//! List command implementation.

use anyhow::Result;

use crate::config_resolver::ConfigSource;

/// Runs the list command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let store = super::load(source);

    if store.is_empty() {
        println!("No configurations in {}", store.path().display());
        println!("\nAdd one with: archmap add --name <NAME> --location <PATH>");
        return Ok(());
    }

    for (index, config) in store.configurations().iter().enumerate() {
        let compiled = config.compile();
        println!(
            "[{index}] {} ({} location(s), {} rule(s))",
            config.name(),
            config.locations().len(),
            compiled.judge.rules().len(),
        );
        for location in config.locations() {
            println!("      {}", location.display());
        }
        if !compiled.errors.is_empty() {
            println!(
                "      \x1b[33m{} malformed rule line(s)\x1b[0m",
                compiled.errors.len()
            );
        }
    }

    Ok(())
}
