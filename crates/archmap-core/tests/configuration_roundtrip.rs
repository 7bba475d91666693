//! Integration test: configurations survive save → load unchanged.
//!
//! Every case initializes derived data first, saves a single
//! configuration to a temporary file, loads it back and compares.

use archmap_core::{CodeExplorerConfiguration, CodeExplorerConfigurations, DerivedCache};
use std::path::PathBuf;
use tempfile::TempDir;

fn round_trip(config: &CodeExplorerConfiguration) -> CodeExplorerConfiguration {
    let tmp = TempDir::new().expect("temp dir");
    let file = tmp.path().join("configurationFile.json");

    let mut cache = DerivedCache::new();
    cache.initialize(config);
    CodeExplorerConfigurations::new(&file, vec![config.clone()])
        .save()
        .expect("save should succeed");

    let loaded = CodeExplorerConfigurations::load(&file);
    assert_eq!(loaded.len(), 1);
    loaded.configurations()[0].clone()
}

fn locations(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from(*n)).collect()
}

#[test]
fn loads_empty_collection_from_unknown_file() {
    let tmp = TempDir::new().unwrap();
    let store = CodeExplorerConfigurations::load(tmp.path().join("unknown.json"));
    assert!(store.configurations().is_empty());
}

#[test]
fn empty_configuration() {
    let config = CodeExplorerConfiguration::new("", vec![], "");
    assert_eq!(round_trip(&config), config);
}

#[test]
fn project_name() {
    let config = CodeExplorerConfiguration::new("project name", vec![], "");
    assert_eq!(round_trip(&config), config);
}

#[test]
fn project_name_with_tab() {
    let config = CodeExplorerConfiguration::new("project\tname", vec![], "");
    assert_eq!(round_trip(&config), config);
}

#[test]
fn project_name_with_newlines_and_quotes() {
    let config = CodeExplorerConfiguration::new("line1\nline2\r\n\"quoted\" \\ ü", vec![], "");
    assert_eq!(round_trip(&config), config);
}

#[test]
fn rules() {
    let config = CodeExplorerConfiguration::new("", vec![], " a ->^ b\n b ->v c");
    assert_eq!(round_trip(&config), config);
}

#[test]
fn project_name_and_rules() {
    let config = CodeExplorerConfiguration::new("project name", vec![], " a ->^ b\n b ->v c");
    assert_eq!(round_trip(&config), config);
}

#[test]
fn locations_in_order() {
    let config = CodeExplorerConfiguration::new("", locations(&["a", "b"]), "");
    assert_eq!(round_trip(&config), config);
}

#[test]
fn duplicate_locations_and_rules() {
    let config = CodeExplorerConfiguration::new(
        "dup",
        locations(&["b", "a", "b"]),
        "# layering\n\ta ->^ b\n",
    );
    let loaded = round_trip(&config);
    assert_eq!(loaded, config);
    assert_eq!(loaded.locations().len(), 3);
}

#[test]
fn two_configurations_keep_order() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("configurations.json");
    let first = CodeExplorerConfiguration::new("first", locations(&["a"]), "a ->^ b");
    let second = CodeExplorerConfiguration::new("second", vec![], "b ->v c");

    CodeExplorerConfigurations::new(&file, vec![first.clone(), second.clone()])
        .save()
        .unwrap();

    let loaded = CodeExplorerConfigurations::load(&file);
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get(0), Some(&first));
    assert_eq!(loaded.get(1), Some(&second));
}

#[test]
fn loaded_configuration_compiles_like_original() {
    let config = CodeExplorerConfiguration::new("p", vec![], " a ->^ b\n b ->v c");
    let loaded = round_trip(&config);
    assert_eq!(loaded.compile(), config.compile());
}
