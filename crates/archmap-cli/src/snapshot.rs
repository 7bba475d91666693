//! Extractor reading pre-computed dependency snapshots.
//!
//! A snapshot is a `*.deps.json` file written by an external analysis tool:
//!
//! ```json
//! {
//!   "elements": [{ "name": "com.example.app.Main", "kind": "class" }],
//!   "dependencies": [{ "origin": "com.example.app.Main", "target": "com.example.domain.User" }]
//! }
//! ```
//!
//! Each configured location may be a snapshot file or a directory searched
//! for snapshot files. Dependencies naming an element that no snapshot
//! declares are skipped.

use archmap_core::{CodeElement, DependencyEdge, DependencyExtractor, ExtractError};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// File suffix identifying snapshot files.
pub const SNAPSHOT_SUFFIX: &str = ".deps.json";

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    elements: Vec<CodeElement>,
    #[serde(default)]
    dependencies: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    origin: String,
    target: String,
}

/// [`DependencyExtractor`] over snapshot files.
#[derive(Debug, Default)]
pub struct SnapshotExtractor;

impl SnapshotExtractor {
    /// Creates a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn snapshots(locations: &[PathBuf]) -> Result<Vec<(PathBuf, Snapshot)>, ExtractError> {
        let files = discover_files(locations)?;
        tracing::debug!("Reading {} snapshot files", files.len());
        files
            .into_iter()
            .map(|path| {
                let content = std::fs::read_to_string(&path).map_err(|e| ExtractError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                let snapshot =
                    serde_json::from_str(&content).map_err(|e| ExtractError::Invalid {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                Ok((path, snapshot))
            })
            .collect()
    }
}

impl DependencyExtractor for SnapshotExtractor {
    fn extract_elements(&self, locations: &[PathBuf]) -> Result<Vec<CodeElement>, ExtractError> {
        let elements: BTreeSet<CodeElement> = Self::snapshots(locations)?
            .into_iter()
            .flat_map(|(_, s)| s.elements)
            .collect();
        Ok(elements.into_iter().collect())
    }

    fn extract_dependencies(
        &self,
        locations: &[PathBuf],
        elements: &[CodeElement],
    ) -> Result<Vec<DependencyEdge>, ExtractError> {
        let known: HashMap<&str, &CodeElement> =
            elements.iter().map(|e| (e.name(), e)).collect();

        let mut edges = Vec::new();
        for (path, snapshot) in Self::snapshots(locations)? {
            for raw in snapshot.dependencies {
                let (Some(origin), Some(target)) = (
                    known.get(raw.origin.as_str()),
                    known.get(raw.target.as_str()),
                ) else {
                    tracing::debug!(
                        "Skipping {} -> {} in {}: undeclared element",
                        raw.origin,
                        raw.target,
                        path.display()
                    );
                    continue;
                };
                edges.push(DependencyEdge::new((*origin).clone(), (*target).clone()));
            }
        }
        Ok(edges)
    }
}

fn discover_files(locations: &[PathBuf]) -> Result<Vec<PathBuf>, ExtractError> {
    let mut files = Vec::new();

    for location in locations {
        if location.is_file() {
            files.push(location.clone());
            continue;
        }
        if !location.is_dir() {
            tracing::warn!("Skipping missing location {}", location.display());
            continue;
        }

        let mut builder = ignore::WalkBuilder::new(location);
        builder.hidden(false).git_ignore(true);

        let mut found = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|e| ExtractError::Invalid {
                path: location.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if path.is_file() && path.to_string_lossy().ends_with(SNAPSHOT_SUFFIX) {
                found.push(path.to_path_buf());
            }
        }
        found.sort();
        files.extend(found);
    }

    Ok(files)
}
