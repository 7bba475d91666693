//! Extension point for static-analysis extractors.
//!
//! The engine never parses source code itself. Implement
//! [`DependencyExtractor`] to feed it elements and edges for a set of
//! source locations.

use std::path::PathBuf;

use crate::element::{CodeElement, DependencyEdge};

/// Errors reported by an extractor.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Reading a source location failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Location being read.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// A source location could not be interpreted.
    #[error("invalid input in {path}: {message}")]
    Invalid {
        /// Location being read.
        path: PathBuf,
        /// What was wrong.
        message: String,
    },
}

/// Produces code elements and the dependencies between them.
pub trait DependencyExtractor: Send + Sync {
    /// Collects all classes and packages under `locations`.
    ///
    /// # Errors
    ///
    /// Returns an error if a location cannot be read or interpreted.
    fn extract_elements(&self, locations: &[PathBuf]) -> Result<Vec<CodeElement>, ExtractError>;

    /// Collects dependencies between `elements`.
    ///
    /// Edges with an endpoint outside `elements` may be returned; the caller
    /// drops them instead of failing the run.
    ///
    /// # Errors
    ///
    /// Returns an error if a location cannot be read or interpreted.
    fn extract_dependencies(
        &self,
        locations: &[PathBuf],
        elements: &[CodeElement],
    ) -> Result<Vec<DependencyEdge>, ExtractError>;
}
