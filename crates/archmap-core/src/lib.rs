//! # archmap-core
//!
//! Dependency-rule engine for exploring code architecture.
//!
//! This crate provides:
//!
//! - [`rules`]: a line-oriented rule language (`a ->^ b`, `b ->v c`), its
//!   parser, the [`Pattern`] matcher and the [`DependencyJudge`]
//! - [`configuration`]: persisted [`CodeExplorerConfiguration`]s and their
//!   file-backed collection
//! - [`DependencyExtractor`] as the seam to static-analysis tools, and
//!   [`analysis::analyze`] to classify a full snapshot
//!
//! ## Example
//!
//! ```
//! use archmap_core::{rules, Classification, CodeElement, DependencyEdge};
//!
//! let compiled = rules::compile("a ->^ b");
//! let edge = DependencyEdge::new(CodeElement::class("a.X"), CodeElement::class("b.Y"));
//! assert_eq!(compiled.judge.classify(&edge), Classification::Allowed);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod configuration;
mod element;
mod extractor;
pub mod rules;

pub use analysis::{AnalysisError, AnalysisReport, CancellationToken, EdgeVerdict};
pub use configuration::{
    CodeExplorerConfiguration, CodeExplorerConfigurations, DerivedCache, StoreError,
};
pub use element::{CodeElement, DependencyEdge, ElementKind};
pub use extractor::{DependencyExtractor, ExtractError};
pub use rules::{
    AnnotationMatcher, Classification, CompiledRules, DependencyJudge, Direction, Pattern,
    RuleParseError, RuleStatement,
};
