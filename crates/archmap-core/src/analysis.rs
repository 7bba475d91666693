//! Runs an extractor and classifies the resulting snapshot.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::element::{CodeElement, DependencyEdge};
use crate::extractor::{DependencyExtractor, ExtractError};
use crate::rules::{Classification, DependencyJudge};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The extractor failed.
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// The caller cancelled the run before classification.
    #[error("analysis cancelled")]
    Cancelled,
}

/// Cooperative cancellation flag shared between caller and analysis.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// True once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn check(&self) -> Result<(), AnalysisError> {
        if self.is_cancelled() {
            Err(AnalysisError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Classification of one edge, ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeVerdict {
    /// Qualified name of the depending element.
    pub origin: String,
    /// Qualified name of the element depended upon.
    pub target: String,
    /// The judge's classification.
    pub classification: Classification,
    /// Rule line (1-based) of the deciding statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_line: Option<usize>,
}

/// Result of classifying a dependency snapshot.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Number of elements in the snapshot.
    pub elements: usize,
    /// One verdict per edge, in extractor order.
    pub verdicts: Vec<EdgeVerdict>,
}

impl AnalysisReport {
    /// Classifies a materialized edge set.
    #[must_use]
    pub fn classify(judge: &DependencyJudge, elements: usize, edges: &[DependencyEdge]) -> Self {
        let verdicts = edges
            .iter()
            .map(|edge| {
                let verdict = judge.judge(edge);
                EdgeVerdict {
                    origin: edge.origin().name().to_string(),
                    target: edge.target().name().to_string(),
                    classification: verdict.classification,
                    rule_line: verdict.rule.map(|i| judge.rules()[i].line()),
                }
            })
            .collect();
        Self { elements, verdicts }
    }

    /// Verdicts with the given classification.
    #[must_use]
    pub fn by_classification(&self, classification: Classification) -> Vec<&EdgeVerdict> {
        self.verdicts
            .iter()
            .filter(|v| v.classification == classification)
            .collect()
    }

    /// Violating verdicts.
    #[must_use]
    pub fn violations(&self) -> Vec<&EdgeVerdict> {
        self.by_classification(Classification::Violating)
    }

    /// True if any edge is violating.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.verdicts
            .iter()
            .any(|v| v.classification == Classification::Violating)
    }

    /// Counts verdicts as (allowed, violating, unspecified).
    #[must_use]
    pub fn count_by_classification(&self) -> (usize, usize, usize) {
        self.verdicts
            .iter()
            .fold((0, 0, 0), |(a, v, u), verdict| match verdict.classification {
                Classification::Allowed => (a + 1, v, u),
                Classification::Violating => (a, v + 1, u),
                Classification::Unspecified => (a, v, u + 1),
            })
    }
}

/// Extracts a snapshot for `locations` and classifies every edge.
///
/// `cancel` is checked after each extraction step; a cancelled run never
/// reaches the judge.
///
/// # Errors
///
/// Returns [`AnalysisError::Extract`] if the extractor fails and
/// [`AnalysisError::Cancelled`] if `cancel` fired.
pub fn analyze(
    extractor: &dyn DependencyExtractor,
    judge: &DependencyJudge,
    locations: &[PathBuf],
    cancel: &CancellationToken,
) -> Result<AnalysisReport, AnalysisError> {
    let elements = extractor.extract_elements(locations)?;
    debug!("Extracted {} elements", elements.len());
    cancel.check()?;

    let edges = extractor.extract_dependencies(locations, &elements)?;
    cancel.check()?;

    let edges = restrict_to(&elements, edges);
    info!(
        "Classifying {} dependencies with {} rules",
        edges.len(),
        judge.rules().len()
    );
    Ok(AnalysisReport::classify(judge, elements.len(), &edges))
}

fn restrict_to(elements: &[CodeElement], edges: Vec<DependencyEdge>) -> Vec<DependencyEdge> {
    let known: HashSet<&CodeElement> = elements.iter().collect();
    let total = edges.len();
    let kept: Vec<DependencyEdge> = edges
        .into_iter()
        .filter(|e| known.contains(e.origin()) && known.contains(e.target()))
        .collect();
    if kept.len() < total {
        debug!("Dropped {} edges to unknown elements", total - kept.len());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::compile;

    struct FixedExtractor {
        elements: Vec<CodeElement>,
        edges: Vec<DependencyEdge>,
        cancel_after_elements: Option<CancellationToken>,
    }

    impl FixedExtractor {
        fn new(edges: &[(&str, &str)]) -> Self {
            let mut elements: Vec<CodeElement> = edges
                .iter()
                .flat_map(|(o, t)| [CodeElement::class(*o), CodeElement::class(*t)])
                .collect();
            elements.sort();
            elements.dedup();
            Self {
                elements,
                edges: edges
                    .iter()
                    .map(|(o, t)| DependencyEdge::new(CodeElement::class(*o), CodeElement::class(*t)))
                    .collect(),
                cancel_after_elements: None,
            }
        }
    }

    impl DependencyExtractor for FixedExtractor {
        fn extract_elements(&self, _: &[PathBuf]) -> Result<Vec<CodeElement>, ExtractError> {
            if let Some(token) = &self.cancel_after_elements {
                token.cancel();
            }
            Ok(self.elements.clone())
        }

        fn extract_dependencies(
            &self,
            _: &[PathBuf],
            _: &[CodeElement],
        ) -> Result<Vec<DependencyEdge>, ExtractError> {
            Ok(self.edges.clone())
        }
    }

    #[test]
    fn classifies_every_edge() {
        let extractor = FixedExtractor::new(&[("a.X", "b.Y"), ("b.Y", "a.X"), ("c.Z", "a.X")]);
        let judge = compile("a ->^ b").judge;
        let report = analyze(&extractor, &judge, &[], &CancellationToken::new()).unwrap();

        assert_eq!(report.elements, 3);
        assert_eq!(report.count_by_classification(), (1, 1, 1));
        assert!(report.has_violations());
        let violation = report.violations()[0];
        assert_eq!(violation.origin, "b.Y");
        assert_eq!(violation.rule_line, Some(1));
    }

    #[test]
    fn edges_to_unknown_elements_are_dropped() {
        let mut extractor = FixedExtractor::new(&[("a.X", "b.Y")]);
        extractor.edges.push(DependencyEdge::new(
            CodeElement::class("a.X"),
            CodeElement::class("outside.Q"),
        ));
        let judge = compile("a ->^ b").judge;
        let report = analyze(&extractor, &judge, &[], &CancellationToken::new()).unwrap();
        assert_eq!(report.verdicts.len(), 1);
    }

    #[test]
    fn cancelled_run_never_classifies() {
        let token = CancellationToken::new();
        let mut extractor = FixedExtractor::new(&[("a.X", "b.Y")]);
        extractor.cancel_after_elements = Some(token.clone());
        let judge = compile("a ->^ b").judge;

        let result = analyze(&extractor, &judge, &[], &token);
        assert!(matches!(result, Err(AnalysisError::Cancelled)));
        assert!(token.is_cancelled());
    }

    #[test]
    fn report_serializes_lowercase_classification() {
        let judge = compile("a ->^ b").judge;
        let edge = DependencyEdge::new(CodeElement::class("a.X"), CodeElement::class("b.Y"));
        let report = AnalysisReport::classify(&judge, 2, &[edge]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["verdicts"][0]["classification"], "allowed");
        assert_eq!(json["verdicts"][0]["rule_line"], 1);
    }
}
