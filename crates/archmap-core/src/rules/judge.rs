//! Dependency judge: classifies edges against an ordered rule sequence.
//!
//! For a statement `S ->^ T` the permitted orientation is origin in `S`,
//! target in `T`; for `S ->v T` it is origin in `T`, target in `S`. The
//! forbidden orientation is the reverse.
//!
//! 1. The first statement whose permitted orientation holds makes the edge
//!    [`Classification::Allowed`].
//! 2. Otherwise the first statement whose forbidden orientation holds makes
//!    it [`Classification::Violating`].
//! 3. Otherwise the edge is [`Classification::Unspecified`].
//!
//! Membership in `S`/`T` is [`Pattern::contains`]: the element itself or one
//! of its enclosing packages matches.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::element::DependencyEdge;

use super::parser::{Direction, RuleStatement};
use super::pattern::Pattern;

/// Outcome of judging one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// A rule permits this dependency.
    Allowed,
    /// A rule permits only the opposite direction.
    Violating,
    /// No rule relates origin and target.
    Unspecified,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => write!(f, "allowed"),
            Self::Violating => write!(f, "violating"),
            Self::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// A classification together with the statement that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// The classification.
    pub classification: Classification,
    /// Index into [`DependencyJudge::rules`]; `None` when unspecified.
    pub rule: Option<usize>,
}

impl Verdict {
    const UNSPECIFIED: Self = Self {
        classification: Classification::Unspecified,
        rule: None,
    };
}

/// Compiled decision function over a rule sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyJudge {
    rules: Vec<RuleStatement>,
}

impl DependencyJudge {
    /// Compiles a judge from statements in source order.
    #[must_use]
    pub fn new(rules: Vec<RuleStatement>) -> Self {
        Self { rules }
    }

    /// The statements in tie-break order.
    #[must_use]
    pub fn rules(&self) -> &[RuleStatement] {
        &self.rules
    }

    /// True if the judge has no statements and classifies everything as unspecified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Classifies a single edge.
    #[must_use]
    pub fn classify(&self, edge: &DependencyEdge) -> Classification {
        self.judge(edge).classification
    }

    /// Classifies a single edge and reports the deciding statement.
    #[must_use]
    pub fn judge(&self, edge: &DependencyEdge) -> Verdict {
        if let Some(index) = self.rules.iter().position(|r| permits(r, edge)) {
            return Verdict {
                classification: Classification::Allowed,
                rule: Some(index),
            };
        }
        if let Some(index) = self.rules.iter().position(|r| forbids(r, edge)) {
            return Verdict {
                classification: Classification::Violating,
                rule: Some(index),
            };
        }
        Verdict::UNSPECIFIED
    }

    /// Judges a materialized edge set, preserving its order.
    #[must_use]
    pub fn evaluate(&self, edges: &[DependencyEdge]) -> Vec<Verdict> {
        edges.iter().map(|e| self.judge(e)).collect()
    }
}

/// The (dependent, dependee) groups a statement permits.
fn permitted(rule: &RuleStatement) -> (&Pattern, &Pattern) {
    match rule.direction() {
        Direction::Up => (rule.source(), rule.target()),
        Direction::Down => (rule.target(), rule.source()),
    }
}

fn permits(rule: &RuleStatement, edge: &DependencyEdge) -> bool {
    let (dependent, dependee) = permitted(rule);
    dependent.contains(edge.origin()) && dependee.contains(edge.target())
}

fn forbids(rule: &RuleStatement, edge: &DependencyEdge) -> bool {
    let (dependent, dependee) = permitted(rule);
    dependee.contains(edge.origin()) && dependent.contains(edge.target())
}
