//! Dependency rule language.
//!
//! # Pipeline
//!
//! ```text
//! rule text
//!   ↓ parser::parse()
//! ParsedRules (statements + annotation patterns + errors)
//!   ↓ compile()
//! CompiledRules (DependencyJudge + AnnotationMatcher)
//! ```

pub mod annotation;
pub mod judge;
pub mod parser;
pub mod pattern;

pub use annotation::AnnotationMatcher;
pub use judge::{Classification, DependencyJudge, Verdict};
pub use parser::{parse, Direction, ParseErrorKind, ParsedRules, RuleParseError, RuleStatement};
pub use pattern::{Pattern, PatternError};

/// Everything derived from one rule text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledRules {
    /// Edge classifier.
    pub judge: DependencyJudge,
    /// Matcher from `annotation` directives.
    pub annotation_matcher: AnnotationMatcher,
    /// Lines that failed to parse; the judge was built from the rest.
    pub errors: Vec<RuleParseError>,
}

/// Parses `rules_text` and builds the judge and annotation matcher.
#[must_use]
pub fn compile(rules_text: &str) -> CompiledRules {
    let parsed = parse(rules_text);
    tracing::debug!(
        rules = parsed.rules.len(),
        annotations = parsed.annotations.len(),
        errors = parsed.errors.len(),
        "compiled rule text"
    );
    CompiledRules {
        judge: DependencyJudge::new(parsed.rules),
        annotation_matcher: AnnotationMatcher::new(parsed.annotations),
        errors: parsed.errors,
    }
}
