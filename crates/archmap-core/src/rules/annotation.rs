//! Annotation matcher built from `annotation` directives.

use super::pattern::Pattern;

/// Selects annotations by qualified name.
///
/// An empty matcher matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationMatcher {
    patterns: Vec<Pattern>,
}

impl AnnotationMatcher {
    /// Creates a matcher from directive patterns.
    #[must_use]
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// The directive patterns in source order.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// True if no directive was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Tests a single annotation's qualified name.
    #[must_use]
    pub fn matches(&self, annotation: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(annotation))
    }

    /// Tests whether any of the given annotations is selected.
    #[must_use]
    pub fn matches_any<'a, I>(&self, annotations: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        annotations.into_iter().any(|a| self.matches(a))
    }
}
