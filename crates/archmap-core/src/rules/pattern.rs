//! Qualified-name patterns used on both sides of a rule.

use std::fmt;

use crate::element::CodeElement;

/// A validated qualified-name pattern.
///
/// Three forms are supported:
/// - `com.example.Foo` matches exactly that name
/// - `com.example.*` matches `com.example` and everything nested below it
/// - `*` matches every name
///
/// Wildcards only ever stand for whole segments, so `com.exa*` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Exact qualified name.
    Literal(String),
    /// Qualified name prefix (stored without the trailing `.*`).
    Prefix(String),
    /// Matches everything.
    Any,
}

/// Why a pattern string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern is empty.
    #[error("pattern must not be empty")]
    Empty,

    /// The pattern contains whitespace.
    #[error("pattern must not contain whitespace")]
    Whitespace,

    /// A segment is empty or contains characters outside `[A-Za-z0-9_$]`.
    #[error("invalid segment `{segment}`")]
    InvalidSegment {
        /// The offending segment.
        segment: String,
    },

    /// `*` used anywhere but as the whole final segment.
    #[error("`*` may only be used as the whole last segment")]
    MisplacedWildcard,
}

impl Pattern {
    /// Parses and validates a pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] describing the first problem found.
    pub fn new(text: &str) -> Result<Self, PatternError> {
        if text.is_empty() {
            return Err(PatternError::Empty);
        }
        if text.chars().any(char::is_whitespace) {
            return Err(PatternError::Whitespace);
        }
        if text == "*" {
            return Ok(Self::Any);
        }

        let (base, prefix) = match text.strip_suffix(".*") {
            Some(base) => (base, true),
            None => (text, false),
        };

        for segment in base.split('.') {
            if segment.contains('*') {
                return Err(PatternError::MisplacedWildcard);
            }
            if segment.is_empty() || !segment.chars().all(is_segment_char) {
                return Err(PatternError::InvalidSegment {
                    segment: segment.to_string(),
                });
            }
        }

        let base = base.to_string();
        Ok(if prefix {
            Self::Prefix(base)
        } else {
            Self::Literal(base)
        })
    }

    /// Tests a qualified name against this pattern.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Literal(literal) => name == literal,
            Self::Prefix(prefix) => {
                name == prefix
                    || name
                        .strip_prefix(prefix.as_str())
                        .and_then(|rest| rest.strip_prefix('.'))
                        .is_some_and(|rest| !rest.is_empty())
            }
            Self::Any => true,
        }
    }

    /// Tests an element's own qualified name against this pattern.
    #[must_use]
    pub fn matches_element(&self, element: &CodeElement) -> bool {
        self.matches(element.name())
    }

    /// Tests whether the element or any of its enclosing packages matches.
    ///
    /// This is group membership as seen by the judge: the literal `a`
    /// covers `a.X` because `a` encloses it.
    #[must_use]
    pub fn contains(&self, element: &CodeElement) -> bool {
        self.matches_element(element) || element.ancestors().any(|a| self.matches(a))
    }
}

fn is_segment_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(name) => f.write_str(name),
            Self::Prefix(name) => write!(f, "{name}.*"),
            Self::Any => f.write_str("*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pat(s: &str) -> Pattern {
        Pattern::new(s).unwrap()
    }

    #[test]
    fn literal_matches_exact_name_only() {
        let p = pat("foo.bar");
        assert!(p.matches("foo.bar"));
        assert!(!p.matches("foo.bar.baz"));
        assert!(!p.matches("foo"));
    }

    #[test]
    fn prefix_matches_on_segment_boundary() {
        let p = pat("foo.*");
        assert!(p.matches("foo"));
        assert!(p.matches("foo.bar"));
        assert!(p.matches("foo.bar.baz"));
        assert!(!p.matches("foobar"));
        assert!(!p.matches("foo."));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!pat("foo.*").matches("Foo.bar"));
        assert!(!pat("Foo").matches("foo"));
    }

    #[test]
    fn any_matches_everything() {
        assert!(pat("*").matches("x"));
        assert!(pat("*").matches("x.y.z"));
    }

    #[test]
    fn partial_segment_wildcard_rejected() {
        assert_eq!(Pattern::new("foo.ba*"), Err(PatternError::MisplacedWildcard));
        assert_eq!(Pattern::new("foo.*.bar"), Err(PatternError::MisplacedWildcard));
        assert_eq!(Pattern::new("foo*"), Err(PatternError::MisplacedWildcard));
    }

    #[test]
    fn invalid_patterns_rejected() {
        assert_eq!(Pattern::new(""), Err(PatternError::Empty));
        assert_eq!(Pattern::new("foo bar"), Err(PatternError::Whitespace));
        assert!(matches!(
            Pattern::new("foo..bar"),
            Err(PatternError::InvalidSegment { .. })
        ));
        assert!(matches!(
            Pattern::new("foo.b-r"),
            Err(PatternError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn inner_class_names_accepted() {
        assert!(pat("com.example.Outer$Inner").matches("com.example.Outer$Inner"));
    }

    #[test]
    fn contains_covers_nested_elements_of_a_literal() {
        let p = pat("a");
        assert!(p.contains(&CodeElement::class("a.X")));
        assert!(p.contains(&CodeElement::package("a")));
        assert!(!p.contains(&CodeElement::class("ab.X")));
    }

    #[test]
    fn display_round_trips_source_text() {
        for text in ["a.b", "a.b.*", "*"] {
            assert_eq!(pat(text).to_string(), text);
        }
    }
}
