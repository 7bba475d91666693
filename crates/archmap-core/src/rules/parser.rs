//! Line-oriented parser for dependency rule text.
//!
//! ```text
//! # comments start with `#` or `//`
//! com.example.app ->^ com.example.domain.*
//! com.example.infra ->v com.example.app
//! annotation javax.inject.*
//! ```
//!
//! Parsing is total: malformed lines are collected as [`RuleParseError`]s
//! and the remaining lines are still parsed.

use std::fmt;

use miette::{Diagnostic, SourceSpan};

use super::pattern::{Pattern, PatternError};

const ARROW: &str = "->";
const ANNOTATION_KEYWORD: &str = "annotation";

/// Permitted direction of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `^`: the source group may depend on the target group.
    Up,
    /// `v`: the target group may depend on the source group.
    Down,
}

impl Direction {
    fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '^' => Some(Self::Up),
            'v' => Some(Self::Down),
            _ => None,
        }
    }

    /// The marker character used in rule text.
    #[must_use]
    pub fn marker(self) -> char {
        match self {
            Self::Up => '^',
            Self::Down => 'v',
        }
    }
}

/// One parsed rule: `<source> -> <direction> <target>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStatement {
    source: Pattern,
    direction: Direction,
    target: Pattern,
    line: usize,
}

impl RuleStatement {
    /// Creates a new statement. `line` is 1-based.
    #[must_use]
    pub fn new(source: Pattern, direction: Direction, target: Pattern, line: usize) -> Self {
        Self {
            source,
            direction,
            target,
            line,
        }
    }

    /// Pattern left of the arrow.
    #[must_use]
    pub fn source(&self) -> &Pattern {
        &self.source
    }

    /// Rule direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Pattern right of the direction marker.
    #[must_use]
    pub fn target(&self) -> &Pattern {
        &self.target
    }

    /// Line number in the rule text (1-based).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for RuleStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ->{} {}",
            self.source,
            self.direction.marker(),
            self.target
        )
    }
}

/// What is wrong with a rule line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// Neither a rule nor a directive: no `->` found.
    #[error("expected `->`")]
    MissingArrow,

    /// `->` not followed by `^` or `v` and whitespace.
    #[error("expected `^` or `v` followed by whitespace after `->`")]
    MissingDirection,

    /// A pattern position is empty.
    #[error("missing pattern")]
    EmptyPattern,

    /// A pattern contains whitespace.
    #[error("whitespace inside pattern `{pattern}`")]
    WhitespaceInPattern {
        /// The trimmed pattern text.
        pattern: String,
    },

    /// A pattern segment is empty or has invalid characters.
    #[error("invalid segment `{segment}` in pattern `{pattern}`")]
    InvalidSegment {
        /// The trimmed pattern text.
        pattern: String,
        /// The offending segment.
        segment: String,
    },

    /// A wildcard used inside a segment or before the last segment.
    #[error("misplaced `*` in pattern `{pattern}`")]
    MisplacedWildcard {
        /// The trimmed pattern text.
        pattern: String,
    },
}

impl ParseErrorKind {
    fn from_pattern(pattern: &str, error: PatternError) -> Self {
        match error {
            PatternError::Empty => Self::EmptyPattern,
            PatternError::Whitespace => Self::WhitespaceInPattern {
                pattern: pattern.to_string(),
            },
            PatternError::InvalidSegment { segment } => Self::InvalidSegment {
                pattern: pattern.to_string(),
                segment,
            },
            PatternError::MisplacedWildcard => Self::MisplacedWildcard {
                pattern: pattern.to_string(),
            },
        }
    }
}

/// A malformed rule line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}: `{text}`")]
pub struct RuleParseError {
    /// Line number (1-based).
    pub line: usize,
    /// The offending line, without its line terminator.
    pub text: String,
    /// What went wrong.
    pub kind: ParseErrorKind,
    offset: usize,
}

impl RuleParseError {
    /// Builds a diagnostic pointing at the offending line of `rules_text`.
    ///
    /// `rules_text` must be the text this error was produced from.
    #[must_use]
    pub fn diagnostic(&self, rules_text: &str) -> RuleDiagnostic {
        RuleDiagnostic {
            message: format!("invalid rule on line {}", self.line),
            source_code: rules_text.to_string(),
            span: SourceSpan::from((self.offset, self.text.len())),
            label_message: self.kind.to_string(),
        }
    }
}

/// Rich diagnostic for a [`RuleParseError`].
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(archmap::rules::syntax),
    help("rules look like `a.b ->^ c.*`; use `^` or `v` as direction")
)]
pub struct RuleDiagnostic {
    message: String,
    #[source_code]
    source_code: String,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

/// Output of [`parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRules {
    /// Rule statements in source order.
    pub rules: Vec<RuleStatement>,
    /// Patterns from `annotation` directives, in source order.
    pub annotations: Vec<Pattern>,
    /// Errors for malformed lines, in source order.
    pub errors: Vec<RuleParseError>,
}

impl ParsedRules {
    /// True if every non-blank line parsed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

enum Line {
    Rule(RuleStatement),
    Annotation(Pattern),
}

/// Parses rule text. Never fails; see [`ParsedRules::errors`].
#[must_use]
pub fn parse(rules_text: &str) -> ParsedRules {
    let mut parsed = ParsedRules::default();
    let mut offset = 0;

    for (index, raw) in rules_text.split('\n').enumerate() {
        let line_offset = offset;
        offset += raw.len() + 1;

        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        let line = index + 1;
        match parse_line(trimmed, line) {
            Ok(Line::Rule(rule)) => parsed.rules.push(rule),
            Ok(Line::Annotation(pattern)) => parsed.annotations.push(pattern),
            Err(kind) => {
                tracing::debug!(line, %kind, "skipping malformed rule line");
                parsed.errors.push(RuleParseError {
                    line,
                    text: text.to_string(),
                    kind,
                    offset: line_offset,
                });
            }
        }
    }

    parsed
}

fn parse_line(line_text: &str, line: usize) -> Result<Line, ParseErrorKind> {
    let Some((source, rest)) = line_text.split_once(ARROW) else {
        return parse_directive(line_text).map(Line::Annotation);
    };

    let rest = rest.trim_start();
    let mut chars = rest.chars();
    let direction = chars
        .next()
        .and_then(Direction::from_marker)
        .ok_or(ParseErrorKind::MissingDirection)?;

    let source = parse_pattern(source)?;
    let target = parse_pattern(chars.as_str())?;
    Ok(Line::Rule(RuleStatement::new(source, direction, target, line)))
}

fn parse_directive(line_text: &str) -> Result<Pattern, ParseErrorKind> {
    match line_text.strip_prefix(ANNOTATION_KEYWORD) {
        Some(rest) if rest.starts_with(char::is_whitespace) => parse_pattern(rest),
        _ => Err(ParseErrorKind::MissingArrow),
    }
}

fn parse_pattern(text: &str) -> Result<Pattern, ParseErrorKind> {
    let trimmed = text.trim();
    Pattern::new(trimmed).map_err(|e| ParseErrorKind::from_pattern(trimmed, e))
}
