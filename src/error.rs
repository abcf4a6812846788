//! Error types for predicate evaluation.

use crate::predicate::PredicateKind;

/// Error returned when a predicate cannot be evaluated.
///
/// Both variants describe a malformed predicate rather than a transient
/// condition, so retrying the same evaluation always fails the same way.
///
/// # Examples
///
/// ```rust
/// use textsieve::{evaluate, regex, MatchError};
///
/// let err = evaluate(&regex("^*$(dis.a"), "anything").unwrap_err();
/// assert!(err.is_invalid_pattern());
///
/// match err {
///     MatchError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "^*$(dis.a"),
///     _ => panic!("Expected InvalidPattern"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    /// A regex payload failed to compile.
    InvalidPattern {
        /// The pattern as written in the predicate.
        pattern: String,
        /// The error reported by the regex engine.
        source: regex::Error,
    },
    /// A literal-only node was given a nested predicate.
    UnsupportedNesting {
        /// The node that rejected the nested payload.
        kind: PredicateKind,
    },
}

impl MatchError {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an unsupported nesting error for the given node kind.
    pub fn unsupported_nesting(kind: PredicateKind) -> Self {
        Self::UnsupportedNesting { kind }
    }

    /// Returns true if a regex failed to compile.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }

    /// Returns true if a literal-only node held a nested predicate.
    pub fn is_unsupported_nesting(&self) -> bool {
        matches!(self, Self::UnsupportedNesting { .. })
    }

    /// The kind of node the error originated from.
    pub fn kind(&self) -> PredicateKind {
        match self {
            Self::InvalidPattern { .. } => PredicateKind::Regex,
            Self::UnsupportedNesting { kind } => *kind,
        }
    }
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern {:?}: {}", pattern, source)
            }
            Self::UnsupportedNesting { kind } => {
                write!(
                    f,
                    "{} accepts only a literal payload, got a nested predicate",
                    kind
                )
            }
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            Self::UnsupportedNesting { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn regex_error(pattern: &str) -> regex::Error {
        regex::Regex::new(pattern).unwrap_err()
    }

    #[test]
    fn test_invalid_pattern_accessors() {
        let err = MatchError::invalid_pattern("(unclosed", regex_error("(unclosed"));
        assert!(err.is_invalid_pattern());
        assert!(!err.is_unsupported_nesting());
        assert_eq!(err.kind(), PredicateKind::Regex);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unsupported_nesting_accessors() {
        let err = MatchError::unsupported_nesting(PredicateKind::DiacriticCaseInsensitive);
        assert!(err.is_unsupported_nesting());
        assert!(!err.is_invalid_pattern());
        assert_eq!(err.kind(), PredicateKind::DiacriticCaseInsensitive);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_display() {
        let err = MatchError::invalid_pattern("(unclosed", regex_error("(unclosed"));
        assert!(err.to_string().starts_with("invalid pattern \"(unclosed\": "));

        let err = MatchError::unsupported_nesting(PredicateKind::Regex);
        assert_eq!(
            err.to_string(),
            "regex accepts only a literal payload, got a nested predicate"
        );
    }
}
