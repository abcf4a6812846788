//! Predicate evaluation
//!
//! [`evaluate`] walks a [`Predicate`] against a subject string. `Or` and `And`
//! scan their items left to right and stop as soon as the result is known;
//! the first error aborts the whole walk and is returned unchanged.
//!
//! # Example
//!
//! ```rust
//! use textsieve::{evaluate, predicate::*};
//!
//! let p = and([literal("test"), literal("string"), nested(regex("is.a"))]);
//! assert_eq!(evaluate(&p, "This is a test string"), Ok(true));
//! assert_eq!(evaluate(&p, "This is not a valid string"), Ok(false));
//! ```
//!
//! A [`Matcher`] carries configuration, such as a compiled-pattern cache, and
//! can be shared between threads:
//!
//! ```rust
//! use textsieve::{Matcher, MatcherConfig, predicate::*};
//!
//! let matcher = Matcher::with_config(MatcherConfig::new().with_pattern_cache());
//! let p = regex("^Hell.*$");
//! assert!(matcher.evaluate(&p, "Hello blue planet").unwrap());
//! assert!(!matcher.evaluate(&p, "---").unwrap());
//! assert_eq!(matcher.cached_patterns(), 1);
//! ```

use regex::Regex;

use crate::error::MatchError;
use crate::fold::fold;
use crate::pattern::{self, PatternCache, PatternOptions};
use crate::predicate::{require_literal, Input, Predicate, PredicateKind};

/// Evaluate `predicate` against `subject` with the default [`Matcher`].
///
/// Regex payloads are compiled on every visit; use a [`Matcher`] with
/// [`MatcherConfig::with_pattern_cache`] to reuse them.
///
/// # Example
///
/// ```rust
/// use textsieve::{evaluate, predicate::*};
///
/// assert_eq!(evaluate(&and(Vec::<Input>::new()), "anything"), Ok(true));
/// assert_eq!(evaluate(&or(Vec::<Input>::new()), "anything"), Ok(false));
/// assert!(evaluate(&normalized(nested(regex("a.*"))), "abc")
///     .unwrap_err()
///     .is_unsupported_nesting());
/// ```
pub fn evaluate(predicate: &Predicate, subject: &str) -> Result<bool, MatchError> {
    Matcher::new().evaluate(predicate, subject)
}

/// Configuration for a [`Matcher`].
///
/// # Example
///
/// ```rust
/// use textsieve::MatcherConfig;
///
/// let config = MatcherConfig::new()
///     .with_pattern_cache()
///     .with_size_limit(1 << 20)
///     .with_nest_limit(64);
/// assert!(config.cache_patterns());
/// assert_eq!(config.pattern_options().nest_limit(), 64);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatcherConfig {
    cache_patterns: bool,
    pattern: PatternOptions,
}

impl MatcherConfig {
    /// Default configuration: no cache, default regex limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache compiled regex payloads by pattern text.
    pub fn with_pattern_cache(mut self) -> Self {
        self.cache_patterns = true;
        self
    }

    /// Replace the regex compile options.
    pub fn with_pattern_options(mut self, options: PatternOptions) -> Self {
        self.pattern = options;
        self
    }

    /// Set the compiled size limit for regex payloads, in bytes.
    pub fn with_size_limit(mut self, bytes: usize) -> Self {
        self.pattern = self.pattern.with_size_limit(bytes);
        self
    }

    /// Set the syntax nesting limit for regex payloads.
    pub fn with_nest_limit(mut self, depth: u32) -> Self {
        self.pattern = self.pattern.with_nest_limit(depth);
        self
    }

    /// Whether compiled patterns are cached.
    pub fn cache_patterns(&self) -> bool {
        self.cache_patterns
    }

    /// Options used to compile regex payloads.
    pub fn pattern_options(&self) -> &PatternOptions {
        &self.pattern
    }
}

/// Evaluates predicates under a [`MatcherConfig`].
///
/// A `Matcher` never mutates the predicates it evaluates. With the pattern
/// cache enabled it keeps compiled regexes behind a read-mostly lock, so one
/// matcher can serve concurrent evaluations.
#[derive(Debug, Default)]
pub struct Matcher {
    config: MatcherConfig,
    cache: Option<PatternCache>,
}

impl Matcher {
    /// A matcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A matcher with the given configuration.
    pub fn with_config(config: MatcherConfig) -> Self {
        Self {
            config,
            cache: config.cache_patterns.then(PatternCache::new),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Number of compiled patterns held in the cache (0 without a cache).
    pub fn cached_patterns(&self) -> usize {
        self.cache.as_ref().map_or(0, PatternCache::len)
    }

    /// Evaluate `predicate` against `subject`.
    pub fn evaluate(&self, predicate: &Predicate, subject: &str) -> Result<bool, MatchError> {
        let result = self.eval_predicate(predicate, subject);

        #[cfg(feature = "tracing")]
        match &result {
            Ok(matched) => {
                tracing::trace!(predicate = %predicate, matched, "evaluated predicate")
            }
            Err(err) => {
                tracing::trace!(predicate = %predicate, error = %err, "predicate evaluation failed")
            }
        }

        result
    }

    /// Keep the subjects that satisfy `predicate`, in order.
    ///
    /// Stops at the first error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textsieve::{Matcher, predicate::*};
    ///
    /// let matcher = Matcher::new();
    /// let p = normalized("cafe");
    /// let hits = matcher.filter(&p, ["Café", "tea", "CAFE au lait"]).unwrap();
    /// assert_eq!(hits, vec!["Café", "CAFE au lait"]);
    /// ```
    pub fn filter<'s, I>(
        &self,
        predicate: &Predicate,
        subjects: I,
    ) -> Result<Vec<&'s str>, MatchError>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut matched = Vec::new();
        for subject in subjects {
            if self.evaluate(predicate, subject)? {
                matched.push(subject);
            }
        }
        Ok(matched)
    }

    fn eval_predicate(&self, predicate: &Predicate, subject: &str) -> Result<bool, MatchError> {
        match predicate {
            Predicate::Or(items) => {
                for item in items {
                    if self.eval_input(item, subject)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Predicate::And(items) => {
                for item in items {
                    if !self.eval_input(item, subject)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::DiacriticCaseInsensitive(input) => {
                let needle = require_literal(input, PredicateKind::DiacriticCaseInsensitive)?;
                Ok(fold(subject).contains(&fold(needle)))
            }
            Predicate::Regex(input) => {
                let pattern = require_literal(input, PredicateKind::Regex)?;
                Ok(self.regex(pattern)?.is_match(subject))
            }
            Predicate::Not(input) => Ok(!self.eval_input(input, subject)?),
        }
    }

    /// Literals are exact, case-sensitive containment. No folding is
    /// inherited from an enclosing node.
    fn eval_input(&self, input: &Input, subject: &str) -> Result<bool, MatchError> {
        match input {
            Input::Literal(text) => Ok(subject.contains(text.as_str())),
            Input::Nested(predicate) => self.eval_predicate(predicate, subject),
        }
    }

    fn regex(&self, pattern: &str) -> Result<Regex, MatchError> {
        match &self.cache {
            Some(cache) => cache.get_or_compile(pattern, &self.config.pattern),
            None => pattern::compile(pattern, &self.config.pattern),
        }
    }
}

/// Evaluate predicates as a method on the subject.
///
/// # Example
///
/// ```rust
/// use textsieve::{TextExt, predicate::*};
///
/// let p = normalized("héllo").or(normalized("wórld"));
/// assert!("Hello!".contains_predicate(&p).unwrap());
/// assert!("wORLD-".contains_predicate(&p).unwrap());
/// assert!(!"Goodbye".contains_predicate(&p).unwrap());
/// ```
pub trait TextExt {
    /// Returns whether this text satisfies `predicate`.
    fn contains_predicate(&self, predicate: &Predicate) -> Result<bool, MatchError>;
}

impl TextExt for str {
    fn contains_predicate(&self, predicate: &Predicate) -> Result<bool, MatchError> {
        evaluate(predicate, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::*;

    const VALID: &str = "Hello blue planet";
    const INVALID: &str = "---";

    #[test]
    fn test_or_literals() {
        let p = or(["blue", "planet", "Hello"]);
        assert_eq!(evaluate(&p, VALID), Ok(true));
        assert_eq!(evaluate(&p, INVALID), Ok(false));
    }

    #[test]
    fn test_or_nested() {
        let p = or([
            nested(or(["blue", "red"])),
            nested(or(["Hello", "Hi"])),
            nested(or(["world", "planet"])),
        ]);
        assert_eq!(evaluate(&p, VALID), Ok(true));
        assert_eq!(evaluate(&p, INVALID), Ok(false));
    }

    #[test]
    fn test_and_literals() {
        let p = and(["blue", "planet", "Hello"]);
        assert_eq!(evaluate(&p, VALID), Ok(true));
        assert_eq!(evaluate(&p, INVALID), Ok(false));
    }

    #[test]
    fn test_and_mixed_inputs() {
        let p = and([nested(and(["blue", "planet"])), literal("Hello"), literal("planet")]);
        assert_eq!(evaluate(&p, VALID), Ok(true));
        assert_eq!(evaluate(&p, INVALID), Ok(false));
    }

    #[test]
    fn test_literal_is_case_sensitive() {
        assert_eq!(evaluate(&or(["hello"]), VALID), Ok(false));
        assert_eq!(evaluate(&or(["Hello"]), VALID), Ok(true));
    }

    #[test]
    fn test_empty_literal_always_contained() {
        assert_eq!(evaluate(&or([""]), ""), Ok(true));
        assert_eq!(evaluate(&and([""]), INVALID), Ok(true));
        assert_eq!(evaluate(&normalized(""), INVALID), Ok(true));
    }

    #[test]
    fn test_vacuous_cases() {
        assert_eq!(evaluate(&and(Vec::<Input>::new()), VALID), Ok(true));
        assert_eq!(evaluate(&or(Vec::<Input>::new()), VALID), Ok(false));
    }

    #[test]
    fn test_normalized() {
        let p = normalized("héllo");
        assert_eq!(evaluate(&p, VALID), Ok(true));
        assert_eq!(evaluate(&p, "HÉLLO world"), Ok(true));
        assert_eq!(evaluate(&p, INVALID), Ok(false));
        assert_eq!(evaluate(&p, "goodbye"), Ok(false));
    }

    #[test]
    fn test_normalized_rejects_nested() {
        let p = normalized(normalized("héllo"));
        let err = evaluate(&p, VALID).unwrap_err();
        assert_eq!(
            err,
            MatchError::unsupported_nesting(PredicateKind::DiacriticCaseInsensitive)
        );
        assert!(evaluate(&p, INVALID).is_err());
    }

    #[test]
    fn test_regex_unanchored_search() {
        assert_eq!(evaluate(&regex("^Hell.*$"), VALID), Ok(true));
        assert_eq!(evaluate(&regex("^Hell.*$"), INVALID), Ok(false));
        assert_eq!(evaluate(&regex("blue"), VALID), Ok(true));
        assert_eq!(evaluate(&regex("^blue$"), VALID), Ok(false));
    }

    #[test]
    fn test_regex_invalid_pattern() {
        let err = evaluate(&regex("^*$(dis.a"), VALID).unwrap_err();
        assert!(err.is_invalid_pattern());
    }

    #[test]
    fn test_regex_rejects_nested() {
        let p = regex(regex("^Hell.*$"));
        let err = evaluate(&p, VALID).unwrap_err();
        assert_eq!(err, MatchError::unsupported_nesting(PredicateKind::Regex));
    }

    #[test]
    fn test_not_literal() {
        assert_eq!(evaluate(&negate("blue"), VALID), Ok(false));
        assert_eq!(evaluate(&negate("blue"), INVALID), Ok(true));
    }

    #[test]
    fn test_not_nested() {
        let p = negate(negate("blue"));
        assert_eq!(evaluate(&p, VALID), Ok(true));
        assert_eq!(evaluate(&p, INVALID), Ok(false));
    }

    #[test]
    fn test_not_literal_is_case_sensitive() {
        let p = and([nested(normalized("HELLO")), nested(negate("hello"))]);
        assert_eq!(evaluate(&p, VALID), Ok(true));
    }

    #[test]
    fn test_not_propagates_errors() {
        let err = evaluate(&negate(regex("(bad")), VALID).unwrap_err();
        assert!(err.is_invalid_pattern());
    }

    #[test]
    fn test_or_short_circuits_before_error() {
        let p = or([literal("Hello"), nested(regex("(bad"))]);
        assert_eq!(evaluate(&p, VALID), Ok(true));
        assert!(evaluate(&p, INVALID).unwrap_err().is_invalid_pattern());
    }

    #[test]
    fn test_and_short_circuits_before_error() {
        let p = and([literal("missing"), nested(regex("(bad"))]);
        assert_eq!(evaluate(&p, VALID), Ok(false));

        let p = and([literal("Hello"), nested(regex("(bad"))]);
        assert!(evaluate(&p, VALID).is_err());
    }

    #[test]
    fn test_first_error_wins() {
        let p = and([
            nested(normalized(or(["x"]))),
            nested(regex("(bad")),
        ]);
        assert!(evaluate(&p, VALID).unwrap_err().is_unsupported_nesting());

        let p = and([
            nested(regex("(bad")),
            nested(normalized(or(["x"]))),
        ]);
        assert!(evaluate(&p, VALID).unwrap_err().is_invalid_pattern());
    }

    #[test]
    fn test_matcher_cache_matches_uncached() {
        let cached = Matcher::with_config(MatcherConfig::new().with_pattern_cache());
        let uncached = Matcher::new();
        let p = or([nested(regex("^Hell")), nested(regex("t$")), nested(regex("(bad"))]);

        for subject in [VALID, INVALID, "Hell", "planet", ""] {
            assert_eq!(
                cached.evaluate(&p, subject),
                uncached.evaluate(&p, subject),
                "subject {:?}",
                subject
            );
        }
        assert_eq!(cached.cached_patterns(), 2);
        assert_eq!(uncached.cached_patterns(), 0);
    }

    #[test]
    fn test_matcher_applies_pattern_options() {
        let matcher = Matcher::with_config(MatcherConfig::new().with_nest_limit(1));
        assert!(matcher
            .evaluate(&regex("((a))"), "a")
            .unwrap_err()
            .is_invalid_pattern());
        assert_eq!(Matcher::new().evaluate(&regex("((a))"), "a"), Ok(true));
    }

    #[test]
    fn test_filter() {
        let matcher = Matcher::new();
        let subjects = ["Hello", "World", "Goodbye"];
        let hits = matcher.filter(&or(["Hello", "World"]), subjects).unwrap();
        assert_eq!(hits, vec!["Hello", "World"]);

        assert!(matcher.filter(&regex("(bad"), subjects).is_err());
        assert_eq!(matcher.filter(&regex("(bad"), []), Ok(vec![]));
    }

    #[test]
    fn test_text_ext() {
        let p = and(["Hello", "World"]);
        assert_eq!("HelloWorld".contains_predicate(&p), Ok(true));
        assert_eq!("Hello".contains_predicate(&p), Ok(false));
        assert_eq!(String::from("WorldHello").contains_predicate(&p), Ok(true));
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use tracing_test::traced_test;

        #[traced_test]
        #[test]
        fn test_logs_evaluation_and_compile_failure() {
            assert_eq!(evaluate(&or(["blue"]), VALID), Ok(true));
            assert!(evaluate(&regex("(bad"), VALID).is_err());

            assert!(logs_contain("evaluated predicate"));
            assert!(logs_contain("regex failed to compile"));
        }

        #[traced_test]
        #[test]
        fn test_logs_cache_hits() {
            let matcher = Matcher::with_config(MatcherConfig::new().with_pattern_cache());
            matcher.evaluate(&regex("blue"), VALID).unwrap();
            matcher.evaluate(&regex("blue"), VALID).unwrap();

            assert!(logs_contain("pattern cache miss"));
            assert!(logs_contain("pattern cache hit"));
        }
    }

    #[test]
    fn test_matcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher>();
        assert_send_sync::<Predicate>();
    }
}
