//! Regex compilation and caching
//!
//! [`compile`] turns a pattern into a [`Regex`] using the limits in
//! [`PatternOptions`]. [`PatternCache`] memoizes compiled patterns by their
//! source text so a [`Matcher`](crate::Matcher) can reuse them across
//! evaluations. A cache only saves work; results are identical with or
//! without one.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use regex::{Regex, RegexBuilder};

use crate::error::MatchError;

/// Default limit on the compiled size of a single pattern, in bytes.
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Default limit on the nesting depth of a pattern's syntax.
pub const DEFAULT_NEST_LIMIT: u32 = 250;

/// Limits applied when compiling regex payloads.
///
/// # Example
///
/// ```rust
/// use textsieve::PatternOptions;
///
/// let options = PatternOptions::new().with_size_limit(1 << 16).with_nest_limit(32);
/// assert_eq!(options.size_limit(), 1 << 16);
/// assert_eq!(options.nest_limit(), 32);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PatternOptions {
    size_limit: usize,
    nest_limit: u32,
}

impl PatternOptions {
    /// Options with the regex engine's default limits.
    pub fn new() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
            nest_limit: DEFAULT_NEST_LIMIT,
        }
    }

    /// Set the compiled size limit in bytes.
    pub fn with_size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = bytes;
        self
    }

    /// Set the syntax nesting limit.
    pub fn with_nest_limit(mut self, depth: u32) -> Self {
        self.nest_limit = depth;
        self
    }

    /// The compiled size limit in bytes.
    pub fn size_limit(&self) -> usize {
        self.size_limit
    }

    /// The syntax nesting limit.
    pub fn nest_limit(&self) -> u32 {
        self.nest_limit
    }
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile `pattern` under `options`.
///
/// Fails with [`MatchError::InvalidPattern`] if the pattern is malformed or
/// exceeds a limit.
pub fn compile(pattern: &str, options: &PatternOptions) -> Result<Regex, MatchError> {
    RegexBuilder::new(pattern)
        .size_limit(options.size_limit)
        .nest_limit(options.nest_limit)
        .build()
        .map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::debug!(pattern, error = %err, "regex failed to compile");
            MatchError::invalid_pattern(pattern, err)
        })
}

/// Compiled patterns keyed by the options they were built with and their text.
///
/// The same text compiled under different limits gets its own entry, so a
/// pattern accepted under loose limits never satisfies a lookup under tighter
/// ones. Reads take a shared lock; a miss compiles outside the lock and then
/// inserts. Failed compilations are not cached.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: RwLock<HashMap<PatternOptions, HashMap<String, Regex>>>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled pattern, compiling and storing it on a miss.
    pub fn get_or_compile(
        &self,
        pattern: &str,
        options: &PatternOptions,
    ) -> Result<Regex, MatchError> {
        if let Some(regex) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(options)
            .and_then(|patterns| patterns.get(pattern))
        {
            #[cfg(feature = "tracing")]
            tracing::trace!(pattern, "pattern cache hit");
            return Ok(regex.clone());
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(pattern, "pattern cache miss");

        let regex = compile(pattern, options)?;
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(*options)
            .or_default()
            .entry(pattern.to_owned())
            .or_insert_with(|| regex.clone());
        Ok(regex)
    }

    /// Number of cached patterns, counting each set of options separately.
    pub fn len(&self) -> usize {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(HashMap::len)
            .sum()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached pattern.
    pub fn clear(&self) {
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_valid_pattern() {
        let re = compile("^Hell.*$", &PatternOptions::default()).unwrap();
        assert!(re.is_match("Hello blue planet"));
        assert!(!re.is_match("---"));
    }

    #[test]
    fn test_compile_invalid_pattern() {
        let err = compile("^*$(dis.a", &PatternOptions::default()).unwrap_err();
        assert!(err.is_invalid_pattern());
        match err {
            MatchError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "^*$(dis.a"),
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_respects_nest_limit() {
        let options = PatternOptions::new().with_nest_limit(2);
        assert!(compile("a", &options).is_ok());
        assert!(compile("((((a))))", &options).unwrap_err().is_invalid_pattern());
    }

    #[test]
    fn test_compile_respects_size_limit() {
        let options = PatternOptions::new().with_size_limit(16);
        assert!(compile(r"\w{50}", &options).unwrap_err().is_invalid_pattern());
    }

    #[test]
    fn test_cache_stores_successes_only() {
        let cache = PatternCache::new();
        assert!(cache.is_empty());

        cache.get_or_compile("a+", &PatternOptions::default()).unwrap();
        cache.get_or_compile("a+", &PatternOptions::default()).unwrap();
        assert_eq!(cache.len(), 1);

        assert!(cache
            .get_or_compile("(bad", &PatternOptions::default())
            .is_err());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_keeps_options_apart() {
        let cache = PatternCache::new();
        let strict = PatternOptions::new().with_nest_limit(1);

        cache.get_or_compile("((a))", &PatternOptions::default()).unwrap();
        let err = cache.get_or_compile("((a))", &strict).unwrap_err();
        assert!(err.is_invalid_pattern());
        assert_eq!(cache.len(), 1);

        cache.get_or_compile("a", &strict).unwrap();
        cache.get_or_compile("a", &PatternOptions::default()).unwrap();
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_cache_is_shareable_across_threads() {
        let cache = std::sync::Arc::new(PatternCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    cache
                        .get_or_compile("b[lu]+e", &PatternOptions::default())
                        .unwrap()
                        .is_match("Hello blue planet")
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(cache.len(), 1);
    }
}
