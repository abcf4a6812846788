//! # Textsieve
//!
//! Composable boolean predicates over text.
//!
//! Express "contains A and (B or not C)" as a value instead of a chain of
//! nested conditionals. Predicates combine plain substrings, regular
//! expressions, negation and diacritic/case-insensitive matching, and are
//! evaluated against any `&str`.
//!
//! ## Quick Example
//!
//! ```rust
//! use textsieve::prelude::*;
//!
//! // "Apple" and the words "hello" and "world" in any case or accent
//! let p = and([
//!     nested(normalized("Hello")),
//!     nested(normalized("World")),
//!     literal("Apple"),
//! ]);
//!
//! assert!(evaluate(&p, "HeLLoWórld Apple")?);
//! assert!(evaluate(&p, "HÉLLoWorlD  Apple")?);
//! assert!(!evaluate(&p, "ApplEGoodbyeWorld")?);
//!
//! // Malformed predicates fail instead of silently not matching
//! let bad = regex("^*$(dis.a");
//! assert!(evaluate(&bad, "This is a test string").is_err());
//! # Ok::<(), MatchError>(())
//! ```
//!
//! Evaluation is synchronous and side-effect free. Predicates are immutable
//! and can be shared across threads; a [`Matcher`] adds configuration such
//! as a compiled-pattern cache.
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for evaluations, pattern compilation
//!   and cache hits.
//! - `proptest`: strategies for generating predicates in property tests
//!   (see [`testing`]).

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod eval;
pub mod fold;
pub mod pattern;
pub mod predicate;
pub mod testing;

// Re-exports
pub use error::MatchError;
pub use eval::{evaluate, Matcher, MatcherConfig, TextExt};
pub use fold::{fold, Folded};
pub use pattern::{PatternCache, PatternOptions};
pub use predicate::{
    and, literal, negate, nested, normalized, or, regex, Input, Predicate, PredicateKind,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::MatchError;
    pub use crate::eval::{evaluate, Matcher, MatcherConfig, TextExt};
    pub use crate::predicate::{
        and, literal, negate, nested, normalized, or, regex, Input, Predicate, PredicateKind,
    };
}
