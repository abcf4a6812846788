//! Testing utilities for predicate code
//!
//! Assertion macros that print the rendered predicate on failure, and, with
//! the `proptest` feature, strategies for generating predicates.
//!
//! # Examples
//!
//! ```rust
//! use textsieve::predicate::*;
//! use textsieve::{assert_match_error, assert_rejects, assert_satisfies};
//!
//! let p = and(["blue", "planet"]);
//! assert_satisfies!("Hello blue planet", &p);
//! assert_rejects!("---", &p);
//! assert_match_error!("x", &regex("(bad"), textsieve::MatchError::InvalidPattern { .. });
//! ```

/// Assert that a subject satisfies a predicate.
///
/// Panics if evaluation returns `false` or an error.
///
/// # Example
///
/// ```rust
/// use textsieve::{assert_satisfies, predicate::*};
///
/// assert_satisfies!("Hello", &or(["Hello", "World"]));
/// ```
#[macro_export]
macro_rules! assert_satisfies {
    ($subject:expr, $predicate:expr) => {
        match $crate::evaluate($predicate, $subject) {
            Ok(true) => {}
            Ok(false) => panic!(
                "Expected {:?} to satisfy {}, but it did not",
                $subject, $predicate
            ),
            Err(e) => panic!(
                "Expected {:?} to satisfy {}, got error: {}",
                $subject, $predicate, e
            ),
        }
    };
}

/// Assert that a subject does not satisfy a predicate.
///
/// Panics if evaluation returns `true` or an error.
///
/// # Example
///
/// ```rust
/// use textsieve::{assert_rejects, predicate::*};
///
/// assert_rejects!("Goodbye", &or(["Hello", "World"]));
/// ```
#[macro_export]
macro_rules! assert_rejects {
    ($subject:expr, $predicate:expr) => {
        match $crate::evaluate($predicate, $subject) {
            Ok(false) => {}
            Ok(true) => panic!(
                "Expected {:?} to be rejected by {}, but it matched",
                $subject, $predicate
            ),
            Err(e) => panic!(
                "Expected {:?} to be rejected by {}, got error: {}",
                $subject, $predicate, e
            ),
        }
    };
}

/// Assert that evaluation fails with an error matching a pattern.
///
/// # Example
///
/// ```rust
/// use textsieve::{assert_match_error, predicate::*, MatchError};
///
/// assert_match_error!("abc", &normalized(nested(regex("a.*"))), MatchError::UnsupportedNesting { .. });
/// ```
#[macro_export]
macro_rules! assert_match_error {
    ($subject:expr, $predicate:expr, $pattern:pat) => {
        match $crate::evaluate($predicate, $subject) {
            Err(e) => assert!(
                matches!(e, $pattern),
                "Expected error matching {}, got: {:?}",
                stringify!($pattern),
                e
            ),
            Ok(matched) => panic!(
                "Expected evaluation of {} to fail, got Ok({})",
                $predicate, matched
            ),
        }
    };
}

#[cfg(feature = "proptest")]
pub use strategies::{arb_literal, arb_predicate};

#[cfg(feature = "proptest")]
mod strategies {
    use proptest::prelude::*;

    use crate::predicate::{Input, Predicate};

    /// Short literals over a small alphabet, including accented letters, so
    /// generated predicates match generated subjects often enough to be
    /// interesting.
    pub fn arb_literal() -> impl Strategy<Value = String> {
        "[abcéÉAB ]{0,3}"
    }

    /// Well-formed predicate trees: `DiacriticCaseInsensitive` and `Regex`
    /// always hold literals, and regex payloads are escaped literals, so
    /// evaluation never fails.
    pub fn arb_predicate() -> impl Strategy<Value = Predicate> {
        let leaf = prop_oneof![
            arb_literal().prop_map(|s| Predicate::Or(vec![Input::Literal(s)])),
            arb_literal().prop_map(|s| Predicate::DiacriticCaseInsensitive(Input::Literal(s))),
            arb_literal().prop_map(|s| Predicate::Regex(Input::Literal(regex::escape(&s)))),
            arb_literal().prop_map(|s| Predicate::Not(Input::Literal(s))),
        ];

        leaf.prop_recursive(4, 32, 4, |inner| {
            let input = prop_oneof![
                arb_literal().prop_map(Input::Literal),
                inner.clone().prop_map(Input::from),
            ]
            .boxed();
            prop_oneof![
                prop::collection::vec(input.clone(), 0..4).prop_map(Predicate::Or),
                prop::collection::vec(input.clone(), 0..4).prop_map(Predicate::And),
                input.prop_map(Predicate::Not),
            ]
        })
    }

    impl Arbitrary for Predicate {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            arb_predicate().boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::predicate::*;
    use crate::MatchError;

    #[test]
    fn assert_satisfies_macro() {
        assert_satisfies!("Hello blue planet", &and(["blue", "planet", "Hello"]));
    }

    #[test]
    fn assert_rejects_macro() {
        assert_rejects!("---", &and(["blue", "planet", "Hello"]));
    }

    #[test]
    fn assert_match_error_macro() {
        assert_match_error!("x", &regex("(bad"), MatchError::InvalidPattern { .. });
        assert_match_error!(
            "x",
            &regex(nested(or(["x"]))),
            MatchError::UnsupportedNesting { .. }
        );
    }

    #[test]
    #[should_panic(expected = "to satisfy")]
    fn assert_satisfies_panics_on_miss() {
        assert_satisfies!("---", &or(["blue"]));
    }

    #[test]
    #[should_panic(expected = "to be rejected")]
    fn assert_rejects_panics_on_match() {
        assert_rejects!("blue", &or(["blue"]));
    }

    #[test]
    #[should_panic(expected = "to fail")]
    fn assert_match_error_panics_on_success() {
        assert_match_error!("blue", &or(["blue"]), MatchError::InvalidPattern { .. });
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use crate::predicate::Predicate;
        use crate::testing::arb_predicate;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn generated_predicates_validate(p in arb_predicate()) {
                prop_assert!(p.validate(&crate::PatternOptions::default()).is_ok());
            }

            #[test]
            fn generated_predicates_never_fail(p in any::<Predicate>(), s in "[abcéÉAB ]{0,8}") {
                prop_assert!(p.evaluate(&s).is_ok());
            }
        }
    }
}
