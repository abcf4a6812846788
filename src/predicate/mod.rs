//! Predicate trees over text
//!
//! A [`Predicate`] is an immutable tree of conditions. Leaves are plain
//! substrings ([`Input::Literal`]); inner nodes combine them with AND, OR and
//! NOT, or apply a diacritic/case-insensitive or regex test to a literal.
//!
//! # Example
//!
//! ```rust
//! use textsieve::predicate::*;
//!
//! // "Hello" and ("e" or "i") and not "planet"
//! let p = and([literal("Hello"), nested(or(["e", "i"])), nested(negate("planet"))]);
//! assert!(p.evaluate("Hello there").unwrap());
//! assert!(!p.evaluate("Hello planet").unwrap());
//! ```
//!
//! # Builder methods
//!
//! ```rust
//! use textsieve::predicate::*;
//!
//! let p = Predicate::literal("H").and(or(["e", "i"])).and("llo");
//! assert!(p.evaluate("Hillo").unwrap());
//! assert!(!p.evaluate("Hallo").unwrap());
//! ```

mod combinators;
mod display;

use crate::error::MatchError;
use crate::eval::Matcher;
use crate::pattern::{self, PatternOptions};

/// Payload of a predicate node: a raw substring or a nested predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// Substring compared by exact, case-sensitive containment.
    Literal(String),
    /// A sub-condition evaluated recursively.
    Nested(Box<Predicate>),
}

impl Input {
    /// The literal text, if this is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Input::Literal(text) => Some(text),
            Input::Nested(_) => None,
        }
    }

    /// The nested predicate, if this is one.
    pub fn as_nested(&self) -> Option<&Predicate> {
        match self {
            Input::Literal(_) => None,
            Input::Nested(predicate) => Some(predicate),
        }
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Literal(text.to_owned())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Literal(text)
    }
}

impl From<&String> for Input {
    fn from(text: &String) -> Self {
        Input::Literal(text.clone())
    }
}

impl From<Predicate> for Input {
    fn from(predicate: Predicate) -> Self {
        Input::Nested(Box::new(predicate))
    }
}

impl From<Box<Predicate>> for Input {
    fn from(predicate: Box<Predicate>) -> Self {
        Input::Nested(predicate)
    }
}

/// A boolean condition over a subject string.
///
/// Trees are built by the free functions in this module ([`or`], [`and`],
/// [`normalized`], [`regex`], [`negate`]) or the builder methods on
/// `Predicate`, and evaluated with [`crate::evaluate`] or a
/// [`Matcher`](crate::Matcher).
///
/// `DiacriticCaseInsensitive` and `Regex` only accept a literal payload.
/// Construction does not reject a nested payload; evaluation (and
/// [`Predicate::validate`]) fails with [`MatchError::UnsupportedNesting`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// True if any item matches. `Or([])` is false.
    Or(Vec<Input>),
    /// True if every item matches. `And([])` is true.
    And(Vec<Input>),
    /// True if the folded subject contains the folded literal.
    DiacriticCaseInsensitive(Input),
    /// True if the literal, compiled as a regex, matches anywhere in the subject.
    Regex(Input),
    /// True if the payload does not match.
    Not(Input),
}

/// The variant of a [`Predicate`] node, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    /// [`Predicate::Or`]
    Or,
    /// [`Predicate::And`]
    And,
    /// [`Predicate::DiacriticCaseInsensitive`]
    DiacriticCaseInsensitive,
    /// [`Predicate::Regex`]
    Regex,
    /// [`Predicate::Not`]
    Not,
}

impl PredicateKind {
    /// Short lowercase name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            PredicateKind::Or => "or",
            PredicateKind::And => "and",
            PredicateKind::DiacriticCaseInsensitive => "normalized",
            PredicateKind::Regex => "regex",
            PredicateKind::Not => "not",
        }
    }
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Predicate {
    /// The variant of this node.
    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::Or(_) => PredicateKind::Or,
            Predicate::And(_) => PredicateKind::And,
            Predicate::DiacriticCaseInsensitive(_) => PredicateKind::DiacriticCaseInsensitive,
            Predicate::Regex(_) => PredicateKind::Regex,
            Predicate::Not(_) => PredicateKind::Not,
        }
    }

    /// Evaluate against `subject` with the default [`Matcher`].
    ///
    /// Shorthand for [`crate::evaluate`].
    pub fn evaluate(&self, subject: &str) -> Result<bool, MatchError> {
        Matcher::new().evaluate(self, subject)
    }

    /// Check the whole tree for errors without a subject.
    ///
    /// Walks every node in evaluation order and returns the first error that
    /// some evaluation could hit: a nested payload under
    /// `DiacriticCaseInsensitive`/`Regex`, or a regex that fails to compile
    /// under `options`. Unlike evaluation, it does not short-circuit, so a
    /// predicate that passes never fails at evaluation time (given the same
    /// options).
    ///
    /// # Example
    ///
    /// ```rust
    /// use textsieve::predicate::*;
    /// use textsieve::PatternOptions;
    ///
    /// // Evaluation short-circuits on "a" and never reaches the bad regex...
    /// let p = or([literal("a"), nested(regex("(unclosed"))]);
    /// assert!(p.evaluate("a").unwrap());
    ///
    /// // ...but validation still reports it.
    /// assert!(p.validate(&PatternOptions::default()).unwrap_err().is_invalid_pattern());
    /// ```
    pub fn validate(&self, options: &PatternOptions) -> Result<(), MatchError> {
        match self {
            Predicate::Or(items) | Predicate::And(items) => items
                .iter()
                .try_for_each(|item| validate_input(item, options)),
            Predicate::DiacriticCaseInsensitive(input) => {
                require_literal(input, PredicateKind::DiacriticCaseInsensitive).map(|_| ())
            }
            Predicate::Regex(input) => {
                let source = require_literal(input, PredicateKind::Regex)?;
                pattern::compile(source, options).map(|_| ())
            }
            Predicate::Not(input) => validate_input(input, options),
        }
    }

    /// Number of nodes in the tree, counting literals.
    pub fn size(&self) -> usize {
        1 + self.inputs().map(Input::size).sum::<usize>()
    }

    /// Longest path from this node to a leaf, counting literals.
    pub fn depth(&self) -> usize {
        1 + self.inputs().map(Input::depth).max().unwrap_or(0)
    }

    /// Iterate over the direct payloads of this node in order.
    pub fn inputs(&self) -> impl Iterator<Item = &Input> {
        let items: &[Input] = match self {
            Predicate::Or(items) | Predicate::And(items) => items,
            Predicate::DiacriticCaseInsensitive(input)
            | Predicate::Regex(input)
            | Predicate::Not(input) => std::slice::from_ref(input),
        };
        items.iter()
    }
}

impl Input {
    fn size(&self) -> usize {
        match self {
            Input::Literal(_) => 1,
            Input::Nested(predicate) => predicate.size(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Input::Literal(_) => 1,
            Input::Nested(predicate) => predicate.depth(),
        }
    }
}

fn validate_input(input: &Input, options: &PatternOptions) -> Result<(), MatchError> {
    match input {
        Input::Literal(_) => Ok(()),
        Input::Nested(predicate) => predicate.validate(options),
    }
}

/// Extract the literal payload of a literal-only node.
pub(crate) fn require_literal(input: &Input, kind: PredicateKind) -> Result<&str, MatchError> {
    match input {
        Input::Literal(text) => Ok(text),
        Input::Nested(_) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(kind = %kind, "rejecting nested payload");
            Err(MatchError::unsupported_nesting(kind))
        }
    }
}

/// Wrap a string as a literal input.
///
/// # Example
///
/// ```rust
/// use textsieve::predicate::*;
///
/// assert_eq!(literal("blue"), Input::Literal("blue".to_string()));
/// ```
pub fn literal(text: impl Into<String>) -> Input {
    Input::Literal(text.into())
}

/// Wrap a predicate as a nested input.
///
/// # Example
///
/// ```rust
/// use textsieve::predicate::*;
///
/// let p = and([literal("Hello"), nested(or(["e", "i"]))]);
/// assert!(p.evaluate("Hello").unwrap());
/// ```
pub fn nested(predicate: Predicate) -> Input {
    Input::Nested(Box::new(predicate))
}

/// Create a predicate that is true if any item matches.
///
/// Items are checked left to right and evaluation stops at the first match.
///
/// # Example
///
/// ```rust
/// use textsieve::predicate::*;
///
/// let p = or(["Hello", "World"]);
/// assert!(p.evaluate("Hello").unwrap());
/// assert!(p.evaluate("World").unwrap());
/// assert!(!p.evaluate("Goodbye").unwrap());
/// ```
pub fn or<I>(items: I) -> Predicate
where
    I: IntoIterator,
    I::Item: Into<Input>,
{
    Predicate::Or(items.into_iter().map(Into::into).collect())
}

/// Create a predicate that is true if every item matches.
///
/// Items are checked left to right and evaluation stops at the first miss.
///
/// # Example
///
/// ```rust
/// use textsieve::predicate::*;
///
/// let p = and(["blue", "planet", "Hello"]);
/// assert!(p.evaluate("Hello blue planet").unwrap());
/// assert!(!p.evaluate("---").unwrap());
/// ```
pub fn and<I>(items: I) -> Predicate
where
    I: IntoIterator,
    I::Item: Into<Input>,
{
    Predicate::And(items.into_iter().map(Into::into).collect())
}

/// Create a diacritic- and case-insensitive containment predicate.
///
/// # Example
///
/// ```rust
/// use textsieve::predicate::*;
///
/// let p = normalized("héllo");
/// assert!(p.evaluate("HÉLLO world").unwrap());
/// assert!(p.evaluate("hello").unwrap());
/// assert!(!p.evaluate("goodbye").unwrap());
/// ```
pub fn normalized(input: impl Into<Input>) -> Predicate {
    Predicate::DiacriticCaseInsensitive(input.into())
}

/// Create a regex predicate. The pattern is searched anywhere in the subject.
///
/// # Example
///
/// ```rust
/// use textsieve::predicate::*;
///
/// assert!(regex("^Hell.*$").evaluate("Hello blue planet").unwrap());
/// assert!(regex("is.a").evaluate("This is a test").unwrap());
/// assert!(regex("^*$(dis.a").evaluate("x").is_err());
/// ```
pub fn regex(pattern: impl Into<Input>) -> Predicate {
    Predicate::Regex(pattern.into())
}

/// Create a predicate that is true when `input` does not match.
///
/// # Example
///
/// ```rust
/// use textsieve::predicate::*;
///
/// let text = "Hello my little friend";
/// assert!(negate("fiance").evaluate(text).unwrap());
/// assert!(!negate("my").evaluate(text).unwrap());
/// assert!(negate(and(["enemy", "little"])).evaluate(text).unwrap());
/// ```
pub fn negate(input: impl Into<Input>) -> Predicate {
    Predicate::Not(input.into())
}
