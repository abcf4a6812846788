//! Builder methods for composing predicates
//!
//! Method chaining over [`Predicate`] values, the counterpart of the free
//! functions in the parent module. Chaining the same operator extends the
//! existing node instead of nesting a new one, so
//! `a.and(b).and(c)` is a single `And([a, b, c])`.

use super::{Input, Predicate};

impl Predicate {
    /// A single-literal containment check, `Or([text])`.
    ///
    /// Useful as the start of a method chain.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textsieve::Predicate;
    ///
    /// let p = Predicate::literal("Hello").or("World");
    /// assert!(p.evaluate("World!").unwrap());
    /// ```
    pub fn literal(text: impl Into<String>) -> Self {
        Predicate::Or(vec![Input::Literal(text.into())])
    }

    /// Combine with AND logic.
    ///
    /// If `self` is already an `And`, `other` is appended to its items;
    /// otherwise the result is `And([self, other])`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textsieve::predicate::*;
    ///
    /// let p = or(["Hello", "World"]).and("!");
    /// assert!(p.evaluate("Hello!").unwrap());
    /// assert!(!p.evaluate("Hello").unwrap());
    /// ```
    pub fn and(self, other: impl Into<Input>) -> Self {
        match self {
            Predicate::And(mut items) => {
                items.push(other.into());
                Predicate::And(items)
            }
            predicate => Predicate::And(vec![predicate.into(), other.into()]),
        }
    }

    /// Combine with OR logic.
    ///
    /// If `self` is already an `Or`, `other` is appended to its items;
    /// otherwise the result is `Or([self, other])`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textsieve::predicate::*;
    ///
    /// let p = normalized("héllo").or(normalized("wórld"));
    /// assert!(p.evaluate("WORLD").unwrap());
    /// assert!(!p.evaluate("GOODBYE").unwrap());
    /// ```
    pub fn or(self, other: impl Into<Input>) -> Self {
        match self {
            Predicate::Or(mut items) => {
                items.push(other.into());
                Predicate::Or(items)
            }
            predicate => Predicate::Or(vec![predicate.into(), other.into()]),
        }
    }

    /// Invert the predicate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textsieve::predicate::*;
    ///
    /// let p = or(["friend", "big"]).negate();
    /// assert!(!p.evaluate("Hello my little friend").unwrap());
    /// ```
    pub fn negate(self) -> Self {
        Predicate::Not(self.into())
    }
}
