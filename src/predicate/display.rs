//! Compact infix rendering of predicate trees, for logs and assertion messages.

use std::fmt;

use super::{Input, Predicate};

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Literal(text) => write!(f, "{:?}", text),
            Input::Nested(predicate) => fmt::Display::fmt(predicate, f),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Or(items) => write_joined(f, items, " || ", "false"),
            Predicate::And(items) => write_joined(f, items, " && ", "true"),
            Predicate::DiacriticCaseInsensitive(Input::Literal(text)) => write!(f, "~{:?}", text),
            Predicate::Regex(Input::Literal(pattern)) => write!(f, "/{}/", pattern),
            // Literal-only nodes holding a nested payload show the nested kind
            Predicate::DiacriticCaseInsensitive(Input::Nested(inner)) => {
                write!(f, "~<nested {}: {}>", inner.kind(), inner)
            }
            Predicate::Regex(Input::Nested(inner)) => {
                write!(f, "=~<nested {}: {}>", inner.kind(), inner)
            }
            Predicate::Not(input) => write!(f, "!{}", input),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    items: &[Input],
    sep: &str,
    empty: &str,
) -> fmt::Result {
    match items {
        [] => f.write_str(empty),
        [single] => write!(f, "{}", single),
        _ => {
            f.write_str("(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{}", item)?;
            }
            f.write_str(")")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::predicate::*;

    #[test]
    fn test_display_literals_and_groups() {
        let p = and([literal("a"), nested(or(["b", "c"]))]);
        assert_eq!(p.to_string(), r#"("a" && ("b" || "c"))"#);
    }

    #[test]
    fn test_display_leaves() {
        assert_eq!(normalized("héllo").to_string(), r#"~"héllo""#);
        assert_eq!(regex("^Hell.*$").to_string(), "/^Hell.*$/");
        assert_eq!(negate(and(["x", "y"])).to_string(), r#"!("x" && "y")"#);
    }

    #[test]
    fn test_display_marks_nested_payload_of_literal_only_nodes() {
        assert_eq!(regex(or(["a"])).to_string(), r#"=~<nested or: "a">"#);
        assert_eq!(
            normalized(regex("a.*")).to_string(),
            "~<nested regex: /a.*/>"
        );
        assert_eq!(
            normalized(and(["x", "y"])).to_string(),
            r#"~<nested and: ("x" && "y")>"#
        );
    }

    #[test]
    fn test_display_empty_and_single() {
        assert_eq!(and(Vec::<Input>::new()).to_string(), "true");
        assert_eq!(or(Vec::<Input>::new()).to_string(), "false");
        assert_eq!(or(["only"]).to_string(), r#""only""#);
    }
}
