//! Text Filter Example
//!
//! This example builds a few predicates and runs them over a list of
//! subjects: plain containment, accent-insensitive matching, regexes,
//! negation and error handling.
//!
//! Run with: cargo run --example filters

use textsieve::prelude::*;

fn main() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Text Filter Example ===\n");

    composition();
    normalization();
    regexes();
    shared_matcher();
    errors();
}

/// Demonstrates AND / OR / NOT composition
fn composition() {
    println!("--- Composition ---\n");

    // "H" && ("e" || "i") && "llo"
    let p = and([literal("H"), nested(or(["e", "i"])), literal("llo")]);
    println!("{}", p);
    for subject in ["Hello", "Hillo", "Hallo", "Hiyo"] {
        println!("  {:<8} {:?}", subject, evaluate(&p, subject));
    }

    // Same shape with builder methods
    let p = Predicate::literal("Hello").or(and(["W", "o", "r", "l", "d"]));
    println!("\n{}", p);
    for subject in ["Hello", "World", "Goodbye"] {
        println!("  {:<8} {:?}", subject, subject.contains_predicate(&p));
    }

    let p = and(["enemy", "little"]).negate();
    println!(
        "\n{} on 'Hello my little friend': {:?}\n",
        p,
        evaluate(&p, "Hello my little friend")
    );
}

/// Demonstrates diacritic- and case-insensitive matching
fn normalization() {
    println!("--- Normalization ---\n");

    let p = normalized("héllo").or(normalized("wórld"));
    println!("{}", p);
    for subject in ["hello", "WORLD", "HeLLo!", "Goodbye"] {
        println!("  {:<8} {:?}", subject, evaluate(&p, subject));
    }

    // Literals stay case-sensitive, even next to a normalized node
    let p = and([nested(normalized("HELLO")), nested(negate("hello"))]);
    println!("\n{} on 'Hello': {:?}\n", p, evaluate(&p, "Hello"));
}

/// Demonstrates regex leaves
fn regexes() {
    println!("--- Regexes ---\n");

    let p = and([literal("test"), literal("string"), nested(regex("is.a"))]);
    println!("{}", p);
    for subject in ["This is a test string", "This is not a valid string"] {
        println!("  {:<28} {:?}", subject, evaluate(&p, subject));
    }
    println!();
}

/// Demonstrates filtering with a caching matcher
fn shared_matcher() {
    println!("--- Matcher ---\n");

    let matcher = Matcher::with_config(MatcherConfig::new().with_pattern_cache());
    let p = or([nested(regex(r"(?i)\binvoice\b")), nested(normalized("facturé"))]);
    let inbox = [
        "Invoice #42 attached",
        "Lunch on Friday?",
        "FACTURE du mois",
        "re: invoice",
    ];

    match matcher.filter(&p, inbox) {
        Ok(hits) => println!("{} matched {:?}", p, hits),
        Err(e) => println!("filter failed: {}", e),
    }
    println!("cached patterns: {}\n", matcher.cached_patterns());
}

/// Demonstrates error reporting
fn errors() {
    println!("--- Errors ---\n");

    let bad_pattern = regex("^*$(dis.a");
    match evaluate(&bad_pattern, "This is a test string") {
        Ok(matched) => println!("unexpected result: {}", matched),
        Err(e) => println!("{}: {}", bad_pattern, e),
    }

    let bad_nesting = normalized(nested(regex("a.*")));
    match evaluate(&bad_nesting, "abc") {
        Ok(matched) => println!("unexpected result: {}", matched),
        Err(e) => println!("{}: {}", bad_nesting, e),
    }
}
