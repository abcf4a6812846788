//! Diacritic and case folding
//!
//! Folding decomposes text (Unicode NFD), drops combining marks and then
//! lowercases each character on its own, without context-dependent rules
//! such as final sigma. `"HÉLLO"` and `"hello"` fold to the same [`Folded`]
//! value, and a folded word stays a substring of a longer folded word.
//! Subject and payload always go through the same [`fold`], and containment
//! is only offered between two `Folded` values.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Text that has been through [`fold`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Folded(String);

impl Folded {
    /// The folded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `needle` occurs in this text.
    pub fn contains(&self, needle: &Folded) -> bool {
        self.0.contains(needle.as_str())
    }

    /// Extract the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Folded {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Folded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip diacritics and lowercase `text`.
///
/// # Example
///
/// ```rust
/// use textsieve::fold::fold;
///
/// assert_eq!(fold("HÉLLO Wórld").as_str(), "hello world");
/// assert_eq!(fold(fold("Ça va").as_str()), fold("Ça va"));
/// ```
pub fn fold(text: &str) -> Folded {
    Folded(
        text.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect(),
    )
}
