//! Entity name matching
//!
//! Names are recognized purely by shape, with no dictionary:
//! - a run of 1-16 Han characters, ASCII letters, digits or underscores
//! - 1-3 whitespace-separated Latin words, each `[A-Za-z][A-Za-z0-9_]*`
//!
//! Common nouns that happen to fit the shape are accepted as names too.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of characters in a Han-script name
pub const MAX_HAN_CHARS: usize = 16;

/// Maximum number of words in a Latin-script name
pub const MAX_LATIN_WORDS: usize = 3;

const LATIN_WORD: &str = r"[A-Za-z][A-Za-z0-9_]*";

/// How much text a name capture should take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Fewest characters that still let the rest of the pattern match
    Shortest,
    /// Most characters that still let the rest of the pattern match
    Longest,
}

impl Span {
    fn quantifier_suffix(self) -> &'static str {
        match self {
            Self::Shortest => "?",
            Self::Longest => "",
        }
    }
}

/// Regex fragment for a Latin-script name
pub fn latin_name(span: Span) -> String {
    format!(
        r"{LATIN_WORD}(?:\s+{LATIN_WORD}){{0,{}}}{}",
        MAX_LATIN_WORDS - 1,
        span.quantifier_suffix()
    )
}

/// Regex fragment for a Han-script name
pub fn han_name(span: Span) -> String {
    format!(
        r"[\p{{Han}}A-Za-z0-9_]{{1,{MAX_HAN_CHARS}}}{}",
        span.quantifier_suffix()
    )
}

/// Named capture group matching a name in either script.
///
/// The Latin alternative is tried first.
pub fn name_group(group: &str, span: Span) -> String {
    format!(
        "(?P<{group}>{}|{})",
        latin_name(span),
        han_name(span)
    )
}

static WHOLE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^(?:{}|{})$",
        latin_name(Span::Longest),
        han_name(Span::Longest)
    ))
    .expect("entity name pattern compiles")
});

/// Check whether `candidate` has the shape of an entity name
pub fn is_entity_name(candidate: &str) -> bool {
    WHOLE_NAME.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_names() {
        assert!(is_entity_name("ZhenHuan"));
        assert!(is_entity_name("King GuoJun"));
        assert!(is_entity_name("Lady Hua Fei"));
        assert!(is_entity_name("agent_007"));
        assert!(!is_entity_name("The Grand Old Duke"));
        assert!(!is_entity_name("007agent x"));
    }

    #[test]
    fn test_han_names() {
        assert!(is_entity_name("甄嬛"));
        assert!(is_entity_name("果郡王"));
        assert!(is_entity_name("华妃2号"));
        assert!(is_entity_name(&"甄".repeat(MAX_HAN_CHARS)));
        assert!(!is_entity_name(&"甄".repeat(MAX_HAN_CHARS + 1)));
    }

    #[test]
    fn test_rejects_punctuation_and_empty() {
        assert!(!is_entity_name(""));
        assert!(!is_entity_name("甄嬛."));
        assert!(!is_entity_name(" A"));
        assert!(!is_entity_name("A-B"));
    }

    #[test]
    fn test_shortest_span_stops_before_connector() {
        let re = Regex::new(&format!(r"{}\s+loves", name_group("n", Span::Shortest))).unwrap();
        let caps = re.captures("ZhenHuan loves King GuoJun").unwrap();
        assert_eq!(&caps["n"], "ZhenHuan");
    }

    #[test]
    fn test_longest_span_takes_all_words() {
        let re = Regex::new(&format!(r"loves\s+{}", name_group("n", Span::Longest))).unwrap();
        let caps = re.captures("ZhenHuan loves King GuoJun").unwrap();
        assert_eq!(&caps["n"], "King GuoJun");
    }
}
