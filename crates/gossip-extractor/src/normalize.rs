//! Punctuation normalization
//!
//! Rewrites both scripts' punctuation onto one English-style convention
//! (". " between sentences, single spaces elsewhere) so the same pattern
//! boundaries work for Chinese and English text.

use once_cell::sync::Lazy;
use regex::Regex;

static LIST_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[，、；;]").expect("separator pattern compiles"));

static TERMINATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[。！？!?]").expect("terminator pattern compiles"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Normalize raw text before rule matching.
///
/// - `，、；;` become a space
/// - `。！？!?` become `". "`
/// - every `.` is followed by whitespace
/// - whitespace runs collapse to one space, and the ends are trimmed
pub fn normalize(text: &str) -> String {
    let text = LIST_SEPARATORS.replace_all(text, " ");
    let text = TERMINATORS.replace_all(&text, ". ");
    let text = space_after_periods(&text);
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

fn space_after_periods(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        out.push(c);
        if c == '.' {
            if let Some(next) = chars.peek() {
                if !next.is_whitespace() {
                    out.push(' ');
                }
            }
        }
    }

    out
}
