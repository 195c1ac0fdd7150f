//! Text cleaning and the small text predicates shared by later stages.

use once_cell::sync::Lazy;
use regex::Regex;

// Table-of-contents leader such as "Introduction ........ 12".
static DOT_LEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\.{3,}\s*\d+\s*$").unwrap());

/// Collapses whitespace and strips trailing dot leaders with page numbers.
///
/// Returns an empty string when nothing meaningful remains. Applying it to
/// its own output changes nothing.
pub fn clean_text(text: &str) -> String {
    let mut cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    while let Some(start) = DOT_LEADER.find(&cleaned).map(|m| m.start()) {
        cleaned.truncate(start);
    }
    cleaned
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True when the text has at least one cased character and none lowercase.
pub fn is_upper(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_text("  Chapter \t 1\n Overview  "), "Chapter 1 Overview");
    }

    #[test]
    fn test_strips_dot_leader() {
        assert_eq!(clean_text("Introduction ........ 12"), "Introduction");
        assert_eq!(clean_text("2.1 Scope.....4  "), "2.1 Scope");
        assert_eq!(clean_text("Overview .... 3 .... 7"), "Overview");
    }

    #[test]
    fn test_keeps_ellipsis_without_number() {
        assert_eq!(clean_text("To be continued..."), "To be continued...");
        assert_eq!(clean_text("Version 1.2"), "Version 1.2");
    }

    #[test]
    fn test_leader_only_becomes_empty() {
        assert_eq!(clean_text("........ 5"), "");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn test_clean_text_idempotent() {
        let samples = [
            "Introduction ........ 12",
            "  a  b  ",
            "Overview .... 3 .... 7",
            "x.. ....5",
            "Summary ...",
        ];
        for sample in samples {
            let once = clean_text(sample);
            assert_eq!(clean_text(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn test_is_upper() {
        assert!(is_upper("TABLE OF CONTENTS"));
        assert!(is_upper("PART 2"));
        assert!(!is_upper("Table of Contents"));
        assert!(!is_upper("1.2.3"));
        assert!(!is_upper(""));
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("one  two\tthree"), 3);
        assert_eq!(word_count(""), 0);
    }
}
