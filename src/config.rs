//! Heuristic weights and thresholds.
//!
//! Every number the pipeline uses lives here as a named default. A
//! [`Heuristics`] value carries the effective settings; fields missing from an
//! override file keep their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Lines whose top edge lies above this fraction of the page height (or below
/// `1 - fraction`) are eligible for header/footer suppression.
pub const MARGIN_FRACTION: f64 = 0.1;
/// Maximum vertical distance between two occurrences of a repeater.
pub const REPEATER_TOLERANCE: f64 = 10.0;

/// Body-text lines have strictly more words than this...
pub const BODY_MIN_WORDS: usize = 5;
/// ...and strictly fewer than this.
pub const BODY_MAX_WORDS: usize = 20;
pub const DEFAULT_BODY_SIZE: f64 = 10.0;
pub const DEFAULT_BODY_FONT: &str = "default";

pub const MAX_HEADING_WORDS: usize = 15;
/// A line ending in '.' with more words than this reads as a sentence.
pub const SENTENCE_MIN_WORDS: usize = 3;
pub const MAX_SINGLE_WORD_CHARS: usize = 25;

pub const SIZE_MARGIN: f64 = 1.0;
pub const SIZE_MULTIPLIER: f64 = 2.0;
pub const BOLD_BONUS: f64 = 4.0;
pub const ALL_CAPS_BONUS: f64 = 1.5;
pub const NUMBERING_BONUS: f64 = 8.0;
pub const PAGE_TOP_BONUS: f64 = 2.0;
pub const PARAGRAPH_DAMPING: f64 = 0.3;
pub const FIRST_PAGE_TITLE_BOOST: f64 = 1.5;
pub const CANDIDATE_THRESHOLD: f64 = 3.0;

pub const MAX_LEVELS: usize = 3;

pub const TITLE_TRUNCATE_TRIGGER_WORDS: usize = 15;
pub const TITLE_TRUNCATE_KEEP_WORDS: usize = 8;
pub const TITLE_ELLIPSIS: &str = "...";

/// Effective heuristics for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    pub margin_fraction: f64,
    pub repeater_tolerance: f64,
    pub body_min_words: usize,
    pub body_max_words: usize,
    pub default_body_size: f64,
    pub default_body_font: String,
    pub max_heading_words: usize,
    pub sentence_min_words: usize,
    pub max_single_word_chars: usize,
    pub size_margin: f64,
    pub size_multiplier: f64,
    pub bold_bonus: f64,
    pub all_caps_bonus: f64,
    pub numbering_bonus: f64,
    pub page_top_bonus: f64,
    pub paragraph_damping: f64,
    pub first_page_title_boost: f64,
    pub candidate_threshold: f64,
    pub max_levels: usize,
    pub title_truncate_trigger_words: usize,
    pub title_truncate_keep_words: usize,
    pub title_ellipsis: String,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            margin_fraction: MARGIN_FRACTION,
            repeater_tolerance: REPEATER_TOLERANCE,
            body_min_words: BODY_MIN_WORDS,
            body_max_words: BODY_MAX_WORDS,
            default_body_size: DEFAULT_BODY_SIZE,
            default_body_font: DEFAULT_BODY_FONT.to_string(),
            max_heading_words: MAX_HEADING_WORDS,
            sentence_min_words: SENTENCE_MIN_WORDS,
            max_single_word_chars: MAX_SINGLE_WORD_CHARS,
            size_margin: SIZE_MARGIN,
            size_multiplier: SIZE_MULTIPLIER,
            bold_bonus: BOLD_BONUS,
            all_caps_bonus: ALL_CAPS_BONUS,
            numbering_bonus: NUMBERING_BONUS,
            page_top_bonus: PAGE_TOP_BONUS,
            paragraph_damping: PARAGRAPH_DAMPING,
            first_page_title_boost: FIRST_PAGE_TITLE_BOOST,
            candidate_threshold: CANDIDATE_THRESHOLD,
            max_levels: MAX_LEVELS,
            title_truncate_trigger_words: TITLE_TRUNCATE_TRIGGER_WORDS,
            title_truncate_keep_words: TITLE_TRUNCATE_KEEP_WORDS,
            title_ellipsis: TITLE_ELLIPSIS.to_string(),
        }
    }
}

impl Heuristics {
    /// Load overrides from a JSON object; absent keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let heuristics: Heuristics = serde_json::from_str(json)?;
        heuristics.validate()?;
        Ok(heuristics)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject settings that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..0.5).contains(&self.margin_fraction) {
            return Err(Error::Config(format!(
                "margin_fraction must be in [0, 0.5), got {}",
                self.margin_fraction
            )));
        }
        if self.repeater_tolerance < 0.0 {
            return Err(Error::Config("repeater_tolerance must not be negative".into()));
        }
        if self.body_min_words >= self.body_max_words {
            return Err(Error::Config(format!(
                "body_min_words ({}) must be below body_max_words ({})",
                self.body_min_words, self.body_max_words
            )));
        }
        if self.max_levels == 0 || self.max_levels > 3 {
            return Err(Error::Config(format!(
                "max_levels must be between 1 and 3, got {}",
                self.max_levels
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let h = Heuristics::default();
        assert_eq!(h.candidate_threshold, 3.0);
        assert_eq!(h.repeater_tolerance, 10.0);
        assert_eq!(h.max_levels, 3);
        assert_eq!(h.default_body_font, "default");
        assert!(h.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let h = Heuristics::from_json_str(r#"{"bold_bonus": 6.5}"#).unwrap();
        assert_eq!(h.bold_bonus, 6.5);
        assert_eq!(h.numbering_bonus, NUMBERING_BONUS);
    }

    #[test]
    fn test_invalid_levels_rejected() {
        let err = Heuristics::from_json_str(r#"{"max_levels": 5}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Heuristics::from_json_str("{not json"),
            Err(Error::Json(_))
        ));
    }
}
