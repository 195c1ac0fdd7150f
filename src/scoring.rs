//! Per-line heading likelihood.
//!
//! Each line is scored from its own typography and text plus its immediate
//! neighbours in document order. Signals are additive; two multiplicative
//! adjustments follow (paragraph damping and the first-page title boost).

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Heuristics;
use crate::model::{DocFeatures, Line, ScoredLine};
use crate::normalize::{is_upper, word_count};

/// Decimal outline numbers ("1", "2.3", "4.1.2"), "Appendix A"/"Chapter 3"
/// prefixes and Roman numerals followed by a period.
pub static NUMBERED_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((\d{1,2}(\.\d{1,2})*)|(Appendix|Chapter)\s+[A-Z0-9\s:]|([IVXLCDM]+\.))").unwrap()
});

const BULLET_MARKERS: &[char] = &['•', '-', '●', '◦', '▪'];

/// Score of line `index` in `lines` and whether it looks like a title rather
/// than a numbered section heading.
pub fn score_line(
    lines: &[Line],
    index: usize,
    features: &DocFeatures,
    heuristics: &Heuristics,
) -> (f64, bool) {
    let line = &lines[index];
    let text = line.text.as_str();

    if is_rejected(text, heuristics) {
        return (0.0, false);
    }
    let words = word_count(text);

    let mut score = 0.0;
    let mut is_title_candidate = false;

    let size = f64::from(line.style.size);
    if size > features.body_size + heuristics.size_margin {
        score += (size - features.body_size) * heuristics.size_multiplier;
    }

    if line.style.is_bold() {
        score += heuristics.bold_bonus;
    }

    if is_upper(text) && words > 1 {
        score += heuristics.all_caps_bonus;
    }

    if NUMBERED_HEADING.is_match(text) {
        score += heuristics.numbering_bonus;
    } else {
        is_title_candidate = true;
    }

    let prev = index.checked_sub(1).map(|i| &lines[i]);
    let next = lines.get(index + 1);

    if prev.map_or(true, |p| p.page_num != line.page_num) {
        score += heuristics.page_top_bonus;
    }

    if let (Some(p), Some(n)) = (prev, next) {
        if p.style == line.style && n.style == line.style {
            score *= heuristics.paragraph_damping;
        }
    }

    if is_title_candidate && line.page_num == 0 {
        score *= heuristics.first_page_title_boost;
    }

    (score, is_title_candidate)
}

/// Lines that can never be headings, whatever their typography.
fn is_rejected(text: &str, heuristics: &Heuristics) -> bool {
    let words = word_count(text);
    if words == 0 || words > heuristics.max_heading_words {
        return true;
    }
    if text.ends_with('.') && words > heuristics.sentence_min_words {
        return true;
    }
    if text.starts_with(BULLET_MARKERS) {
        return true;
    }
    if !text.chars().any(char::is_alphabetic) {
        return true;
    }
    words == 1 && text.chars().count() > heuristics.max_single_word_chars
}

/// Every line scoring strictly above the candidate threshold, in document order.
pub fn score_lines<'a>(
    lines: &'a [Line],
    features: &DocFeatures,
    heuristics: &Heuristics,
) -> Vec<ScoredLine<'a>> {
    let candidates: Vec<ScoredLine<'a>> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let (score, is_title_candidate) = score_line(lines, i, features, heuristics);
            (score > heuristics.candidate_threshold).then_some(ScoredLine {
                line,
                score,
                is_title_candidate,
            })
        })
        .collect();
    debug!("{} of {} lines are heading candidates", candidates.len(), lines.len());
    candidates
}
