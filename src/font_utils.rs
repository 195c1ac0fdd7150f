use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::model::Style;

// Subset-embedded fonts carry a six-letter tag, e.g. "EAAAAB+Calibri-Bold".
static SUBSET_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{6}\+").unwrap());
static NAME_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-_,]+").unwrap());

/// Canonical form of a font name used as part of a style key.
///
/// Lowercases, drops a subset tag and folds separator runs into a single '-',
/// so "ABCDEF+Arial Bold", "Arial-Bold" and "arial_bold" compare equal.
pub fn normalize_font_name(font_name: &str) -> String {
    let trimmed = font_name.trim();
    let untagged = SUBSET_TAG.replace(trimmed, "");
    let lower = untagged.to_lowercase();
    NAME_SEPARATORS
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

pub fn is_bold_font(font_name: &str) -> bool {
    font_name.to_lowercase().contains("bold")
}

/// Most frequent style; on equal counts the one seen first wins.
pub fn most_common_style<'a, I>(styles: I) -> Option<Style>
where
    I: IntoIterator<Item = &'a Style>,
{
    let mut counts: HashMap<&Style, usize> = HashMap::new();
    let mut order: Vec<&Style> = Vec::new();

    for style in styles {
        let count = counts.entry(style).or_insert(0);
        if *count == 0 {
            order.push(style);
        }
        *count += 1;
    }

    let mut best: Option<(&Style, usize)> = None;
    for style in order {
        let count = counts[style];
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((style, count));
        }
    }
    best.map(|(style, _)| style.clone())
}
