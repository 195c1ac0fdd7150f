use log::debug;

use crate::config::Heuristics;
use crate::font_utils::most_common_style;
use crate::model::{DocFeatures, Line};
use crate::normalize::{is_upper, word_count};

/// Infers the style of ordinary paragraph text.
///
/// Only medium-length lines that are not fully uppercase vote; the most
/// frequent style wins. Falls back to the configured defaults when no line
/// qualifies.
pub fn estimate_body_style(lines: &[Line], heuristics: &Heuristics) -> DocFeatures {
    let prose = lines.iter().filter(|line| {
        let words = word_count(&line.text);
        words > heuristics.body_min_words
            && words < heuristics.body_max_words
            && !is_upper(&line.text)
    });

    let features = match most_common_style(prose.map(|line| &line.style)) {
        Some(style) => DocFeatures {
            body_size: f64::from(style.size),
            body_font: style.font,
        },
        None => DocFeatures {
            body_size: heuristics.default_body_size,
            body_font: heuristics.default_body_font.clone(),
        },
    };
    debug!("body style: {}pt {}", features.body_size, features.body_font);
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Style};

    fn line(index: usize, text: &str, size: i32, font: &str) -> Line {
        Line {
            index,
            text: text.to_string(),
            style: Style::new(size, font),
            page_num: 0,
            bbox: BBox::new(0.0, index as f64 * 12.0, 100.0, index as f64 * 12.0 + 10.0),
        }
    }

    #[test]
    fn test_majority_prose_style_wins() {
        let lines = vec![
            line(0, "A Big Title", 24, "Arial-Bold"),
            line(1, "this is ordinary body text with several words", 11, "Times"),
            line(2, "and here is more ordinary body text for you", 11, "Times"),
            line(3, "a caption in a smaller font with words", 8, "Times"),
        ];
        let features = estimate_body_style(&lines, &Heuristics::default());
        assert_eq!(features.body_size, 11.0);
        assert_eq!(features.body_font, "times");
    }

    #[test]
    fn test_word_bounds_are_exclusive() {
        let lines = vec![
            // five words: too short
            line(0, "one two three four five", 14, "Times"),
            // six words: qualifies
            line(1, "one two three four five six", 9, "Times"),
        ];
        let features = estimate_body_style(&lines, &Heuristics::default());
        assert_eq!(features.body_size, 9.0);
    }

    #[test]
    fn test_twenty_word_lines_do_not_vote() {
        let nineteen = vec!["word"; 19].join(" ");
        let twenty = vec!["word"; 20].join(" ");
        let lines = vec![
            line(0, &twenty, 14, "Times"),
            line(1, &twenty, 14, "Times"),
            line(2, &nineteen, 9, "Times"),
        ];
        let features = estimate_body_style(&lines, &Heuristics::default());
        assert_eq!(features.body_size, 9.0);
    }

    #[test]
    fn test_uppercase_lines_do_not_vote() {
        let lines = vec![line(0, "THIS IS AN ALL CAPS BANNER LINE", 16, "Impact")];
        let features = estimate_body_style(&lines, &Heuristics::default());
        assert_eq!(features.body_size, 10.0);
        assert_eq!(features.body_font, "default");
    }

    #[test]
    fn test_defaults_without_lines() {
        let features = estimate_body_style(&[], &Heuristics::default());
        assert_eq!(
            features,
            DocFeatures {
                body_size: 10.0,
                body_font: "default".to_string()
            }
        );
    }
}
