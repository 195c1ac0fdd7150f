//! Style ranking and outline assembly.

use log::debug;
use std::collections::HashMap;

use crate::config::Heuristics;
use crate::model::{HeadingLevel, OutlineEntry, ScoredLine, Style};

/// Maps each candidate style to a heading level and emits the outline in
/// reading order.
///
/// Styles are ranked by size, then boldness, with first appearance breaking
/// remaining ties. Only the top `max_levels` styles (at most three) get a
/// level; candidates in other styles are left out. Levels are not checked for
/// nesting, so an H3 may follow an H1 directly.
pub fn build_outline(
    candidates: &[ScoredLine<'_>],
    heuristics: &Heuristics,
) -> Vec<OutlineEntry> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut styles: Vec<&Style> = Vec::new();
    for candidate in candidates {
        if !styles.contains(&&candidate.line.style) {
            styles.push(&candidate.line.style);
        }
    }
    styles.sort_by(|a, b| (b.size, b.is_bold()).cmp(&(a.size, a.is_bold())));

    let levels: HashMap<&Style, HeadingLevel> = styles
        .iter()
        .take(heuristics.max_levels)
        .enumerate()
        .filter_map(|(rank, style)| HeadingLevel::from_rank(rank).map(|level| (*style, level)))
        .collect();

    for (style, level) in &levels {
        debug!("{level} <- {style}");
    }
    if styles.len() > levels.len() {
        debug!("{} lower-ranked styles left out of the outline", styles.len() - levels.len());
    }

    let mut placed: Vec<(usize, f64, OutlineEntry)> = candidates
        .iter()
        .filter_map(|candidate| {
            let line = candidate.line;
            levels.get(&line.style).map(|&level| {
                (
                    line.page_num,
                    line.bbox.top(),
                    OutlineEntry {
                        level,
                        text: line.text.clone(),
                        page: line.page_num + 1,
                    },
                )
            })
        })
        .collect();

    placed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
    placed.into_iter().map(|(_, _, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Line};

    fn line(index: usize, page: usize, top: f64, text: &str, size: i32, font: &str) -> Line {
        Line {
            index,
            text: text.to_string(),
            style: Style::new(size, font),
            page_num: page,
            bbox: BBox::new(72.0, top, 400.0, top + size as f64),
        }
    }

    fn scored(lines: &[Line]) -> Vec<ScoredLine<'_>> {
        lines
            .iter()
            .map(|line| ScoredLine {
                line,
                score: 10.0,
                is_title_candidate: false,
            })
            .collect()
    }

    #[test]
    fn test_empty_candidates() {
        assert!(build_outline(&[], &Heuristics::default()).is_empty());
    }

    #[test]
    fn test_levels_by_size_then_bold() {
        let lines = vec![
            line(0, 0, 100.0, "1.1 Minor", 14, "Arial"),
            line(1, 0, 200.0, "1.2 Bold Minor", 14, "Arial-Bold"),
            line(2, 0, 50.0, "1 Major", 18, "Arial"),
        ];
        let outline = build_outline(&scored(&lines), &Heuristics::default());
        let got: Vec<(HeadingLevel, &str)> =
            outline.iter().map(|e| (e.level, e.text.as_str())).collect();
        assert_eq!(
            got,
            vec![
                (HeadingLevel::H1, "1 Major"),
                (HeadingLevel::H3, "1.1 Minor"),
                (HeadingLevel::H2, "1.2 Bold Minor"),
            ]
        );
    }

    #[test]
    fn test_at_most_three_styles() {
        let lines: Vec<Line> = (0..5)
            .map(|i| line(i, 0, 100.0 * i as f64, &format!("Heading {i}"), 20 - i as i32, "Arial"))
            .collect();
        let outline = build_outline(&scored(&lines), &Heuristics::default());
        assert_eq!(outline.len(), 3);
        assert_eq!(outline[2].level, HeadingLevel::H3);
        assert!(outline.iter().all(|e| e.text != "Heading 3" && e.text != "Heading 4"));
    }

    #[test]
    fn test_reading_order_and_one_based_pages() {
        let lines = vec![
            line(0, 2, 300.0, "C", 16, "Arial"),
            line(1, 0, 500.0, "B", 16, "Arial"),
            line(2, 0, 120.0, "A", 16, "Arial"),
        ];
        let outline = build_outline(&scored(&lines), &Heuristics::default());
        let got: Vec<(&str, usize)> = outline.iter().map(|e| (e.text.as_str(), e.page)).collect();
        assert_eq!(got, vec![("A", 1), ("B", 1), ("C", 3)]);
    }

    #[test]
    fn test_font_name_variants_share_a_level() {
        let lines = vec![
            line(0, 0, 100.0, "Scope", 16, "Arial-Bold"),
            line(1, 0, 200.0, "Terms", 16, "Arial Bold"),
            line(2, 0, 300.0, "Detail", 12, "Arial"),
        ];
        let outline = build_outline(&scored(&lines), &Heuristics::default());
        assert_eq!(outline[0].level, HeadingLevel::H1);
        assert_eq!(outline[1].level, HeadingLevel::H1);
        assert_eq!(outline[2].level, HeadingLevel::H2);
    }

    #[test]
    fn test_max_levels_override() {
        let lines = vec![
            line(0, 0, 100.0, "Big", 20, "Arial"),
            line(1, 0, 200.0, "Small", 12, "Arial"),
        ];
        let h = Heuristics {
            max_levels: 1,
            ..Heuristics::default()
        };
        let outline = build_outline(&scored(&lines), &h);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, "Big");
    }
}
