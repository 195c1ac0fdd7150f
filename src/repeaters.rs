//! Running header/footer suppression.

use log::debug;
use std::collections::HashMap;

use crate::config::Heuristics;
use crate::model::{DocumentLayout, Line, PageLayout};
use crate::normalize::clean_text;

/// Cleans every line and drops empties and repeaters.
///
/// A repeater is a line in the top or bottom margin whose cleaned text also
/// occurs on some other page at a vertical position closer than the
/// tolerance. Lines outside the margins are always kept. The returned lines
/// are numbered in document order.
pub fn filter_lines(layout: &DocumentLayout, heuristics: &Heuristics) -> Vec<Line> {
    let cleaned: Vec<Vec<String>> = layout
        .pages
        .iter()
        .map(|page| page.lines.iter().map(|l| clean_text(&l.text)).collect())
        .collect();

    // text -> (page, top) of every occurrence
    let mut occurrences: HashMap<&str, Vec<(usize, f64)>> = HashMap::new();
    for (page, texts) in layout.pages.iter().zip(&cleaned) {
        for (raw, text) in page.lines.iter().zip(texts) {
            if !text.is_empty() {
                occurrences
                    .entry(text.as_str())
                    .or_default()
                    .push((page.number, raw.bbox.top()));
            }
        }
    }

    let mut lines = Vec::with_capacity(layout.line_count());
    let mut dropped = 0usize;

    for (page, texts) in layout.pages.iter().zip(&cleaned) {
        for (raw, text) in page.lines.iter().zip(texts) {
            if text.is_empty() {
                continue;
            }
            let top = raw.bbox.top();
            if in_margin(page, top, heuristics) {
                let repeats = occurrences.get(text.as_str()).map_or(false, |seen| {
                    seen.iter().any(|&(other_page, other_top)| {
                        other_page != page.number
                            && (top - other_top).abs() < heuristics.repeater_tolerance
                    })
                });
                if repeats {
                    debug!("page {}: dropping repeater {:?}", page.number + 1, text);
                    dropped += 1;
                    continue;
                }
            }
            lines.push(Line {
                index: lines.len(),
                text: text.clone(),
                style: raw.style.clone(),
                page_num: page.number,
                bbox: raw.bbox,
            });
        }
    }

    debug!("kept {} lines, dropped {} repeaters", lines.len(), dropped);
    lines
}

fn in_margin(page: &PageLayout, top: f64, heuristics: &Heuristics) -> bool {
    top < page.height * heuristics.margin_fraction
        || top > page.height * (1.0 - heuristics.margin_fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, RawLine, Style};

    fn raw(text: &str, top: f64) -> RawLine {
        RawLine {
            text: text.to_string(),
            bbox: BBox::new(72.0, top, 300.0, top + 10.0),
            style: Style::new(10, "Helvetica"),
        }
    }

    fn page(number: usize, lines: Vec<RawLine>) -> PageLayout {
        PageLayout {
            number,
            height: 800.0,
            lines,
        }
    }

    #[test]
    fn test_header_removed_from_every_page() {
        let layout = DocumentLayout {
            pages: (0..3)
                .map(|n| {
                    page(
                        n,
                        vec![
                            raw("Confidential — Draft", 20.0 + n as f64),
                            raw(&format!("Body text on page {n}"), 400.0),
                        ],
                    )
                })
                .collect(),
        };
        let lines = filter_lines(&layout, &Heuristics::default());
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.text.starts_with("Body text")));
        assert_eq!(lines.iter().map(|l| l.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_footer_matched_after_cleaning() {
        let layout = DocumentLayout {
            pages: vec![
                page(0, vec![raw("ACME  Corp", 780.0)]),
                page(1, vec![raw("ACME Corp", 785.0)]),
            ],
        };
        assert!(filter_lines(&layout, &Heuristics::default()).is_empty());
    }

    #[test]
    fn test_margin_text_far_apart_is_kept() {
        let layout = DocumentLayout {
            pages: vec![
                page(0, vec![raw("Summary", 20.0)]),
                page(1, vec![raw("Summary", 45.0)]),
            ],
        };
        assert_eq!(filter_lines(&layout, &Heuristics::default()).len(), 2);
    }

    #[test]
    fn test_repeated_body_text_is_kept() {
        let layout = DocumentLayout {
            pages: vec![
                page(0, vec![raw("Definitions", 400.0)]),
                page(1, vec![raw("Definitions", 400.0)]),
            ],
        };
        assert_eq!(filter_lines(&layout, &Heuristics::default()).len(), 2);
    }

    #[test]
    fn test_same_page_repetition_is_not_a_repeater() {
        let layout = DocumentLayout {
            pages: vec![page(0, vec![raw("Note", 10.0), raw("Note", 12.0)])],
        };
        assert_eq!(filter_lines(&layout, &Heuristics::default()).len(), 2);
    }

    #[test]
    fn test_empty_lines_discarded() {
        let layout = DocumentLayout {
            pages: vec![page(
                0,
                vec![raw("   ", 300.0), raw("....... 4", 310.0), raw("Kept", 320.0)],
            )],
        };
        let lines = filter_lines(&layout, &Heuristics::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Kept");
        assert_eq!(lines[0].index, 0);
    }
}
