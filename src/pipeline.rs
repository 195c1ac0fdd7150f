use log::debug;

use crate::body_style::estimate_body_style;
use crate::config::Heuristics;
use crate::hierarchy::build_outline;
use crate::model::{DocumentLayout, DocumentOutline};
use crate::repeaters::filter_lines;
use crate::scoring::score_lines;
use crate::title::{finalize_title, select_title};

/// Runs every stage over one extracted document.
///
/// Never fails: an empty layout yields the fallback title and no outline.
pub fn analyze_layout(layout: &DocumentLayout, heuristics: &Heuristics) -> DocumentOutline {
    let lines = filter_lines(layout, heuristics);
    let features = estimate_body_style(&lines, heuristics);
    let candidates = score_lines(&lines, &features, heuristics);
    let selection = select_title(candidates, &lines);
    let outline = build_outline(&selection.outline_candidates, heuristics);
    let title = finalize_title(&selection.title, outline.is_empty(), heuristics);

    debug!("title {:?} with {} outline entries", title, outline.len());
    DocumentOutline { title, outline }
}
