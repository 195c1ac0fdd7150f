use log::debug;

use crate::config::Heuristics;
use crate::model::{Line, ScoredLine};
use crate::normalize::word_count;

pub const UNTITLED: &str = "Untitled Document";

/// Chosen title plus the candidates left over for the outline.
#[derive(Debug)]
pub struct TitleSelection<'a> {
    pub title: String,
    pub outline_candidates: Vec<ScoredLine<'a>>,
}

/// Picks the best-scoring title candidate, preferring unnumbered lines and
/// then anything on the first page. Without a usable candidate the largest
/// first-page line becomes the title and every candidate stays in the outline.
pub fn select_title<'a>(candidates: Vec<ScoredLine<'a>>, lines: &[Line]) -> TitleSelection<'a> {
    let mut pool: Vec<&ScoredLine<'a>> =
        candidates.iter().filter(|c| c.is_title_candidate).collect();
    if pool.is_empty() {
        pool = candidates.iter().filter(|c| c.line.page_num == 0).collect();
    }

    let best = pool.into_iter().fold(None::<&ScoredLine<'a>>, |best, c| match best {
        Some(b) if b.score >= c.score => Some(b),
        _ => Some(c),
    });

    match best.map(|b| b.line) {
        Some(title_line) => {
            debug!("title from candidate line {}: {:?}", title_line.index, title_line.text);
            let outline_candidates = candidates
                .into_iter()
                .filter(|c| !c.is_same_line(title_line))
                .collect();
            TitleSelection {
                title: title_line.text.trim().to_string(),
                outline_candidates,
            }
        }
        None => TitleSelection {
            title: fallback_title(lines),
            outline_candidates: candidates,
        },
    }
}

/// Largest-font line on the first page, or [`UNTITLED`].
pub fn fallback_title(lines: &[Line]) -> String {
    let largest = lines
        .iter()
        .filter(|l| l.page_num == 0)
        .fold(None::<&Line>, |best, l| match best {
            Some(b) if b.style.size >= l.style.size => Some(b),
            _ => Some(l),
        });
    match largest {
        Some(line) => {
            debug!("fallback title: {:?}", line.text);
            line.text.trim().to_string()
        }
        None => UNTITLED.to_string(),
    }
}

/// Shortens an overlong title when no outline was found, which is typical
/// of flyers and forms whose largest text is a block of prose.
pub fn finalize_title(title: &str, outline_is_empty: bool, heuristics: &Heuristics) -> String {
    if outline_is_empty && word_count(title) > heuristics.title_truncate_trigger_words {
        let words: Vec<&str> = title.split_whitespace().collect();
        let mut short = words[..heuristics.title_truncate_keep_words.min(words.len())].join(" ");
        if words.len() > heuristics.title_truncate_keep_words {
            short.push_str(&heuristics.title_ellipsis);
        }
        return short;
    }
    title.trim().to_string()
}
