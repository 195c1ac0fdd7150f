//! Data types flowing through the outline pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::font_utils;

/// Axis-aligned box in top-down page coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y0
    }
}

/// Typographic unit of comparison: rounded size and normalized font name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Style {
    pub size: i32,
    pub font: String,
}

impl Style {
    /// Builds a style, normalizing the font name so that spelling variants
    /// such as `Arial-Bold` and `ABCDEF+Arial Bold` share one key.
    pub fn new(size: i32, font: &str) -> Self {
        Self {
            size,
            font: font_utils::normalize_font_name(font),
        }
    }

    pub fn is_bold(&self) -> bool {
        font_utils::is_bold_font(&self.font)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt {}", self.size, self.font)
    }
}

/// A line as delivered by the layout extractor, before any cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLine {
    pub text: String,
    pub bbox: BBox,
    pub style: Style,
}

/// All lines of one page, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Zero-based page index.
    pub number: usize,
    pub height: f64,
    pub lines: Vec<RawLine>,
}

/// Extractor output for a whole document, pages in natural order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}

/// A cleaned line that survived header/footer suppression.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Position in the document-wide ordered sequence.
    pub index: usize,
    pub text: String,
    pub style: Style,
    pub page_num: usize,
    pub bbox: BBox,
}

/// Document-wide facts derived once from the full line set.
#[derive(Debug, Clone, PartialEq)]
pub struct DocFeatures {
    pub body_size: f64,
    pub body_font: String,
}

/// A line that passed the heading threshold.
#[derive(Debug, Clone, Copy)]
pub struct ScoredLine<'a> {
    pub line: &'a Line,
    pub score: f64,
    pub is_title_candidate: bool,
}

impl ScoredLine<'_> {
    /// Identity comparison: the same line of the same document.
    pub fn is_same_line(&self, other: &Line) -> bool {
        self.line.index == other.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Level for the style at `rank` (0 = most prominent); `None` past H3.
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(HeadingLevel::H1),
            1 => Some(HeadingLevel::H2),
            2 => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    /// One-based page number.
    pub page: usize,
}

/// Persisted result for one document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    pub const ERROR_TITLE: &'static str = "Error processing file";

    /// Sentinel reported for a document that could not be processed.
    pub fn error_sentinel() -> Self {
        Self {
            title: Self::ERROR_TITLE.to_string(),
            outline: Vec::new(),
        }
    }
}
