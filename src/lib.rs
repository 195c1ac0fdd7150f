//! # docoutline
//!
//! Infers a document's title and H1/H2/H3 outline from positioned text lines.
//!
//! The pipeline runs in fixed order, each stage producing a new sequence:
//!
//! 1. [`repeaters`]: clean line text and drop running headers/footers
//! 2. [`body_style`]: infer the style of ordinary paragraph text
//! 3. [`scoring`]: score every line's likelihood of being a heading
//! 4. [`title`]: choose the title and set it aside
//! 5. [`hierarchy`]: rank heading styles into levels and order the outline
//!
//! ```no_run
//! use docoutline::{process_file, Heuristics, PdfLayoutExtractor};
//! use std::path::Path;
//!
//! let result = process_file(&PdfLayoutExtractor, Path::new("report.pdf"), &Heuristics::default());
//! let outline = result.into_outline();
//! println!("{}", outline.title);
//! ```

pub mod batch;
pub mod body_style;
pub mod config;
pub mod error;
pub mod extract;
pub mod font_utils;
pub mod hierarchy;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod repeaters;
pub mod scoring;
pub mod title;

pub use batch::{process_directory, process_file, write_outline, BatchSummary, DocumentResult};
pub use config::Heuristics;
pub use error::{Error, Result};
pub use extract::{LayoutExtractor, PdfLayoutExtractor};
pub use model::{
    BBox, DocFeatures, DocumentLayout, DocumentOutline, HeadingLevel, Line, OutlineEntry,
    PageLayout, RawLine, ScoredLine, Style,
};
pub use pipeline::analyze_layout;
