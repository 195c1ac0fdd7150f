//! Positioned-line extraction from PDF content streams.
//!
//! The outline pipeline only needs lines with text, a box, a dominant style
//! and a page index. [`PdfLayoutExtractor`] produces them with `lopdf` by
//! interpreting the text operators of each page's content stream.

use log::{debug, warn};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::font_utils::most_common_style;
use crate::model::{BBox, DocumentLayout, PageLayout, RawLine, Style};

/// US Letter, used when no MediaBox can be found.
pub const DEFAULT_PAGE_HEIGHT: f64 = 792.0;
/// Runs whose baselines differ by at most this much share a line.
pub const BASELINE_TOLERANCE: f64 = 2.0;
// Rough glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f64 = 0.5;

/// Source of positioned lines for a document on disk.
pub trait LayoutExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentLayout>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLayoutExtractor;

impl LayoutExtractor for PdfLayoutExtractor {
    fn extract(&self, path: &Path) -> Result<DocumentLayout> {
        let doc = Document::load(path)?;
        layout_from_document(&doc)
    }
}

/// A piece of text drawn by one show operator, in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    /// Baseline, measured upwards from the bottom of the page.
    pub y: f64,
    pub width: f64,
    pub size: f64,
    pub font_name: String,
}

/// Extracts every page of an already loaded document.
///
/// A document whose page tree yields no pages is an extraction error.
pub fn layout_from_document(doc: &Document) -> Result<DocumentLayout> {
    let pages: Vec<PageLayout> = doc
        .get_pages()
        .values()
        .enumerate()
        .map(|(number, &page_id)| {
            let (bottom, top) = page_extent(doc, page_id);
            let runs = extract_page_runs(doc, page_id);
            let lines = group_runs_into_lines(runs, top);
            debug!("page {}: {} lines", number + 1, lines.len());
            PageLayout {
                number,
                height: top - bottom,
                lines,
            }
        })
        .collect();
    if pages.is_empty() {
        return Err(Error::Extraction("document has no pages".into()));
    }
    Ok(DocumentLayout { pages })
}

type Matrix = [f64; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

fn multiply(m1: &Matrix, m2: &Matrix) -> Matrix {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

fn translation(tx: f64, ty: f64) -> Matrix {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

/// Graphics and text state needed to place runs.
struct TextState<'a> {
    fonts: &'a BTreeMap<Vec<u8>, String>,
    ctm: Matrix,
    saved: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f64,
    font_size: f64,
    font_name: String,
    runs: Vec<TextRun>,
}

impl<'a> TextState<'a> {
    fn new(fonts: &'a BTreeMap<Vec<u8>, String>) -> Self {
        Self {
            fonts,
            ctm: IDENTITY,
            saved: Vec::new(),
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
            leading: 0.0,
            font_size: 12.0,
            font_name: String::new(),
            runs: Vec::new(),
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = multiply(&translation(tx, ty), &self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn advance(&mut self, text_space_units: f64) {
        self.text_matrix = multiply(&translation(text_space_units, 0.0), &self.text_matrix);
    }

    fn set_font(&mut self, operands: &[Object]) {
        if let [Object::Name(name), size] = operands {
            self.font_name = self
                .fonts
                .get(name)
                .cloned()
                .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());
            if let Some(size) = number(size) {
                self.font_size = size;
            }
        }
    }

    fn show(&mut self, text: String) {
        let rendering = multiply(&self.text_matrix, &self.ctm);
        let scale = (rendering[1] * rendering[1] + rendering[3] * rendering[3]).sqrt();
        let advance = text.chars().count() as f64 * self.font_size * AVG_GLYPH_WIDTH;
        if !text.trim().is_empty() {
            self.runs.push(TextRun {
                x: rendering[4],
                y: rendering[5],
                width: advance * scale,
                size: self.font_size * scale,
                font_name: self.font_name.clone(),
                text,
            });
        }
        self.advance(advance);
    }

    fn show_array(&mut self, items: &[Object]) {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&decode_text(bytes)),
                // Large negative kerning is how many producers encode a space.
                other => {
                    if let Some(adjust) = number(other) {
                        if adjust < -200.0 && !combined.ends_with(' ') {
                            combined.push(' ');
                        }
                    }
                }
            }
        }
        self.show(combined);
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            "q" => self.saved.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.saved.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = matrix(operands) {
                    self.ctm = multiply(&m, &self.ctm);
                }
            }
            "BT" => {
                self.text_matrix = IDENTITY;
                self.line_matrix = IDENTITY;
            }
            "Tf" => self.set_font(operands),
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    self.leading = leading;
                }
            }
            "Td" | "TD" => {
                if let [tx, ty] = operands {
                    if let (Some(tx), Some(ty)) = (number(tx), number(ty)) {
                        if operator == "TD" {
                            self.leading = -ty;
                        }
                        self.move_line(tx, ty);
                    }
                }
            }
            "Tm" => {
                if let Some(m) = matrix(operands) {
                    self.line_matrix = m;
                    self.text_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show(decode_text(bytes));
                }
            }
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show(decode_text(bytes));
                }
            }
            "\"" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    self.show(decode_text(bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    self.show_array(items);
                }
            }
            _ => {}
        }
    }
}

fn extract_page_runs(doc: &Document, page_id: ObjectId) -> Vec<TextRun> {
    let data = match doc.get_page_content(page_id) {
        Ok(data) => data,
        Err(e) => {
            warn!("could not read content of page {:?}: {}", page_id, e);
            return Vec::new();
        }
    };
    let content = match Content::decode(&data) {
        Ok(content) => content,
        Err(e) => {
            warn!("could not decode content of page {:?}: {}", page_id, e);
            return Vec::new();
        }
    };

    let fonts = page_font_names(doc, page_id);
    let mut state = TextState::new(&fonts);
    for op in &content.operations {
        state.apply(&op.operator, &op.operands);
    }
    state.runs
}

/// Resource name -> BaseFont name for the fonts a page uses.
fn page_font_names(doc: &Document, page_id: ObjectId) -> BTreeMap<Vec<u8>, String> {
    doc.get_page_fonts(page_id)
        .into_iter()
        .map(|(resource, font)| {
            let name = font
                .get(b"BaseFont")
                .and_then(Object::as_name)
                .map(|n| String::from_utf8_lossy(n).into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&resource).into_owned());
            (resource, name)
        })
        .collect()
}

/// Lower and upper edge of the page's MediaBox, following `Parent` links for
/// inherited boxes.
fn page_extent(doc: &Document, page_id: ObjectId) -> (f64, f64) {
    let mut current = doc.get_dictionary(page_id).ok();
    for _ in 0..32 {
        let Some(dict) = current else { break };
        if let Ok(media_box) = dict.get(b"MediaBox") {
            let media_box = match media_box {
                Object::Reference(id) => doc.get_object(*id).unwrap_or(media_box),
                other => other,
            };
            if let Ok(values) = media_box.as_array() {
                let values: Vec<f64> = values.iter().filter_map(number).collect();
                if let [_, y0, _, y1] = values[..] {
                    return (y0.min(y1), y0.max(y1));
                }
            }
        }
        current = dict
            .get(b"Parent")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
            .ok();
    }
    (0.0, DEFAULT_PAGE_HEIGHT)
}

/// Joins runs sharing a baseline into lines ordered top to bottom, then left
/// to right within a line. Each line takes the style most of its runs use.
///
/// `page_top` is the upper MediaBox edge in user space; boxes are measured
/// downwards from it.
pub fn group_runs_into_lines(mut runs: Vec<TextRun>, page_top: f64) -> Vec<RawLine> {
    runs.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut groups: Vec<Vec<TextRun>> = Vec::new();
    for run in runs {
        match groups.last_mut() {
            Some(group) if (group[0].y - run.y).abs() <= BASELINE_TOLERANCE => group.push(run),
            _ => groups.push(vec![run]),
        }
    }

    groups
        .into_iter()
        .filter_map(|mut group| {
            group.sort_by(|a, b| a.x.total_cmp(&b.x));
            let styles: Vec<Style> = group
                .iter()
                .map(|r| Style::new(r.size.round_ties_even() as i32, &r.font_name))
                .collect();
            let style = most_common_style(&styles)?;

            let text = group.iter().map(|r| r.text.as_str()).collect::<Vec<_>>().join(" ");
            let x0 = group.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
            let x1 = group.iter().map(|r| r.x + r.width).fold(f64::NEG_INFINITY, f64::max);
            let top = group.iter().map(|r| r.y + r.size).fold(f64::NEG_INFINITY, f64::max);
            let baseline = group.iter().map(|r| r.y).fold(f64::INFINITY, f64::min);

            Some(RawLine {
                text,
                bbox: BBox::new(x0, page_top - top, x1, page_top - baseline),
                style,
            })
        })
        .collect()
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

fn matrix(operands: &[Object]) -> Option<Matrix> {
    let values: Vec<f64> = operands.iter().filter_map(number).collect();
    <[f64; 6]>::try_from(values.as_slice()).ok()
}

/// Decodes a PDF string: UTF-16BE with BOM, UTF-8, or single-byte text.
fn decode_text(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
