//! Per-document recovery and directory processing.

use log::{info, warn};
use serde::Serialize;
use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::config::Heuristics;
use crate::error::Result;
use crate::extract::LayoutExtractor;
use crate::model::DocumentOutline;
use crate::pipeline::analyze_layout;

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentResult {
    Parsed(DocumentOutline),
    Failed { reason: String },
}

impl DocumentResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentResult::Failed { .. })
    }

    /// The outline to persist; failures become the error sentinel.
    pub fn into_outline(self) -> DocumentOutline {
        match self {
            DocumentResult::Parsed(outline) => outline,
            DocumentResult::Failed { .. } => DocumentOutline::error_sentinel(),
        }
    }
}

/// Extracts and analyzes one document. Extraction errors and panics are
/// reported as [`DocumentResult::Failed`], never propagated.
pub fn process_file<E>(extractor: &E, path: &Path, heuristics: &Heuristics) -> DocumentResult
where
    E: LayoutExtractor + ?Sized,
{
    info!("Processing {}...", display_name(path));
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        extractor
            .extract(path)
            .map(|layout| analyze_layout(&layout, heuristics))
    }));

    match outcome {
        Ok(Ok(outline)) => DocumentResult::Parsed(outline),
        Ok(Err(e)) => {
            warn!("failed to process {}: {}", display_name(path), e);
            DocumentResult::Failed {
                reason: e.to_string(),
            }
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            warn!("failed to process {}: {}", display_name(path), reason);
            DocumentResult::Failed { reason }
        }
    }
}

/// Counts for a finished directory run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Processes every PDF in `input_dir` (sorted by file name) and writes one
/// `<stem>.json` per document into `output_dir`, which is created if needed.
///
/// A document that fails still gets an output file holding the sentinel.
/// Only I/O on the directories or output files aborts the run.
pub fn process_directory<E>(
    extractor: &E,
    input_dir: &Path,
    output_dir: &Path,
    heuristics: &Heuristics,
) -> Result<BatchSummary>
where
    E: LayoutExtractor + ?Sized,
{
    fs::create_dir_all(output_dir)?;

    let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_pdf(path))
        .collect();
    inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut summary = BatchSummary::default();
    for input in &inputs {
        let result = process_file(extractor, input, heuristics);
        if result.is_failed() {
            summary.failed += 1;
        }
        summary.processed += 1;

        let output = output_path_for(input, output_dir);
        write_outline(&result.into_outline(), &output)?;
        info!(" - Saved output to {}", output.display());
    }

    info!("processed {} documents ({} failed)", summary.processed, summary.failed);
    Ok(summary)
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
}

/// `<output_dir>/<input stem>.json`
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{stem}.json"))
}

/// Writes the outline as JSON indented by four spaces.
pub fn write_outline(outline: &DocumentOutline, path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    outline.serialize(&mut serializer)?;
    fs::write(path, buf)?;
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected internal fault".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("a/report.pdf")));
        assert!(is_pdf(Path::new("SCAN.PDF")));
        assert!(!is_pdf(Path::new("notes.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("/in/file01.pdf"), Path::new("/out")),
            PathBuf::from("/out/file01.json")
        );
    }

    #[test]
    fn test_failed_result_becomes_sentinel() {
        let result = DocumentResult::Failed {
            reason: "broken xref".into(),
        };
        assert!(result.is_failed());
        assert_eq!(result.into_outline(), DocumentOutline::error_sentinel());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(payload.as_ref()), "unexpected internal fault");
    }
}
