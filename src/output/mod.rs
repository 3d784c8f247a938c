//! Artifact rendering
//!
//! The pipeline hands its records to an `ArtifactRenderer`. A render failure
//! is logged and never stops the other artifacts from being written.

pub mod docx_writer;

pub use docx_writer::DocxRenderer;

use crate::error::RenderError;
use crate::pipeline::types::{FlashcardRecord, FormulaRecord, SummaryRecord};
use crate::pipeline::PipelineOutput;
use std::path::{Path, PathBuf};

pub const SUMMARIES_FILE: &str = "summaries.docx";
pub const FLASHCARDS_FILE: &str = "flashcards.docx";
pub const FORMULA_SHEET_FILE: &str = "formula_sheet.docx";

/// Writes the three artifact kinds to a destination file
pub trait ArtifactRenderer {
    fn write_summaries(&self, dest: &Path, records: &[SummaryRecord]) -> Result<(), RenderError>;
    fn write_flashcards(&self, dest: &Path, records: &[FlashcardRecord]) -> Result<(), RenderError>;
    fn write_formulas(&self, dest: &Path, records: &[FormulaRecord]) -> Result<(), RenderError>;
}

/// File-name-safe stem: spaces and path separators become underscores
pub fn safe_stem(file: &str) -> String {
    let stem = Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());
    stem.replace([' ', '/', '\\'], "_")
}

fn stem_title(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string())
}

fn attempt(written: &mut Vec<PathBuf>, dest: PathBuf, result: Result<(), RenderError>) {
    match result {
        Ok(()) => written.push(dest),
        Err(e) => tracing::error!("[Render] {}", e),
    }
}

/// Write per-file documents for every processed input, then the three
/// aggregate documents. Returns the paths written.
pub fn render_outputs(
    renderer: &dyn ArtifactRenderer,
    out_dir: &Path,
    output: &PipelineOutput,
) -> Vec<PathBuf> {
    let mut written = Vec::new();

    let per_file = output
        .summaries
        .iter()
        .zip(&output.flashcards)
        .zip(&output.formulas)
        .filter(|((summary, _), _)| !output.is_failed(&summary.file));

    for ((summary, cards), formulas) in per_file {
        let safe = safe_stem(&summary.file);
        let title = stem_title(&summary.file);

        let dest = out_dir.join(format!("{safe}_summary.docx"));
        let record = SummaryRecord {
            file: title.clone(),
            bullets: summary.bullets.clone(),
        };
        let result = renderer.write_summaries(&dest, std::slice::from_ref(&record));
        attempt(&mut written, dest, result);

        let dest = out_dir.join(format!("{safe}_flashcards.docx"));
        let record = FlashcardRecord {
            file: title.clone(),
            cards: cards.cards.clone(),
        };
        let result = renderer.write_flashcards(&dest, std::slice::from_ref(&record));
        attempt(&mut written, dest, result);

        let dest = out_dir.join(format!("{safe}_formula.docx"));
        let record = FormulaRecord {
            file: title,
            formulas: formulas.formulas.clone(),
        };
        let result = renderer.write_formulas(&dest, std::slice::from_ref(&record));
        attempt(&mut written, dest, result);
    }

    let dest = out_dir.join(SUMMARIES_FILE);
    tracing::info!("[Render] Writing: {}", dest.display());
    let result = renderer.write_summaries(&dest, &output.summaries);
    attempt(&mut written, dest, result);

    let dest = out_dir.join(FLASHCARDS_FILE);
    tracing::info!("[Render] Writing: {}", dest.display());
    let result = renderer.write_flashcards(&dest, &output.flashcards);
    attempt(&mut written, dest, result);

    let dest = out_dir.join(FORMULA_SHEET_FILE);
    tracing::info!("[Render] Writing: {}", dest.display());
    let result = renderer.write_formulas(&dest, &output.formulas);
    attempt(&mut written, dest, result);

    written
}
