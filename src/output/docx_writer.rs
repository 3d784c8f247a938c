//! Word document rendering for the three artifact sets

use super::ArtifactRenderer;
use crate::error::RenderError;
use crate::pipeline::types::{display_name, FlashcardRecord, FormulaRecord, SummaryRecord};
use docx_rs::{AlignmentType, BreakType, Docx, LineSpacing, Paragraph, Run, Style, StyleType};
use std::fs::File;
use std::path::Path;

const HEADING_1: &str = "Heading1";
const HEADING_2: &str = "Heading2";

/// Space after body paragraphs, in twentieths of a point (6pt)
const PARAGRAPH_SPACING_AFTER: u32 = 120;

/// Renders artifacts as `.docx` files with docx-rs
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }

    fn document(title: &str) -> Docx {
        Docx::new()
            .add_style(
                Style::new(HEADING_1, StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_style(
                Style::new(HEADING_2, StyleType::Paragraph)
                    .name("Heading 2")
                    .size(26)
                    .bold(),
            )
            .add_paragraph(heading(HEADING_1, title))
    }

    fn save(docx: Docx, dest: &Path) -> Result<(), RenderError> {
        let file = File::create(dest).map_err(|source| RenderError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
        docx.build().pack(file).map_err(|e| RenderError::Pack {
            path: dest.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!("[DocxRenderer] Wrote {}", dest.display());
        Ok(())
    }
}

fn heading(style: &str, text: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text))
        .style(style)
}

fn text(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn spaced(paragraph: Paragraph) -> Paragraph {
    paragraph.line_spacing(LineSpacing::new().after(PARAGRAPH_SPACING_AFTER))
}

fn page_break() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
}

/// Section title: the record's base name
fn section_title(file: &str) -> String {
    display_name(Path::new(file))
}

impl ArtifactRenderer for DocxRenderer {
    fn write_summaries(&self, dest: &Path, records: &[SummaryRecord]) -> Result<(), RenderError> {
        let mut docx = Self::document("Lecture Summaries");
        for record in records {
            docx = docx.add_paragraph(heading(HEADING_2, &section_title(&record.file)));
            for bullet in &record.bullets {
                docx = docx.add_paragraph(spaced(text(bullet)));
            }
            docx = docx.add_paragraph(page_break());
        }
        Self::save(docx, dest)
    }

    fn write_flashcards(&self, dest: &Path, records: &[FlashcardRecord]) -> Result<(), RenderError> {
        let mut docx = Self::document("Flashcards");
        for record in records {
            docx = docx.add_paragraph(heading(HEADING_2, &section_title(&record.file)));
            for (i, card) in record.cards.iter().enumerate() {
                let n = i + 1;
                docx = docx
                    .add_paragraph(Paragraph::new().add_run(
                        Run::new().add_text(format!("Q{n}. {}", card.question)).bold(),
                    ))
                    .add_paragraph(spaced(text(&format!("A{n}. {}", card.answer))));
            }
            docx = docx.add_paragraph(page_break());
        }
        Self::save(docx, dest)
    }

    fn write_formulas(&self, dest: &Path, records: &[FormulaRecord]) -> Result<(), RenderError> {
        let mut docx = Self::document("Formula Sheet");
        for record in records {
            docx = docx.add_paragraph(heading(HEADING_2, &section_title(&record.file)));
            for entry in &record.formulas {
                docx = docx.add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text(&entry.equation).italic())
                        .align(AlignmentType::Center),
                );
                if !entry.symbols.is_empty() {
                    docx = docx.add_paragraph(text("Variables:"));
                    for (symbol, description) in &entry.symbols {
                        docx = docx.add_paragraph(text(&format!("{symbol}: {description}")));
                    }
                }
                docx = docx.add_paragraph(Paragraph::new());
            }
            docx = docx.add_paragraph(page_break());
        }
        Self::save(docx, dest)
    }
}
