//! Document Parser Module
//!
//! Pure Rust readers for the single-strategy document kinds:
//! - Text: lenient UTF-8 decode, invalid byte sequences dropped
//! - Word: .docx via docx-rs, non-empty paragraphs joined with newlines

use crate::error::ExtractionError;

/// Decode bytes as UTF-8, dropping invalid sequences instead of failing
pub fn read_plain_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }

    tracing::debug!(
        "[DocumentParser] Direct read: {} bytes -> {} chars",
        bytes.len(),
        text.chars().count()
    );

    text
}

/// Extract paragraph text from a DOCX payload
pub fn read_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = doc
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    tracing::debug!("[DocumentParser] DOCX extracted: {} paragraphs", paragraphs.len());

    Ok(paragraphs.join("\n"))
}

/// Concatenate the text runs of a paragraph, including hyperlink runs
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut output = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, &mut output),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = inner {
                        push_run_text(run, &mut output);
                    }
                }
            }
            _ => {}
        }
    }
    output
}

fn push_run_text(run: &docx_rs::Run, output: &mut String) {
    for run_child in &run.children {
        match run_child {
            docx_rs::RunChild::Text(text) => output.push_str(&text.text),
            docx_rs::RunChild::Tab(_) => output.push(' '),
            _ => {}
        }
    }
}
