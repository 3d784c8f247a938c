//! Document Extraction
//!
//! Turns a `RawDocument` into best-effort text. Extraction never fails: every
//! strategy error (or panic) is logged and treated as "no text", and the
//! caller receives an empty `ExtractedText` when nothing worked.
//!
//! ## Strategy
//! - Text: lenient decode
//! - Word: paragraph text
//! - PDF: text layer per page -> whole-document parser -> OCR of first pages
//! - Anything else: empty

pub mod document_parser;
pub mod ocr;
pub mod pdf;

use crate::error::ExtractionError;
use crate::pipeline::types::{DocumentKind, ExtractedText, RawDocument};

pub use ocr::TesseractOcr;
pub use pdf::{PageTextLayer, WholeDocumentText};

/// One way of recovering text from PDF bytes
pub trait PdfStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Per-kind cascading extractor
pub struct DocumentExtractor {
    pdf_cascade: Vec<Box<dyn PdfStrategy>>,
}

impl DocumentExtractor {
    /// Extractor with the standard PDF cascade
    pub fn new() -> Self {
        Self::with_pdf_cascade(vec![
            Box::new(PageTextLayer),
            Box::new(WholeDocumentText),
            Box::new(TesseractOcr::default()),
        ])
    }

    /// Extractor with a custom, ordered PDF cascade
    pub fn with_pdf_cascade(pdf_cascade: Vec<Box<dyn PdfStrategy>>) -> Self {
        Self { pdf_cascade }
    }

    /// Extract text from a document; empty text means nothing was recovered
    pub fn extract(&self, doc: &RawDocument) -> ExtractedText {
        let text = match doc.kind {
            DocumentKind::PlainText => document_parser::read_plain_text(&doc.payload),
            DocumentKind::WordDocument => match pdf::guarded("docx", || {
                document_parser::read_docx(&doc.payload)
            }) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        "[DocumentExtractor] DOCX extraction failed for {}: {}",
                        doc.identity.display(),
                        e
                    );
                    String::new()
                }
            },
            DocumentKind::Pdf => self.extract_pdf(doc),
            DocumentKind::Unsupported => {
                tracing::debug!(
                    "[DocumentExtractor] Unsupported file type: {}",
                    doc.identity.display()
                );
                String::new()
            }
        };

        ExtractedText {
            source: doc.identity.clone(),
            text,
        }
    }

    /// Run the PDF cascade, stopping at the first strategy with non-empty text
    ///
    /// A strategy that panics counts as a failed step.
    fn extract_pdf(&self, doc: &RawDocument) -> String {
        for strategy in &self.pdf_cascade {
            match pdf::guarded(strategy.name(), || strategy.extract(&doc.payload)) {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        tracing::info!(
                            "[DocumentExtractor] PDF SUCCESS via {}: {} chars from {}",
                            strategy.name(),
                            text.len(),
                            doc.identity.display()
                        );
                        return text.to_string();
                    }
                    tracing::debug!(
                        "[DocumentExtractor] {} produced no text for {}",
                        strategy.name(),
                        doc.identity.display()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "[DocumentExtractor] {} FAILED for {}: {}",
                        strategy.name(),
                        doc.identity.display(),
                        e
                    );
                }
            }
        }

        tracing::warn!(
            "[DocumentExtractor] No strategy recovered text from {}",
            doc.identity.display()
        );
        String::new()
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}
