//! PDF text-layer strategies
//!
//! Two structural extractors with different parsing heuristics:
//! - `PageTextLayer`: lopdf, page by page, pages joined with newlines
//! - `WholeDocumentText`: pdf-extract over the whole file
//!
//! Both parsers can panic on malformed fonts/glyphs, so every call goes
//! through `guarded`.

use super::PdfStrategy;
use crate::error::ExtractionError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Run a parser call, turning a panic into a strategy failure
pub(crate) fn guarded<F>(strategy: &'static str, f: F) -> Result<String, ExtractionError>
where
    F: FnOnce() -> Result<String, ExtractionError>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(_panic) => {
            tracing::error!(
                "[PdfExtraction] {} PANICKED - likely malformed font/glyph",
                strategy
            );
            Err(ExtractionError::Panicked(strategy))
        }
    }
}

/// Primary strategy: lopdf text layer, one page at a time
#[derive(Debug, Default)]
pub struct PageTextLayer;

impl PdfStrategy for PageTextLayer {
    fn name(&self) -> &'static str {
        "page-text-layer"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        guarded(self.name(), || {
            let document =
                lopdf::Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

            let pages: Vec<String> = document
                .get_pages()
                .keys()
                .map(|&page_number| match document.extract_text(&[page_number]) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::debug!(
                            "[PdfExtraction] page {} has no readable text layer: {}",
                            page_number,
                            e
                        );
                        String::new()
                    }
                })
                .collect();

            tracing::debug!("[PdfExtraction] lopdf read {} pages", pages.len());
            Ok(pages.join("\n").trim().to_string())
        })
    }
}

/// Alternative strategy: pdf-extract over the whole document
#[derive(Debug, Default)]
pub struct WholeDocumentText;

impl PdfStrategy for WholeDocumentText {
    fn name(&self) -> &'static str {
        "whole-document-text"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        guarded(self.name(), || {
            pdf_extract::extract_text_from_mem(bytes)
                .map(|text| text.trim().to_string())
                .map_err(|e| ExtractionError::Pdf(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DocumentExtractor;
    use crate::pipeline::types::RawDocument;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    const PAGE_TEXT: &str = "Force equals mass times acceleration";

    /// Single-page PDF with one line of Helvetica text
    fn lecture_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(PAGE_TEXT)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn collapse(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_guarded_converts_panic() {
        let result = guarded("boom", || panic!("malformed glyph"));
        assert!(matches!(result, Err(ExtractionError::Panicked("boom"))));
    }

    #[test]
    fn test_guarded_passes_through() {
        let result = guarded("ok", || Ok("text".to_string()));
        assert_eq!(result.unwrap(), "text");
    }

    #[test]
    fn test_garbage_bytes_fail_without_panicking() {
        assert!(PageTextLayer.extract(b"definitely not a pdf").is_err());
        assert!(WholeDocumentText.extract(b"definitely not a pdf").is_err());
    }

    #[test]
    fn test_page_text_layer_reads_text() {
        let text = PageTextLayer.extract(&lecture_pdf()).unwrap();
        assert!(collapse(&text).contains(PAGE_TEXT), "got {text:?}");
    }

    #[test]
    fn test_whole_document_text_reads_text() {
        let text = WholeDocumentText.extract(&lecture_pdf()).unwrap();
        assert!(collapse(&text).contains(PAGE_TEXT), "got {text:?}");
    }

    #[test]
    fn test_default_cascade_reads_pdf() {
        let doc = RawDocument::new("mechanics.pdf", lecture_pdf());
        let extracted = DocumentExtractor::new().extract(&doc);
        assert!(collapse(&extracted.text).contains(PAGE_TEXT));
    }
}
