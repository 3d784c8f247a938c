//! OCR strategy
//!
//! Last-resort extraction for scanned PDFs. Rasterizes the first pages with
//! `pdftoppm` and recognises each page with `tesseract`, both as external
//! programs. When either tool is missing the strategy reports
//! `ToolUnavailable` and the cascade ends empty.

use super::PdfStrategy;
use crate::error::ExtractionError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Resolution used when rasterizing pages
pub const OCR_DPI: u32 = 200;

/// Only the first pages are rasterized
pub const OCR_MAX_PAGES: u32 = 5;

#[derive(Debug, Clone)]
pub struct TesseractOcr {
    pub dpi: u32,
    pub max_pages: u32,
    pub rasterizer: String,
    pub recognizer: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            dpi: OCR_DPI,
            max_pages: OCR_MAX_PAGES,
            rasterizer: "pdftoppm".to_string(),
            recognizer: "tesseract".to_string(),
        }
    }
}

impl TesseractOcr {
    fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
        let prefix = out_dir.join("page");
        let output = Command::new(&self.rasterizer)
            .args([
                "-r",
                &self.dpi.to_string(),
                "-f",
                "1",
                "-l",
                &self.max_pages.to_string(),
                "-png",
            ])
            .arg(pdf)
            .arg(&prefix)
            .output()
            .map_err(|_| ExtractionError::ToolUnavailable("pdftoppm"))?;

        if !output.status.success() {
            return Err(ExtractionError::Ocr(format!(
                "pdftoppm failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        // pdftoppm zero-pads page numbers to the width of the page count, so a
        // lexical sort of the names is page order
        let mut pages: Vec<PathBuf> = std::fs::read_dir(out_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("png"))
            .collect();
        pages.sort();
        Ok(pages)
    }

    fn recognize(&self, image: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(&self.recognizer)
            .arg(image)
            .arg("stdout")
            .output()
            .map_err(|_| ExtractionError::ToolUnavailable("tesseract"))?;

        if !output.status.success() {
            return Err(ExtractionError::Ocr(format!(
                "tesseract failed on {}: {}",
                image.display(),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PdfStrategy for TesseractOcr {
    fn name(&self) -> &'static str {
        "ocr"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let scratch = tempfile::tempdir()?;
        let pdf_path = scratch.path().join("input.pdf");
        std::fs::write(&pdf_path, bytes)?;

        let images_dir = scratch.path().join("pages");
        std::fs::create_dir(&images_dir)?;

        let pages = self.rasterize(&pdf_path, &images_dir)?;
        tracing::info!("[OCR] Rasterized {} page(s) at {} DPI", pages.len(), self.dpi);

        let mut parts = Vec::with_capacity(pages.len());
        for page in pages.iter().take(self.max_pages as usize) {
            parts.push(self.recognize(page)?);
        }

        Ok(parts.join("\n").trim().to_string())
    }
}
