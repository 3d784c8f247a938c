//! Shared types for the extraction and generation pipeline

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Kind of input document, decided by filename suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PlainText,
    Pdf,
    WordDocument,
    Unsupported,
}

impl DocumentKind {
    /// Classify a path by its (case-insensitive) suffix
    ///
    /// Suffix-less files that `mime_guess` recognises as text are treated as
    /// plain text; everything else without a known suffix is unsupported.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase());

        match ext.as_deref() {
            Some("txt") => Self::PlainText,
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::WordDocument,
            Some(_) => Self::Unsupported,
            None => {
                let mime = mime_guess::from_path(path).first_raw();
                match mime {
                    Some(m) if m.starts_with("text/plain") => Self::PlainText,
                    _ => Self::Unsupported,
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain-text",
            Self::Pdf => "pdf",
            Self::WordDocument => "word-document",
            Self::Unsupported => "unsupported",
        }
    }
}

/// One input file with its raw payload
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub identity: PathBuf,
    pub payload: Vec<u8>,
    pub kind: DocumentKind,
}

impl RawDocument {
    pub fn new(identity: impl Into<PathBuf>, payload: Vec<u8>) -> Self {
        let identity = identity.into();
        let kind = DocumentKind::from_path(&identity);
        Self {
            identity,
            payload,
            kind,
        }
    }

    /// Read a document from disk
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let payload = std::fs::read(path)?;
        Ok(Self::new(path, payload))
    }

    /// Base name used as the record title
    pub fn display_name(&self) -> String {
        display_name(&self.identity)
    }
}

/// Base name of a path, falling back to the whole path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Best-effort text recovered from a document. Empty text is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub source: PathBuf,
    pub text: String,
}

impl ExtractedText {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// An equation with its symbol glossary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaEntry {
    pub equation: String,
    pub symbols: BTreeMap<String, String>,
}

impl FormulaEntry {
    pub fn new(equation: impl Into<String>, symbols: BTreeMap<String, String>) -> Self {
        Self {
            equation: equation.into(),
            symbols,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub file: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardRecord {
    pub file: String,
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaRecord {
    pub file: String,
    pub formulas: Vec<FormulaEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_suffix() {
        assert_eq!(DocumentKind::from_path(Path::new("a/notes.txt")), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_path(Path::new("Lecture.PDF")), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_path(Path::new("week1.docx")), DocumentKind::WordDocument);
        assert_eq!(DocumentKind::from_path(Path::new("slides.pptx")), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_path(Path::new("README")), DocumentKind::Unsupported);
    }

    #[test]
    fn test_display_name() {
        let doc = RawDocument::new("/tmp/course/Week 1.txt", Vec::new());
        assert_eq!(doc.display_name(), "Week 1.txt");
    }

    #[test]
    fn test_extracted_text_empty_when_whitespace() {
        let text = ExtractedText {
            source: PathBuf::from("x.txt"),
            text: "  \n\t".to_string(),
        };
        assert!(text.is_empty());
    }
}
