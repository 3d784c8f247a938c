//! Pipeline Driver
//!
//! Runs extract -> normalize -> generate for each input in order and collects
//! the three aggregate record sets. A file that cannot be read, or whose
//! processing panics, is recorded with empty results under its full path, and
//! the run carries on. Extraction misses are ordinary empty records.

use super::orchestrator::GenerationOrchestrator;
use super::types::{
    display_name, DocumentKind, Flashcard, FlashcardRecord, FormulaEntry, FormulaRecord,
    RawDocument, SummaryRecord,
};
use crate::extract::DocumentExtractor;
use crate::text::normalize;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

/// Aggregate documents written by a previous run into the same directory
const AGGREGATE_ARTIFACTS: [&str; 3] = ["summaries.docx", "flashcards.docx", "formula_sheet.docx"];

/// Supported lecture files under `dir`, recursively, sorted by path
///
/// Aggregate output documents from earlier runs are skipped.
pub fn discover_inputs(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("[Pipeline] Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            !AGGREGATE_ARTIFACTS.contains(&name.as_str())
        })
        .filter(|entry| DocumentKind::from_path(entry.path()) != DocumentKind::Unsupported)
        .map(|entry| entry.into_path())
        .collect();

    paths.sort();
    paths
}

/// One unit of work: a path still to be read, or an already loaded document
#[derive(Debug, Clone)]
pub enum PipelineInput {
    Path(PathBuf),
    Loaded(RawDocument),
}

impl PipelineInput {
    pub fn identity(&self) -> &Path {
        match self {
            Self::Path(path) => path,
            Self::Loaded(doc) => &doc.identity,
        }
    }

    fn load(self) -> std::io::Result<RawDocument> {
        match self {
            Self::Path(path) => RawDocument::from_path(&path),
            Self::Loaded(doc) => Ok(doc),
        }
    }
}

impl From<PathBuf> for PipelineInput {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<RawDocument> for PipelineInput {
    fn from(doc: RawDocument) -> Self {
        Self::Loaded(doc)
    }
}

/// Generated material for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileArtifacts {
    pub summary: Vec<String>,
    pub flashcards: Vec<Flashcard>,
    pub formulas: Vec<FormulaEntry>,
}

/// Aggregate results of a run, one record per input in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    pub summaries: Vec<SummaryRecord>,
    pub flashcards: Vec<FlashcardRecord>,
    pub formulas: Vec<FormulaRecord>,
    /// Full paths of inputs that failed outright
    pub failed: Vec<String>,
}

impl PipelineOutput {
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn is_failed(&self, file: &str) -> bool {
        self.failed.iter().any(|f| f == file)
    }

    fn push(&mut self, file: String, artifacts: FileArtifacts) {
        self.summaries.push(SummaryRecord {
            file: file.clone(),
            bullets: artifacts.summary,
        });
        self.flashcards.push(FlashcardRecord {
            file: file.clone(),
            cards: artifacts.flashcards,
        });
        self.formulas.push(FormulaRecord {
            file,
            formulas: artifacts.formulas,
        });
    }

    fn push_failure(&mut self, identity: &Path) {
        let file = identity.display().to_string();
        self.failed.push(file.clone());
        self.push(file, FileArtifacts::default());
    }
}

pub struct PipelineDriver {
    extractor: DocumentExtractor,
    orchestrator: GenerationOrchestrator,
}

impl PipelineDriver {
    pub fn new(extractor: DocumentExtractor, orchestrator: GenerationOrchestrator) -> Self {
        Self {
            extractor,
            orchestrator,
        }
    }

    /// Extract, normalize and generate for a single document
    pub async fn process_document(&self, doc: &RawDocument) -> FileArtifacts {
        let extracted = self.extractor.extract(doc);
        if extracted.is_empty() {
            info!(
                "[Pipeline] No text recovered from {} ({})",
                doc.identity.display(),
                doc.kind.as_str()
            );
        }
        let clean = normalize(&extracted.text);

        let summary = self.orchestrator.summarize(&clean).await;
        let flashcards = self.orchestrator.flashcards(&clean, &summary).await;
        let formulas = self.orchestrator.formulas(&clean).await;

        FileArtifacts {
            summary,
            flashcards,
            formulas,
        }
    }

    async fn process_input(&self, input: PipelineInput) -> std::io::Result<FileArtifacts> {
        let doc = input.load()?;
        Ok(self.process_document(&doc).await)
    }

    /// Process every input in order
    pub async fn run<I>(&self, inputs: I) -> PipelineOutput
    where
        I: IntoIterator,
        I::Item: Into<PipelineInput>,
    {
        let mut output = PipelineOutput::default();

        for input in inputs {
            let input: PipelineInput = input.into();
            let identity = input.identity().to_path_buf();
            info!("[Pipeline] Processing: {}", identity.display());

            let outcome = AssertUnwindSafe(self.process_input(input))
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(artifacts)) => output.push(display_name(&identity), artifacts),
                Ok(Err(e)) => {
                    error!("[Pipeline] Failed processing {}: {}", identity.display(), e);
                    output.push_failure(&identity);
                }
                Err(_) => {
                    error!("[Pipeline] Processing {} panicked", identity.display());
                    output.push_failure(&identity);
                }
            }
        }

        info!(
            "[Pipeline] Processed {} file(s), {} failed",
            output.len(),
            output.failed.len()
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::extract::PdfStrategy;
    use crate::fallback::LocalSummarizer;
    use std::fs;
    use tempfile::TempDir;

    struct Explodes;

    impl PdfStrategy for Explodes {
        fn name(&self) -> &'static str {
            "explodes"
        }

        fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
            panic!("malformed font table");
        }
    }

    fn local_driver() -> PipelineDriver {
        PipelineDriver::new(
            DocumentExtractor::with_pdf_cascade(vec![Box::new(Explodes)]),
            GenerationOrchestrator::new(None, false),
        )
    }

    struct Collapses;

    impl LocalSummarizer for Collapses {
        fn summarize_chunks(&self, _chunks: &[String]) -> Vec<String> {
            panic!("summarizer state poisoned");
        }
    }

    const LECTURE: &str = "Velocity is the rate of change of position.\n\nv = d / t\nwhere v is velocity, d is distance, t is time.";

    #[test]
    fn test_discover_inputs_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("week2")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.PDF"), "a").unwrap();
        fs::write(dir.path().join("week2").join("c.docx"), "c").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::write(dir.path().join("summaries.docx"), "old output").unwrap();

        let found = discover_inputs(dir.path());
        assert_eq!(
            found,
            vec![
                dir.path().join("a.PDF"),
                dir.path().join("b.txt"),
                dir.path().join("week2").join("c.docx"),
            ]
        );
    }

    #[tokio::test]
    async fn test_text_document_end_to_end() {
        let driver = local_driver();
        let doc = RawDocument::new("/notes/kinematics.txt", LECTURE.as_bytes().to_vec());
        let output = driver.run(vec![doc]).await;

        assert_eq!(output.len(), 1);
        assert!(output.failed.is_empty());
        assert_eq!(output.summaries[0].file, "kinematics.txt");
        assert!(!output.summaries[0].bullets.is_empty());
        assert!(!output.flashcards[0].cards.is_empty());
        let formula = &output.formulas[0].formulas[0];
        assert_eq!(formula.equation, "$ v = d / t $");
        assert_eq!(formula.symbols.get("d").map(String::as_str), Some("distance"));
    }

    #[tokio::test]
    async fn test_unsupported_document_yields_empty_records() {
        let driver = local_driver();
        let doc = RawDocument::new("/notes/slides.pptx", b"binary".to_vec());
        let output = driver.run(vec![doc]).await;

        assert!(output.failed.is_empty());
        assert_eq!(output.summaries[0].file, "slides.pptx");
        assert!(output.summaries[0].bullets.is_empty());
        assert!(output.flashcards[0].cards.is_empty());
        assert!(output.formulas[0].formulas.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_isolated_per_file() {
        let driver = local_driver();
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, LECTURE).unwrap();
        let missing = dir.path().join("missing.txt");

        let inputs = vec![
            PipelineInput::Loaded(RawDocument::new("/notes/broken.pdf", b"%PDF-1.4".to_vec())),
            PipelineInput::Path(missing.clone()),
            PipelineInput::Path(good),
        ];
        let output = driver.run(inputs).await;

        assert_eq!(output.len(), 3);
        assert_eq!(output.failed, vec![missing.display().to_string()]);

        // A PDF whose only strategy panics is an extraction miss
        assert_eq!(output.summaries[0].file, "broken.pdf");
        assert!(output.summaries[0].bullets.is_empty());
        assert!(output.flashcards[0].cards.is_empty());
        assert!(output.formulas[0].formulas.is_empty());
        assert!(!output.is_failed("broken.pdf"));
        assert!(!output.is_failed("/notes/broken.pdf"));

        assert_eq!(output.summaries[1].file, missing.display().to_string());
        assert!(output.flashcards[1].cards.is_empty());
        assert_eq!(output.summaries[2].file, "good.txt");
        assert!(!output.summaries[2].bullets.is_empty());
        assert!(!output.is_failed("good.txt"));
    }

    #[tokio::test]
    async fn test_panic_during_generation_is_isolated() {
        let driver = PipelineDriver::new(
            DocumentExtractor::with_pdf_cascade(Vec::new()),
            GenerationOrchestrator::with_summarizer_factory(
                None,
                false,
                Box::new(|| Box::new(Collapses)),
            ),
        );
        let output = driver
            .run(vec![
                RawDocument::new("/notes/kinematics.txt", LECTURE.as_bytes().to_vec()),
                RawDocument::new("/notes/blank.txt", b"  ".to_vec()),
            ])
            .await;

        assert_eq!(output.failed, vec!["/notes/kinematics.txt".to_string()]);
        assert_eq!(output.summaries[0].file, "/notes/kinematics.txt");
        assert!(output.formulas[0].formulas.is_empty());
        assert_eq!(output.summaries[1].file, "blank.txt");
        assert!(!output.is_failed("blank.txt"));
    }
}
