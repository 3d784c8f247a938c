pub mod driver;
pub mod orchestrator;
pub mod types;

pub use driver::{discover_inputs, FileArtifacts, PipelineDriver, PipelineInput, PipelineOutput};
pub use orchestrator::GenerationOrchestrator;
pub use types::{
    DocumentKind, ExtractedText, Flashcard, FlashcardRecord, FormulaEntry, FormulaRecord,
    RawDocument, SummaryRecord,
};
