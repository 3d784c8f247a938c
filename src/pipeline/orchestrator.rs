//! Generation Orchestrator
//!
//! Runs the three generation tasks for one document. Each task is an ordered
//! cascade of steps: the provider first, then the local fallbacks. A step
//! either yields a non-empty result or a `FailureReason`, and the first
//! success wins. Every task degrades to an empty result instead of failing.
//!
//! Fallback steps run when the provider is absent, or when it fails and the
//! run is not strict. In strict mode a present provider's failure is final.

use crate::ai::protocol::summary_bullets;
use crate::ai::GenerativeProvider;
use crate::config::AgentConfig;
use crate::error::ProviderError;
use crate::fallback::{
    frequency_summarizer_factory, keyword_questions, merge_pairs, questions_from_bullets,
    LocalSummarizer, SummarizerFactory,
};
use crate::formulas::mine_formulas;
use crate::pipeline::types::{Flashcard, FormulaEntry};
use crate::text::chunk_prefix;
use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

/// Token budget per chunk sent to the provider for summaries
pub const SUMMARY_CHUNK_TOKENS: usize = 512;
/// Chunks sent to the provider for summaries
pub const SUMMARY_CHUNKS: usize = 6;
/// Token budget per chunk handed to the local summarizer
pub const FALLBACK_CHUNK_TOKENS: usize = 256;
/// Chunks handed to the local summarizer
pub const FALLBACK_CHUNKS: usize = 4;
/// Flashcards requested from the provider
pub const FLASHCARD_COUNT: usize = 20;
/// Cap on flashcards per document
pub const MAX_FLASHCARDS: usize = 40;

/// Why a cascade step produced nothing
#[derive(Debug)]
pub enum FailureReason {
    /// No provider configured
    Absent,
    Provider(ProviderError),
    /// The step ran but produced nothing usable
    Empty,
}

pub type Attempt<T> = Result<T, FailureReason>;

fn non_empty<T>(items: Vec<T>) -> Attempt<Vec<T>> {
    if items.is_empty() {
        Err(FailureReason::Empty)
    } else {
        Ok(items)
    }
}

/// Ordered evaluation of the steps of one task
struct Cascade<T> {
    task: &'static str,
    result: Option<T>,
}

impl<T> Cascade<T> {
    fn start(task: &'static str, step: &'static str, outcome: Attempt<T>) -> Self {
        let mut cascade = Self { task, result: None };
        cascade.record(step, outcome);
        cascade
    }

    fn or_else(mut self, enabled: bool, step: &'static str, run: impl FnOnce() -> Attempt<T>) -> Self {
        if self.result.is_some() {
            return self;
        }
        if !enabled {
            debug!("[Orchestrator] {}: skipping {}", self.task, step);
            return self;
        }
        let outcome = run();
        self.record(step, outcome);
        self
    }

    fn record(&mut self, step: &'static str, outcome: Attempt<T>) {
        match outcome {
            Ok(value) => {
                debug!("[Orchestrator] {}: {} succeeded", self.task, step);
                self.result = Some(value);
            }
            Err(FailureReason::Absent) => {
                debug!("[Orchestrator] {}: no provider configured", self.task);
            }
            Err(FailureReason::Provider(e)) => {
                warn!("[Orchestrator] {}: {} failed: {}", self.task, step, e);
            }
            Err(FailureReason::Empty) => {
                info!("[Orchestrator] {}: {} returned nothing", self.task, step);
            }
        }
    }

    fn finish(self) -> Option<T> {
        self.result
    }
}

/// Lazily built local summarizer shared by every document of a run
pub struct SummarizerCell {
    cell: OnceCell<Box<dyn LocalSummarizer>>,
    factory: SummarizerFactory,
}

impl SummarizerCell {
    pub fn new(factory: SummarizerFactory) -> Self {
        Self {
            cell: OnceCell::new(),
            factory,
        }
    }

    pub fn get(&self) -> &dyn LocalSummarizer {
        self.cell
            .get_or_init(|| {
                info!("[Orchestrator] Loading local summarizer");
                (self.factory)()
            })
            .as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

pub struct GenerationOrchestrator {
    provider: Option<Box<dyn GenerativeProvider>>,
    strict: bool,
    summarizer: SummarizerCell,
}

impl GenerationOrchestrator {
    pub fn new(provider: Option<Box<dyn GenerativeProvider>>, strict: bool) -> Self {
        Self::with_summarizer_factory(provider, strict, frequency_summarizer_factory())
    }

    pub fn from_config(provider: Option<Box<dyn GenerativeProvider>>, config: &AgentConfig) -> Self {
        Self::new(provider, config.strict)
    }

    pub fn with_summarizer_factory(
        provider: Option<Box<dyn GenerativeProvider>>,
        strict: bool,
        factory: SummarizerFactory,
    ) -> Self {
        Self {
            provider,
            strict,
            summarizer: SummarizerCell::new(factory),
        }
    }

    /// Whether the local summarizer has been built yet
    pub fn summarizer_loaded(&self) -> bool {
        self.summarizer.is_initialized()
    }

    fn fallbacks_enabled(&self) -> bool {
        !(self.strict && self.provider.is_some())
    }

    /// Summary bullets for a normalized document
    pub async fn summarize(&self, clean: &str) -> Vec<String> {
        if clean.trim().is_empty() {
            return Vec::new();
        }

        let primary = self.provider_summary(clean).await;
        Cascade::start("summarize", "provider", primary)
            .or_else(self.fallbacks_enabled(), "local summarizer", || {
                self.local_summary(clean)
            })
            .finish()
            .unwrap_or_default()
    }

    async fn provider_summary(&self, clean: &str) -> Attempt<Vec<String>> {
        let provider = self.provider.as_ref().ok_or(FailureReason::Absent)?;
        let chunks = chunk_prefix(clean, SUMMARY_CHUNK_TOKENS, SUMMARY_CHUNKS);
        let prompt_text = if chunks.is_empty() {
            clean.to_string()
        } else {
            chunks.join("\n\n")
        };
        match provider.summarize(&prompt_text).await {
            Ok(reply) => non_empty(summary_bullets(&reply)),
            Err(e) => Err(FailureReason::Provider(e)),
        }
    }

    fn local_summary(&self, clean: &str) -> Attempt<Vec<String>> {
        let chunks = chunk_prefix(clean, FALLBACK_CHUNK_TOKENS, FALLBACK_CHUNKS);
        non_empty(self.summarizer.get().summarize_chunks(&chunks))
    }

    /// Flashcards for a normalized document; `summary` is this document's
    /// already computed summary
    pub async fn flashcards(&self, clean: &str, summary: &[String]) -> Vec<Flashcard> {
        if clean.trim().is_empty() {
            return Vec::new();
        }

        let primary = match &self.provider {
            None => Err(FailureReason::Absent),
            Some(provider) => match provider.flashcards(clean, FLASHCARD_COUNT).await {
                Ok(cards) => non_empty(merge_pairs(cards, MAX_FLASHCARDS)),
                Err(e) => Err(FailureReason::Provider(e)),
            },
        };
        // Keyword questions replace a missing or failed provider, not an empty one
        let provider_unusable = matches!(
            primary,
            Err(FailureReason::Absent | FailureReason::Provider(_))
        );
        let fallbacks = self.fallbacks_enabled();

        let cards = Cascade::start("flashcards", "provider", primary)
            .or_else(fallbacks && provider_unusable, "keyword questions", || {
                non_empty(keyword_questions(clean))
            })
            .or_else(fallbacks, "summary bullets", || {
                non_empty(questions_from_bullets(summary))
            })
            .finish()
            .unwrap_or_default();

        merge_pairs(cards, MAX_FLASHCARDS)
    }

    /// Formula sheet entries for a normalized document
    pub async fn formulas(&self, clean: &str) -> Vec<FormulaEntry> {
        if clean.trim().is_empty() {
            return Vec::new();
        }

        let primary = match &self.provider {
            None => Err(FailureReason::Absent),
            Some(provider) => match provider.formulas(clean).await {
                Ok(entries) => non_empty(entries),
                Err(e) => Err(FailureReason::Provider(e)),
            },
        };

        Cascade::start("formulas", "provider", primary)
            .or_else(self.fallbacks_enabled(), "formula miner", || {
                non_empty(mine_formulas(clean))
            })
            .finish()
            .unwrap_or_default()
    }
}
