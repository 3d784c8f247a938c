//! Generative provider boundary
//!
//! A provider exposes the three generation tasks. Network backends only need
//! to implement `CompletionBackend` (one prompt in, one text out) and get the
//! task protocol from `PromptedProvider`.

use super::prompts;
use super::protocol::{parse_flashcards, parse_formulas};
use crate::error::ProviderError;
use crate::pipeline::types::{Flashcard, FormulaEntry};
use async_trait::async_trait;

/// The three generation tasks of the primary path
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &str;

    async fn summarize(&self, text: &str) -> Result<String, ProviderError>;

    async fn flashcards(&self, text: &str, count: usize) -> Result<Vec<Flashcard>, ProviderError>;

    async fn formulas(&self, text: &str) -> Result<Vec<FormulaEntry>, ProviderError>;
}

/// A text-completion endpoint
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Send one system + user prompt pair and return the trimmed reply text
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}

/// Adapts a completion backend to the generation tasks
pub struct PromptedProvider<B> {
    backend: B,
}

impl<B: CompletionBackend> PromptedProvider<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl<B: CompletionBackend> GenerativeProvider for PromptedProvider<B> {
    fn name(&self) -> &str {
        self.backend.name()
    }

    async fn summarize(&self, text: &str) -> Result<String, ProviderError> {
        self.backend
            .complete(prompts::SUMMARY_SYSTEM_PROMPT, &prompts::build_summary_prompt(text))
            .await
    }

    async fn flashcards(&self, text: &str, count: usize) -> Result<Vec<Flashcard>, ProviderError> {
        let raw = self
            .backend
            .complete(
                prompts::FLASHCARD_SYSTEM_PROMPT,
                &prompts::build_flashcard_prompt(text, count),
            )
            .await?;
        Ok(parse_flashcards(&raw))
    }

    async fn formulas(&self, text: &str) -> Result<Vec<FormulaEntry>, ProviderError> {
        let raw = self
            .backend
            .complete(prompts::FORMULA_SYSTEM_PROMPT, &prompts::build_formula_prompt(text))
            .await?;
        Ok(parse_formulas(&raw))
    }
}
