//! Local Summarizer
//!
//! Deterministic extractive summarizer used when the generative provider is
//! absent or fails. Each chunk is reduced to its highest-scoring sentences,
//! scored by normalised content-word frequency within the chunk, and emitted
//! in original order.

use crate::text::{content_words, split_sentences};
use std::collections::HashMap;

/// Word budget per chunk summary
pub const SUMMARY_MAX_WORDS: usize = 60;

/// Local summarization capability
pub trait LocalSummarizer: Send + Sync {
    /// One summary per non-empty chunk, in chunk order
    fn summarize_chunks(&self, chunks: &[String]) -> Vec<String>;
}

/// Builds a summarizer on first use
pub type SummarizerFactory = Box<dyn Fn() -> Box<dyn LocalSummarizer> + Send + Sync>;

/// Factory for the default frequency summarizer
pub fn frequency_summarizer_factory() -> SummarizerFactory {
    Box::new(|| Box::new(FrequencySummarizer::new()))
}

#[derive(Debug, Clone)]
pub struct FrequencySummarizer {
    max_words: usize,
}

impl FrequencySummarizer {
    pub fn new() -> Self {
        Self::with_budget(SUMMARY_MAX_WORDS)
    }

    pub fn with_budget(max_words: usize) -> Self {
        tracing::info!("[LocalSummarizer] Initialized frequency summarizer ({} words/chunk)", max_words);
        Self {
            max_words: max_words.max(1),
        }
    }

    fn summarize(&self, text: &str) -> String {
        let sentences = split_sentences(text);
        if sentences.len() <= 1 {
            return text.to_string();
        }

        let mut frequency: HashMap<String, usize> = HashMap::new();
        for word in content_words(text) {
            *frequency.entry(word).or_insert(0) += 1;
        }
        let max_freq = frequency.values().copied().max().unwrap_or(1) as f32;

        let mut ranked: Vec<(usize, f32, usize)> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| {
                let words = sentence.split_whitespace().count().max(1);
                let score: f32 = content_words(sentence)
                    .map(|w| frequency.get(&w).copied().unwrap_or(0) as f32 / max_freq)
                    .sum();
                (index, score / words as f32, words)
            })
            .collect();

        // Highest score first, earlier sentence on ties
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut chosen = Vec::new();
        let mut budget = 0usize;
        for (index, _, words) in ranked {
            if !chosen.is_empty() && budget + words > self.max_words {
                continue;
            }
            chosen.push(index);
            budget += words;
        }
        chosen.sort_unstable();

        chosen
            .into_iter()
            .map(|i| sentences[i])
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for FrequencySummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSummarizer for FrequencySummarizer {
    fn summarize_chunks(&self, chunks: &[String]) -> Vec<String> {
        chunks
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(|c| self.summarize(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_summary_per_non_empty_chunk() {
        let s = FrequencySummarizer::new();
        let chunks = vec![
            "Momentum is conserved.".to_string(),
            "   ".to_string(),
            "Energy is conserved too.".to_string(),
        ];
        let out = s.summarize_chunks(&chunks);
        assert_eq!(out, vec!["Momentum is conserved.", "Energy is conserved too."]);
    }

    #[test]
    fn test_prefers_frequent_terms_and_keeps_order() {
        let s = FrequencySummarizer::with_budget(10);
        let text = "Entropy measures disorder. The weather was nice. \
Entropy always increases in isolated systems. Entropy links heat and disorder."
            .to_string();
        let out = s.summarize_chunks(&[text]);
        assert_eq!(out.len(), 1);
        assert!(!out[0].contains("weather"));
        assert!(out[0].starts_with("Entropy measures disorder."));
    }

    #[test]
    fn test_deterministic() {
        let s = FrequencySummarizer::new();
        let chunks = vec!["A cell divides. Cells divide by mitosis. Mitosis has phases.".to_string()];
        assert_eq!(s.summarize_chunks(&chunks), s.summarize_chunks(&chunks));
    }

    #[test]
    fn test_empty_input() {
        assert!(FrequencySummarizer::new().summarize_chunks(&[]).is_empty());
    }
}
