//! Provider-free generation used when the primary backend is absent or fails

pub mod keywords;
pub mod local_summarizer;

pub use keywords::{keyword_questions, merge_pairs, questions_from_bullets};
pub use local_summarizer::{
    frequency_summarizer_factory, FrequencySummarizer, LocalSummarizer, SummarizerFactory,
};
