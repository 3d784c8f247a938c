//! Keyword Questions
//!
//! Deterministic flashcard generation without a provider, plus the merge
//! policy applied to every flashcard set before it leaves the orchestrator.

use crate::pipeline::types::Flashcard;
use crate::text::{content_words, is_stopword, split_sentences};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Cap on cards produced by [`keyword_questions`]
pub const MAX_KEYWORD_CARDS: usize = 20;

/// Keywords considered for "Explain the term" cards
pub const MAX_KEYWORDS: usize = 10;

const MIN_KEYWORD_LEN: usize = 5;

/// Questions derived from summary bullets
pub const MAX_BULLET_QUESTIONS: usize = 10;

const MAX_QUESTION_CHARS: usize = 80;

/// `<Term> is|are|refers to|means <rest>` at the start of a sentence, with a
/// term of at most four words
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:A|An|The)\s+)?((?:[A-Za-z][\w'-]*\s+){0,3}?[A-Za-z][\w'-]*)\s+(is|are|refers to|means)\s+\S")
        .expect("Invalid regex")
});

fn sentences(text: &str) -> Vec<&str> {
    text.lines().flat_map(split_sentences).collect()
}

/// Flashcards from definition sentences and frequent keywords
///
/// Definition sentences come first, in document order. Remaining slots are
/// filled with "Explain the term" cards for the most frequent long content
/// words, answered by the first sentence mentioning them.
pub fn keyword_questions(text: &str) -> Vec<Flashcard> {
    let sentences = sentences(text);
    let mut cards = Vec::new();

    for sentence in &sentences {
        let Some(caps) = DEFINITION.captures(sentence) else {
            continue;
        };
        let term = caps[1].trim();
        let lead = term.split_whitespace().next().unwrap_or_default().to_lowercase();
        if is_stopword(&lead) {
            continue;
        }
        let verb = if &caps[2] == "are" { "are" } else { "is" };
        cards.push(Flashcard::new(format!("What {verb} {term}?"), *sentence));
    }

    for keyword in top_keywords(text, MAX_KEYWORDS) {
        if let Some(sentence) = sentences
            .iter()
            .find(|s| content_words(s).any(|w| w == keyword))
        {
            cards.push(Flashcard::new(format!("Explain the term '{keyword}'."), *sentence));
        }
    }

    merge_pairs(cards, MAX_KEYWORD_CARDS)
}

/// Most frequent content words of at least five characters; ties go to the
/// word seen first
fn top_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in content_words(text)
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
        .enumerate()
    {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.into_iter().take(limit).map(|(w, _)| w).collect()
}

/// Flashcards synthesised from summary bullets
///
/// The question is built from the bullet's leading clause (text before the
/// first `". "`), truncated to 80 characters with `...`; the whole bullet is
/// the answer.
pub fn questions_from_bullets(bullets: &[String]) -> Vec<Flashcard> {
    bullets
        .iter()
        .take(MAX_BULLET_QUESTIONS)
        .map(|bullet| bullet.trim())
        .filter(|bullet| !bullet.is_empty())
        .map(|bullet| {
            let lead = bullet.split(". ").next().unwrap_or(bullet).trim();
            let lead = if lead.chars().count() > MAX_QUESTION_CHARS {
                let cut: String = lead.chars().take(MAX_QUESTION_CHARS - 3).collect();
                format!("{cut}...")
            } else {
                lead.to_string()
            };
            Flashcard::new(format!("What is meant by: {lead}?"), bullet)
        })
        .collect()
}

/// Trim, drop incomplete pairs, deduplicate by question (case-insensitive,
/// first wins), keep order, cap at `max`
pub fn merge_pairs(pairs: impl IntoIterator<Item = Flashcard>, max: usize) -> Vec<Flashcard> {
    let mut seen = HashSet::new();
    pairs
        .into_iter()
        .map(|card| Flashcard::new(card.question.trim(), card.answer.trim()))
        .filter(|card| !card.question.is_empty() && !card.answer.is_empty())
        .filter(|card| seen.insert(card.question.to_lowercase()))
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTES: &str = "Photosynthesis is the process plants use to make sugar.\n\
Chlorophyll absorbs light. Chlorophyll is green.\n\
It is important for photosynthesis in leaves.";

    #[test]
    fn test_definition_sentences_first() {
        let cards = keyword_questions(NOTES);
        assert_eq!(cards[0].question, "What is Photosynthesis?");
        assert_eq!(cards[0].answer, "Photosynthesis is the process plants use to make sugar.");
        assert_eq!(cards[1].question, "What is Chlorophyll?");
        assert_eq!(cards[1].answer, "Chlorophyll is green.");
    }

    #[test]
    fn test_pronoun_subjects_skipped() {
        let cards = keyword_questions(NOTES);
        assert!(!cards.iter().any(|c| c.question == "What is It?"));
    }

    #[test]
    fn test_keyword_cards_follow() {
        let cards = keyword_questions(NOTES);
        let keyword = cards
            .iter()
            .find(|c| c.question == "Explain the term 'photosynthesis'.")
            .unwrap();
        assert_eq!(keyword.answer, "Photosynthesis is the process plants use to make sugar.");
        assert!(cards.len() <= MAX_KEYWORD_CARDS);
    }

    #[test]
    fn test_keyword_questions_is_stable_under_merge() {
        let cards = keyword_questions(NOTES);
        assert_eq!(merge_pairs(cards.clone(), 40), cards);
    }

    #[test]
    fn test_keyword_questions_empty_text() {
        assert!(keyword_questions("").is_empty());
    }

    #[test]
    fn test_questions_from_bullets() {
        let bullets = vec![
            "Forces cause acceleration. Mass resists it.".to_string(),
            "x".repeat(100),
        ];
        let cards = questions_from_bullets(&bullets);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "What is meant by: Forces cause acceleration?");
        assert_eq!(cards[0].answer, "Forces cause acceleration. Mass resists it.");
        assert_eq!(cards[1].question, format!("What is meant by: {}...?", "x".repeat(77)));
    }

    #[test]
    fn test_questions_from_bullets_takes_ten() {
        let bullets: Vec<String> = (0..15).map(|i| format!("Point {i}")).collect();
        assert_eq!(questions_from_bullets(&bullets).len(), 10);
    }

    #[test]
    fn test_merge_pairs_dedups_and_caps() {
        let pairs = vec![
            Flashcard::new(" What is force? ", "A push."),
            Flashcard::new("what is FORCE?", "Duplicate."),
            Flashcard::new("Empty answer?", "  "),
            Flashcard::new("What is mass?", "Inertia."),
            Flashcard::new("What is work?", "Force times distance."),
        ];
        let merged = merge_pairs(pairs, 2);
        assert_eq!(
            merged,
            vec![
                Flashcard::new("What is force?", "A push."),
                Flashcard::new("What is mass?", "Inertia."),
            ]
        );
    }
}
