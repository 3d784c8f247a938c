//! Line protocols spoken by the generative backends
//!
//! - Flashcards: `Q: <question>` followed by `A: <answer>`
//! - Formulas: `E: <equation>` then `V: <symbol> - <description>` lines; a blank
//!   line or the next `E:` closes the record
//! - Summaries: one bullet per non-empty line, list markers stripped

use crate::pipeline::types::{Flashcard, FormulaEntry};
use std::collections::BTreeMap;

/// Strip a case-insensitive two-character prefix such as `q:`
fn strip_tag<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let head = line.get(..tag.len())?;
    if head.eq_ignore_ascii_case(tag) {
        Some(line[tag.len()..].trim())
    } else {
        None
    }
}

/// Parse `Q:`/`A:` pairs. An answer only counts when a question is pending;
/// a second `Q:` before an answer replaces the pending question.
pub fn parse_flashcards(raw: &str) -> Vec<Flashcard> {
    let mut pairs = Vec::new();
    let mut question: Option<String> = None;

    for line in raw.lines().map(str::trim) {
        if let Some(q) = strip_tag(line, "q:") {
            question = Some(q.to_string());
        } else if let Some(a) = strip_tag(line, "a:") {
            if let Some(q) = question.take().filter(|q| !q.is_empty()) {
                pairs.push(Flashcard::new(q, a));
            }
        }
    }

    pairs
}

/// Parse `E:`/`V:` formula records
pub fn parse_formulas(raw: &str) -> Vec<FormulaEntry> {
    let mut items = Vec::new();
    let mut equation: Option<String> = None;
    let mut symbols = BTreeMap::new();

    fn flush(
        items: &mut Vec<FormulaEntry>,
        equation: &mut Option<String>,
        symbols: &mut BTreeMap<String, String>,
    ) {
        if let Some(eq) = equation.take().filter(|e| !e.is_empty()) {
            items.push(FormulaEntry::new(eq, std::mem::take(symbols)));
        }
        symbols.clear();
    }

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            flush(&mut items, &mut equation, &mut symbols);
            continue;
        }

        if let Some(eq) = strip_tag(line, "e:") {
            flush(&mut items, &mut equation, &mut symbols);
            equation = Some(eq.to_string());
        } else if let Some(rest) = strip_tag(line, "v:") {
            if let Some((symbol, description)) = rest.split_once('-') {
                let symbol = symbol.trim().trim_matches(':').trim();
                if !symbol.is_empty() {
                    symbols.insert(symbol.to_string(), description.trim().to_string());
                }
            }
        }
    }
    flush(&mut items, &mut equation, &mut symbols);

    items
}

/// Split a summary reply into bullets
pub fn summary_bullets(raw: &str) -> Vec<String> {
    raw.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    for marker in ["- ", "* ", "• ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim();
        }
    }

    // "1. ", "12) "
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") ")) {
            return rest.trim();
        }
    }

    line
}
