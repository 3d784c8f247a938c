//! Heuristic Formula Miner
//!
//! Pattern-based equation detection and symbol-definition guessing. This is
//! the deterministic last resort for formula sheets: it never fails, it may
//! miss things, and it may attach a definition from an unrelated occurrence of
//! the same symbol elsewhere in the document.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeMap, HashSet};

static MATH_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\\\[(.+?)\\\]").expect("Invalid regex"));
static MATH_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(.+?)\$").expect("Invalid regex"));
static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+\s*=\s*[^\n]+").expect("Invalid regex"));
static RATIO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z][A-Za-z0-9_]*\s*/\s*[A-Za-z][A-Za-z0-9_]*\b").expect("Invalid regex")
});
static SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\?[A-Za-z][A-Za-z0-9_]*|\\[a-zA-Z]+").expect("Invalid regex"));

/// Description text: runs to a comma, semicolon, newline or sentence-ending
/// period (a period followed by whitespace). A trailing period is kept.
const DESCRIPTION: &str = r"((?:[^.,;\n]|\.\S)+\.?)";

/// Candidate equations in first-seen order, deduplicated
///
/// Candidates are display-math spans (`\[...\]`), inline-math spans
/// (`$...$`), lines containing `identifier = expression`, and lines containing
/// an `identifier / identifier` ratio.
pub fn extract_equations(text: &str) -> Vec<String> {
    let blocks = MATH_BLOCK.captures_iter(text).map(|c| c[1].trim().to_string());
    let inlines = MATH_INLINE.captures_iter(text).map(|c| c[1].trim().to_string());
    let lines = text
        .lines()
        .filter(|line| ASSIGNMENT.is_match(line) || RATIO.is_match(line))
        .map(|line| line.trim().to_string());

    let mut seen = HashSet::new();
    blocks
        .chain(inlines)
        .chain(lines)
        .filter(|eq| !eq.is_empty())
        .filter(|eq| seen.insert(eq.clone()))
        .collect()
}

/// Symbol-like tokens of an equation, numerals excluded, first-seen order
pub fn equation_symbols(equation: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    SYMBOL
        .find_iter(equation)
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.chars().all(|c| c.is_ascii_digit()))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Guess natural-language definitions for the symbols of `equation`
///
/// For each symbol, the first `<symbol> is|denotes|represents <description>`
/// clause (case-insensitive) anywhere in `context` wins; failing that, the
/// first `<symbol>: <description>` clause. Symbols without a match are left
/// out of the mapping.
pub fn guess_symbol_definitions(context: &str, equation: &str) -> BTreeMap<String, String> {
    let mut definitions = BTreeMap::new();
    if context.is_empty() {
        return definitions;
    }

    for symbol in equation_symbols(equation) {
        let escaped = regex::escape(&symbol);

        let contextual = RegexBuilder::new(&format!(
            r"\b{escaped}\b\s+(?:is|denotes|represents)\s+{DESCRIPTION}"
        ))
        .case_insensitive(true)
        .build();
        let colon = Regex::new(&format!(r"\b{escaped}\b\s*:\s*{DESCRIPTION}"));

        let found = contextual
            .ok()
            .and_then(|re| re.captures(context).map(|c| c[1].trim().to_string()))
            .or_else(|| {
                colon
                    .ok()
                    .and_then(|re| re.captures(context).map(|c| c[1].trim().to_string()))
            });

        if let Some(description) = found.filter(|d| !d.is_empty()) {
            definitions.insert(symbol, description);
        }
    }

    definitions
}

/// Wrap an equation in inline-math delimiters for display
pub fn format_equation(equation: &str) -> String {
    format!("$ {} $", equation)
}
