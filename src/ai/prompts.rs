/// System prompt for lecture summaries
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a precise academic summarizer.";

/// System prompt for flashcard generation
pub const FLASHCARD_SYSTEM_PROMPT: &str = "You generate study flashcards.";

/// System prompt for formula extraction
pub const FORMULA_SYSTEM_PROMPT: &str = "You extract formulas from lecture notes.";

/// Build user prompt for a bullet-point summary
pub fn build_summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following lecture notes in 5-10 bullet points. \
Be concise, keep terminology, and avoid hallucinations.\n\n{}",
        text
    )
}

/// Build user prompt for `count` Q/A flashcards
pub fn build_flashcard_prompt(text: &str, count: usize) -> String {
    format!(
        r#"Generate strictly {} question-answer flashcards from the lecture text.
Return lines formatted exactly as:
Q: <question>
A: <answer>
Do not include extra commentary.

{}"#,
        count, text
    )
}

/// Build user prompt for the E:/V: formula protocol
pub fn build_formula_prompt(text: &str) -> String {
    format!(
        r#"From the lecture text, extract important formulas. For each formula, also list its variables.
Output strictly in this format (no extra commentary):
E: <equation in LaTeX or plain>
V: <symbol> - <short description>
V: <symbol> - <short description>
(blank line between formulas)

{}"#,
        text
    )
}
