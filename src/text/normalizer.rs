//! Text Normalizer
//!
//! Whitespace cleanup and token-bounded chunking of extracted text.
//!
//! A "token" here is a whitespace-delimited word. Chunks are built greedily from
//! paragraphs; a paragraph that does not fit on its own is broken into
//! sentences, and a sentence that still does not fit is hard-split into word
//! windows.

use std::borrow::Cow;
use std::collections::VecDeque;

/// Collapse redundant whitespace while keeping paragraph boundaries
///
/// - Unicode space variants, tabs and control characters become plain spaces
/// - `\r\n` and lone `\r` become `\n`
/// - runs of spaces collapse to one, lines are trimmed
/// - runs of blank lines collapse to a single blank line
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");

    let mapped: String = unified
        .chars()
        .map(|c| match c {
            '\r' => '\n',
            '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' | '\u{2007}' | '\u{202F}' => ' ',
            c if c.is_control() && c != '\n' => ' ',
            c => c,
        })
        .collect();

    let mut out = String::with_capacity(mapped.len());
    let mut blank_run = 0usize;

    for line in mapped.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.is_empty() {
            blank_run += 1;
            continue;
        }

        if !out.is_empty() {
            out.push_str(if blank_run > 0 { "\n\n" } else { "\n" });
        }
        out.push_str(&collapsed);
        blank_run = 0;
    }

    out
}

/// Split text into chunks of at most `max_tokens` words
///
/// The returned iterator is lazy and `Clone`, so a caller can restart it or
/// take a prefix without materialising the rest. A `max_tokens` of zero is
/// treated as one.
pub fn chunk(text: &str, max_tokens: usize) -> Chunks<'_> {
    let max_tokens = max_tokens.max(1);
    Chunks {
        units: Units {
            paragraphs: text.split("\n\n"),
            queue: VecDeque::new(),
            max_tokens,
        },
        pending: None,
        max_tokens,
    }
}

/// Convenience: the first `take` chunks, collected
pub fn chunk_prefix(text: &str, max_tokens: usize, take: usize) -> Vec<String> {
    chunk(text, max_tokens).take(take).collect()
}

/// Lazy chunk sequence produced by [`chunk`]
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    units: Units<'a>,
    pending: Option<Unit<'a>>,
    max_tokens: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut buf = String::new();
        let mut words = 0usize;

        loop {
            let unit = match self.pending.take().or_else(|| self.units.next()) {
                Some(u) => u,
                None => break,
            };

            if words > 0 && words + unit.words > self.max_tokens {
                self.pending = Some(unit);
                break;
            }

            if !buf.is_empty() {
                buf.push_str(if unit.starts_paragraph { "\n\n" } else { " " });
            }
            buf.push_str(&unit.text);
            words += unit.words;

            if words >= self.max_tokens {
                break;
            }
        }

        if buf.is_empty() {
            None
        } else {
            Some(buf)
        }
    }
}

/// A piece of text that fits in one chunk on its own
#[derive(Debug, Clone)]
struct Unit<'a> {
    text: Cow<'a, str>,
    words: usize,
    starts_paragraph: bool,
}

#[derive(Debug, Clone)]
struct Units<'a> {
    paragraphs: std::str::Split<'a, &'static str>,
    queue: VecDeque<Unit<'a>>,
    max_tokens: usize,
}

impl<'a> Iterator for Units<'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Unit<'a>> {
        while self.queue.is_empty() {
            let paragraph = self.paragraphs.next()?.trim();
            if paragraph.is_empty() {
                continue;
            }
            self.split_paragraph(paragraph);
        }
        self.queue.pop_front()
    }
}

impl<'a> Units<'a> {
    fn split_paragraph(&mut self, paragraph: &'a str) {
        let words = word_count(paragraph);
        if words <= self.max_tokens {
            self.queue.push_back(Unit {
                text: Cow::Borrowed(paragraph),
                words,
                starts_paragraph: true,
            });
            return;
        }

        let mut first = true;
        for sentence in split_sentences(paragraph) {
            let words = word_count(sentence);
            if words <= self.max_tokens {
                self.queue.push_back(Unit {
                    text: Cow::Borrowed(sentence),
                    words,
                    starts_paragraph: first,
                });
                first = false;
                continue;
            }

            let tokens: Vec<&str> = sentence.split_whitespace().collect();
            for window in tokens.chunks(self.max_tokens) {
                self.queue.push_back(Unit {
                    text: Cow::Owned(window.join(" ")),
                    words: window.len(),
                    starts_paragraph: first,
                });
                first = false;
            }
        }
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split on `.`, `!` or `?` followed by whitespace; the terminator stays with
/// its sentence
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(next_i, next_c)) = chars.peek() {
                if next_c.is_whitespace() {
                    let sentence = text[start..i + c.len_utf8()].trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence);
                    }
                    start = next_i;
                }
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_spaces_and_blank_lines() {
        let messy = "  Line 1\t\tstill line 1  \r\n\r\n\r\n\n  Line 2  \n Line 3 ";
        assert_eq!(normalize(messy), "Line 1 still line 1\n\nLine 2\nLine 3");
    }

    #[test]
    fn test_normalize_unicode_spaces() {
        assert_eq!(normalize("a\u{00A0}b\u{200B}c"), "a b c");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let text = "First para.\n\n\n  Second   para.\nMore";
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(chunk("", 10).count(), 0);
        assert!(chunk_prefix("   ", 10, 4).is_empty());
    }

    #[test]
    fn test_short_text_gives_one_chunk() {
        let chunks: Vec<_> = chunk("just a few words", 100).collect();
        assert_eq!(chunks, vec!["just a few words".to_string()]);
    }

    #[test]
    fn test_paragraphs_packed_until_limit() {
        let text = "one two three\n\nfour five\n\nsix seven eight nine";
        let chunks: Vec<_> = chunk(text, 5).collect();
        assert_eq!(chunks, vec!["one two three\n\nfour five", "six seven eight nine"]);
    }

    #[test]
    fn test_long_paragraph_breaks_at_sentences() {
        let text = "Alpha beta gamma. Delta epsilon zeta. Eta theta iota.";
        let chunks: Vec<_> = chunk(text, 4).collect();
        assert_eq!(
            chunks,
            vec!["Alpha beta gamma.", "Delta epsilon zeta.", "Eta theta iota."]
        );
    }

    #[test]
    fn test_hard_split_when_sentence_too_long() {
        let text = "a b c d e f g h i j";
        let chunks: Vec<_> = chunk(text, 4).collect();
        assert_eq!(chunks, vec!["a b c d", "e f g h", "i j"]);
    }

    #[test]
    fn test_every_chunk_within_bound() {
        let text = normalize(&"word ".repeat(1000));
        for c in chunk(&text, 256) {
            assert!(c.split_whitespace().count() <= 256);
        }
        assert_eq!(chunk(&text, 256).count(), 4);
    }

    #[test]
    fn test_chunks_restartable_and_deterministic() {
        let text = "One. Two three. Four five six.\n\nSeven eight.";
        let iter = chunk(text, 3);
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(first, chunk(text, 3).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_max_tokens_terminates() {
        let chunks: Vec<_> = chunk("a b", 0).collect();
        assert_eq!(chunks, vec!["a", "b"]);
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("Hi there! Is it 3.14? Yes."),
            vec!["Hi there!", "Is it 3.14?", "Yes."]
        );
        assert!(split_sentences("").is_empty());
    }
}
