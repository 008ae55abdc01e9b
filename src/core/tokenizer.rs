//! Word-boundary detection for logical names.
//!
//! A line is cut into words at explicit delimiters (`_`, `-`, whitespace) and
//! at case transitions. Runs of delimiters collapse, so no empty word is ever
//! produced. Words keep their original characters; casing is applied later by
//! [`crate::core::casing`].

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Delimiter,
    Upper,
    Lower,
    Digit,
    Other,
}

fn classify(c: char) -> CharClass {
    if c == '_' || c == '-' || c.is_whitespace() {
        CharClass::Delimiter
    } else if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_lowercase() {
        CharClass::Lower
    } else if c.is_ascii_digit() {
        CharClass::Digit
    } else {
        CharClass::Other
    }
}

/// An uppercase letter opens a new word after a lowercase letter (`userName`),
/// and after an uppercase run or a digit when it heads a capitalized word
/// (`HTTPServer`, `User2Name`). Digits stay with the word they follow (`id2`).
fn starts_word(prev: CharClass, current: CharClass, next: Option<CharClass>) -> bool {
    if current != CharClass::Upper {
        return false;
    }
    match prev {
        CharClass::Lower => true,
        CharClass::Upper | CharClass::Digit => next == Some(CharClass::Lower),
        _ => false,
    }
}

/// Byte ranges of the words of `line`, in order.
pub fn word_spans(line: &str) -> Vec<Range<usize>> {
    let chars: Vec<(usize, CharClass)> = line
        .char_indices()
        .map(|(idx, c)| (idx, classify(c)))
        .collect();

    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev = CharClass::Delimiter;

    for (pos, &(idx, class)) in chars.iter().enumerate() {
        if class == CharClass::Delimiter {
            if let Some(s) = start.take() {
                spans.push(s..idx);
            }
        } else {
            match start {
                None => start = Some(idx),
                Some(s) => {
                    let next = chars.get(pos + 1).map(|&(_, c)| c);
                    if starts_word(prev, class, next) {
                        spans.push(s..idx);
                        start = Some(idx);
                    }
                }
            }
        }
        prev = class;
    }

    if let Some(s) = start {
        spans.push(s..line.len());
    }
    spans
}

/// The words of `line` as slices of it.
pub fn tokenize(line: &str) -> Vec<&str> {
    word_spans(line)
        .into_iter()
        .map(|span| &line[span])
        .collect()
}
