//! Rendering of word sequences under a [`CasingStyle`].
//!
//! Every style is one row of [`rule`]: a per-word letter case, an optional
//! override for the first word, and the delimiter placed between words.

use crate::domain::model::CasingStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCase {
    Upper,
    Lower,
    /// First letter uppercase, the rest lowercase.
    Capitalized,
}

impl WordCase {
    pub fn apply(self, word: &str) -> String {
        match self {
            WordCase::Upper => word.to_uppercase(),
            WordCase::Lower => word.to_lowercase(),
            WordCase::Capitalized => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        let rest = chars.as_str().to_lowercase();
                        first.to_uppercase().collect::<String>() + &rest
                    }
                    None => String::new(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CasingRule {
    pub word: WordCase,
    pub first_word: Option<WordCase>,
    pub delimiter: &'static str,
}

pub const fn rule(style: CasingStyle) -> CasingRule {
    match style {
        CasingStyle::UpperSnake => CasingRule {
            word: WordCase::Upper,
            first_word: None,
            delimiter: "_",
        },
        CasingStyle::LowerSnake => CasingRule {
            word: WordCase::Lower,
            first_word: None,
            delimiter: "_",
        },
        CasingStyle::UpperCamel => CasingRule {
            word: WordCase::Capitalized,
            first_word: None,
            delimiter: "",
        },
        CasingStyle::LowerCamel => CasingRule {
            word: WordCase::Capitalized,
            first_word: Some(WordCase::Lower),
            delimiter: "",
        },
        CasingStyle::UpperKebab => CasingRule {
            word: WordCase::Upper,
            first_word: None,
            delimiter: "-",
        },
        CasingStyle::LowerKebab => CasingRule {
            word: WordCase::Lower,
            first_word: None,
            delimiter: "-",
        },
    }
}

/// Joins `words` into one identifier. No words renders as the empty string.
pub fn render<S: AsRef<str>>(words: &[S], style: CasingStyle) -> String {
    let rule = rule(style);
    words
        .iter()
        .enumerate()
        .map(|(idx, word)| {
            let case = match rule.first_word {
                Some(first) if idx == 0 => first,
                _ => rule.word,
            };
            case.apply(word.as_ref())
        })
        .collect::<Vec<_>>()
        .join(rule.delimiter)
}
