use crate::core::casing;
use crate::core::dictionary::Dictionary;
use crate::core::tokenizer;
use crate::domain::model::{
    CasingStyle, ConversionRequest, ConversionResult, LogicalNameBatch, PhysicalName,
};
use std::sync::Arc;

/// Converts logical names into physical names, line by line.
///
/// The converter holds no mutable state and can be shared freely across
/// threads; each call is independent of every other.
#[derive(Debug, Clone, Default)]
pub struct NameConverter {
    dictionary: Option<Arc<Dictionary>>,
}

impl NameConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(dictionary: Arc<Dictionary>) -> Self {
        Self {
            dictionary: Some(dictionary),
        }
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_deref()
    }

    /// Words of `line` after dictionary substitution, with one mapping
    /// description per original token.
    pub fn words(&self, line: &str) -> (Vec<String>, Vec<String>) {
        let mut words = Vec::new();
        let mut mappings = Vec::new();

        for token in tokenizer::tokenize(line) {
            match self.dictionary.as_ref().and_then(|d| d.lookup(token)) {
                Some(physical) => {
                    mappings.push(format!("{}=>{}", token, physical.join(" ")));
                    for entry in physical {
                        words.extend(tokenizer::tokenize(entry).into_iter().map(str::to_string));
                    }
                }
                None => {
                    mappings.push(format!("{}=*", token));
                    words.push(token.to_string());
                }
            }
        }

        (words, mappings)
    }

    pub fn convert_line(&self, line: &str, style: CasingStyle) -> PhysicalName {
        let (words, mappings) = self.words(line);
        let physical = casing::render(&words, style);

        tracing::debug!(logical = line, physical = %physical, "converted name");
        for mapping in &mappings {
            tracing::trace!("  token: {}", mapping);
        }

        PhysicalName {
            logical: line.to_string(),
            physical,
            mappings,
        }
    }

    /// One output name per input line, in input order.
    pub fn convert_batch(&self, batch: &LogicalNameBatch, style: CasingStyle) -> ConversionResult {
        ConversionResult {
            names: batch
                .lines()
                .iter()
                .map(|line| self.convert_line(line, style))
                .collect(),
        }
    }

    pub fn convert_request(&self, request: &ConversionRequest) -> ConversionResult {
        self.convert_batch(&LogicalNameBatch::parse(&request.ln), request.style)
    }

    /// Newline-joined text in, newline-joined text out.
    pub fn convert_text(&self, text: &str, style: CasingStyle) -> String {
        self.convert_batch(&LogicalNameBatch::parse(text), style)
            .physical_text()
    }
}
