use crate::utils::error::{PnameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier casing convention requested by the caller.
///
/// The wire literal of each variant is its `UPPER_SNAKE` name, e.g. `LOWER_CAMEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CasingStyle {
    UpperSnake,
    LowerSnake,
    UpperCamel,
    LowerCamel,
    UpperKebab,
    LowerKebab,
}

impl CasingStyle {
    pub const ALL: [CasingStyle; 6] = [
        CasingStyle::UpperSnake,
        CasingStyle::LowerSnake,
        CasingStyle::UpperCamel,
        CasingStyle::LowerCamel,
        CasingStyle::UpperKebab,
        CasingStyle::LowerKebab,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CasingStyle::UpperSnake => "UPPER_SNAKE",
            CasingStyle::LowerSnake => "LOWER_SNAKE",
            CasingStyle::UpperCamel => "UPPER_CAMEL",
            CasingStyle::LowerCamel => "LOWER_CAMEL",
            CasingStyle::UpperKebab => "UPPER_KEBAB",
            CasingStyle::LowerKebab => "LOWER_KEBAB",
        }
    }
}

impl fmt::Display for CasingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CasingStyle {
    type Err = PnameError;

    fn from_str(s: &str) -> Result<Self> {
        CasingStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| PnameError::InvalidCasingStyle {
                value: s.to_string(),
            })
    }
}

/// Ordered logical names, one per line. Empty lines are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogicalNameBatch {
    lines: Vec<String>,
}

impl LogicalNameBatch {
    /// Splits on `\n`. An empty text is a batch of one empty line, and a
    /// trailing newline yields a trailing empty line, so joining the output
    /// with `\n` reproduces the input's line structure.
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One converted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalName {
    #[serde(rename = "lname")]
    pub logical: String,
    #[serde(rename = "pname")]
    pub physical: String,
    /// One entry per token: `word=>physical words` for dictionary hits, `word=*` otherwise.
    #[serde(rename = "desc")]
    pub mappings: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConversionResult {
    pub names: Vec<PhysicalName>,
}

impl ConversionResult {
    /// The physical batch, lines joined with `\n`.
    pub fn physical_text(&self) -> String {
        self.names
            .iter()
            .map(|name| name.physical.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Form fields as received, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConversionRequest {
    pub r#type: Option<String>,
    pub ln: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub style: CasingStyle,
    pub ln: String,
}

impl TryFrom<RawConversionRequest> for ConversionRequest {
    type Error = PnameError;

    fn try_from(raw: RawConversionRequest) -> Result<Self> {
        let style = raw
            .r#type
            .as_deref()
            .ok_or_else(|| PnameError::MissingInput {
                field: "type".to_string(),
            })?
            .parse::<CasingStyle>()?;
        let ln = raw.ln.ok_or_else(|| PnameError::MissingInput {
            field: "ln".to_string(),
        })?;
        Ok(Self { style, ln })
    }
}

/// CSRF header name and token; both `None` when the page declares no CSRF.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsrfToken {
    pub header: Option<String>,
    pub token: Option<String>,
}

impl CsrfToken {
    /// The header to send, present only when both name and value are known.
    pub fn header_pair(&self) -> Option<(&str, &str)> {
        match (self.header.as_deref(), self.token.as_deref()) {
            (Some(header), Some(token)) if !header.is_empty() => Some((header, token)),
            _ => None,
        }
    }
}
