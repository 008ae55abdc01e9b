use crate::utils::error::{PnameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// File extensions [`DictionaryFormat::from_path`] recognizes.
pub const DICTIONARY_EXTENSIONS: &[&str] = &["csv", "tsv", "json", "yaml", "yml", "toml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DictionaryFormat {
    /// `logical,physical words`
    Csv,
    /// `logical<TAB>physical words`
    Tsv,
    /// `{"logical": ["physical", ...]}`
    Json,
    /// `logical: [physical, ...]` or `logical: physical`
    Yaml,
    /// `logical = ["physical", ...]`
    Toml,
}

impl DictionaryFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(DictionaryFormat::Csv),
            Some("tsv") => Ok(DictionaryFormat::Tsv),
            Some("json") => Ok(DictionaryFormat::Json),
            Some("yaml" | "yml") => Ok(DictionaryFormat::Yaml),
            Some("toml") => Ok(DictionaryFormat::Toml),
            _ => Err(PnameError::DictionaryError {
                message: format!("Cannot infer dictionary format of {}", path.display()),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryOptions {
    /// Overrides the format inferred from the file extension.
    pub format: Option<DictionaryFormat>,
    /// Separator between physical words in CSV/TSV rows.
    pub word_delimiter: String,
    pub has_header: bool,
}

impl Default for DictionaryOptions {
    fn default() -> Self {
        Self {
            format: None,
            word_delimiter: " ".to_string(),
            has_header: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YamlWords {
    One(String),
    Many(Vec<String>),
}

impl YamlWords {
    fn into_vec(self) -> Vec<String> {
        match self {
            YamlWords::One(word) => vec![word],
            YamlWords::Many(words) => words,
        }
    }
}

/// Logical word to physical words, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, Vec<String>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries with no non-blank physical word are ignored.
    pub fn insert(&mut self, logical: &str, physical: Vec<String>) {
        let key = logical.trim().to_lowercase();
        let words: Vec<String> = physical
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        if key.is_empty() || words.is_empty() {
            tracing::warn!("Skipping dictionary entry without words: {:?}", logical);
            return;
        }
        self.entries.insert(key, words);
    }

    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries.get(&word.to_lowercase()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn load<P: AsRef<Path>>(path: P, options: &DictionaryOptions) -> Result<Self> {
        let path = path.as_ref();
        let format = match options.format {
            Some(format) => format,
            None => DictionaryFormat::from_path(path)?,
        };
        tracing::debug!("Loading {:?} dictionary from {}", format, path.display());

        let dictionary = match format {
            DictionaryFormat::Csv | DictionaryFormat::Tsv => {
                let file = std::fs::File::open(path)?;
                Self::from_delimited(file, format == DictionaryFormat::Tsv, options)?
            }
            DictionaryFormat::Json => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            DictionaryFormat::Yaml => Self::from_yaml_str(&std::fs::read_to_string(path)?)?,
            DictionaryFormat::Toml => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
        };

        tracing::info!(
            "Loaded {} dictionary entries from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Reads two-column rows; rows with fewer columns are skipped.
    pub fn from_delimited<R: Read>(reader: R, tsv: bool, options: &DictionaryOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(options.has_header)
            .delimiter(if tsv { b'\t' } else { b',' })
            .flexible(true)
            .from_reader(reader);

        let mut dictionary = Self::new();
        for record in csv_reader.records() {
            let record = record?;
            if record.len() < 2 {
                continue;
            }
            let words = record[1]
                .split(options.word_delimiter.as_str())
                .map(str::to_string)
                .collect();
            dictionary.insert(&record[0], words);
        }
        Ok(dictionary)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(content)?;
        Ok(Self::from_entries(entries))
    }

    /// A YAML mapping whose values are a word list or a single word.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let entries: HashMap<String, YamlWords> =
            serde_yaml_ng::from_str(content).map_err(|e| PnameError::DictionaryError {
                message: format!("YAML parsing error: {}", e),
            })?;
        Ok(Self::from_entries(
            entries
                .into_iter()
                .map(|(logical, words)| (logical, words.into_vec()))
                .collect(),
        ))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let entries: HashMap<String, Vec<String>> =
            toml::from_str(content).map_err(|e| PnameError::DictionaryError {
                message: format!("TOML parsing error: {}", e),
            })?;
        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: HashMap<String, Vec<String>>) -> Self {
        let mut dictionary = Self::new();
        for (logical, physical) in entries {
            dictionary.insert(&logical, physical);
        }
        dictionary
    }
}
