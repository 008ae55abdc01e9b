use crate::core::dictionary::{DictionaryFormat, DictionaryOptions, DICTIONARY_EXTENSIONS};
use crate::core::ConfigProvider;
use crate::domain::model::CasingStyle;
use crate::domain::ports::OutputFormat;
use crate::utils::error::{PnameError, Result};
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
use clap::Parser;

fn parse_casing_style(value: &str) -> Result<CasingStyle> {
    value.parse()
}

#[derive(Debug, Clone, Parser)]
#[command(name = "pname")]
#[command(about = "Convert logical names into physical identifier names")]
pub struct CliConfig {
    /// Files with one logical name per line (stdin when omitted)
    pub inputs: Vec<String>,

    /// Target casing style, e.g. UPPER_SNAKE or LOWER_CAMEL
    #[arg(short, long, default_value = "UPPER_SNAKE", value_parser = parse_casing_style)]
    pub style: CasingStyle,

    /// Word dictionary (.csv, .tsv, .json, .yaml or .toml)
    #[arg(short, long)]
    pub dictionary: Option<String>,

    /// Dictionary format when the file extension does not tell
    #[arg(long, value_enum, ignore_case = true, requires = "dictionary")]
    pub dictionary_format: Option<DictionaryFormat>,

    /// Separator between physical words in CSV/TSV dictionaries
    #[arg(long, default_value = " ", requires = "dictionary")]
    pub word_delimiter: String,

    /// Skip the first row of a CSV/TSV dictionary
    #[arg(long, requires = "dictionary")]
    pub has_header: bool,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,

    /// Add the token mapping column (tsv and csv only)
    #[arg(long)]
    pub desc: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn casing_style(&self) -> CasingStyle {
        self.style
    }

    fn input_files(&self) -> &[String] {
        &self.inputs
    }

    fn dictionary_path(&self) -> Option<&str> {
        self.dictionary.as_deref()
    }

    fn dictionary_options(&self) -> DictionaryOptions {
        DictionaryOptions {
            format: self.dictionary_format,
            word_delimiter: self.word_delimiter.clone(),
            has_header: self.has_header,
        }
    }

    fn output_file(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn include_desc(&self) -> bool {
        self.desc
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for input in &self.inputs {
            validate_path("inputs", input)?;
        }
        if let Some(dictionary) = &self.dictionary {
            validate_path("dictionary", dictionary)?;
        }
        if self.word_delimiter.is_empty() {
            return Err(PnameError::InvalidConfigValueError {
                field: "word_delimiter".to_string(),
                value: String::new(),
                reason: "The word delimiter cannot be empty".to_string(),
            });
        }
        if let (Some(dictionary), None) = (&self.dictionary, self.dictionary_format) {
            validate_file_extensions(
                "dictionary",
                std::slice::from_ref(dictionary),
                DICTIONARY_EXTENSIONS,
            )?;
        }
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        if self.desc && self.format == OutputFormat::Plain {
            return Err(PnameError::InvalidConfigValueError {
                field: "desc".to_string(),
                value: "true".to_string(),
                reason: "The mapping column needs --format tsv or --format csv".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["pname"]);
        assert_eq!(config.style, CasingStyle::UpperSnake);
        assert_eq!(config.format, OutputFormat::Plain);
        assert!(config.inputs.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_arguments() {
        let config = CliConfig::parse_from([
            "pname",
            "--style",
            "LOWER_KEBAB",
            "--format",
            "tsv",
            "--desc",
            "-d",
            "words.csv",
            "a.txt",
            "b.txt",
        ]);
        assert_eq!(config.casing_style(), CasingStyle::LowerKebab);
        assert_eq!(config.input_files(), ["a.txt", "b.txt"]);
        assert_eq!(config.dictionary_path(), Some("words.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dictionary_options() {
        let config = CliConfig::parse_from([
            "pname",
            "-d",
            "words.txt",
            "--dictionary-format",
            "TSV",
            "--word-delimiter",
            "/",
            "--has-header",
        ]);
        let options = config.dictionary_options();
        assert_eq!(options.format, Some(DictionaryFormat::Tsv));
        assert_eq!(options.word_delimiter, "/");
        assert!(options.has_header);
        assert!(config.validate().is_ok());

        let defaults = CliConfig::parse_from(["pname"]).dictionary_options();
        assert_eq!(defaults.format, None);
        assert_eq!(defaults.word_delimiter, " ");
        assert!(!defaults.has_header);

        let unknown_extension = CliConfig::parse_from(["pname", "-d", "words.txt"]);
        assert!(unknown_extension.validate().is_err());

        assert!(CliConfig::try_parse_from(["pname", "--has-header"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_style() {
        assert!(CliConfig::try_parse_from(["pname", "--style", "bogus"]).is_err());
    }

    #[test]
    fn test_desc_requires_tabular_format() {
        let config = CliConfig::parse_from(["pname", "--desc"]);
        assert!(config.validate().is_err());
    }
}
