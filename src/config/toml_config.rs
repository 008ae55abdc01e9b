use crate::config::page::PageConfig;
use crate::core::dictionary::{DictionaryFormat, DictionaryOptions, DICTIONARY_EXTENSIONS};
use crate::utils::error::{PnameError, Result};
use crate::utils::validation::{
    validate_bind_address, validate_context_root, validate_file_extensions,
    validate_non_empty_string, validate_path, validate_required_field, Validate,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub dictionary: Option<DictionarySection>,
    pub csrf: Option<CsrfSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: String,
    #[serde(default = "default_context_root")]
    pub context_root: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            context_root: default_context_root(),
        }
    }
}

fn default_context_root() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionarySection {
    pub path: String,
    pub format: Option<DictionaryFormat>,
    pub word_delimiter: Option<String>,
    pub has_header: Option<bool>,
}

impl DictionarySection {
    pub fn options(&self) -> DictionaryOptions {
        let defaults = DictionaryOptions::default();
        DictionaryOptions {
            format: self.format,
            word_delimiter: self
                .word_delimiter
                .clone()
                .unwrap_or(defaults.word_delimiter),
            has_header: self.has_header.unwrap_or(defaults.has_header),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfSection {
    pub header: Option<String>,
    pub parameter: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub json: Option<bool>,
}

impl ServerConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PnameError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PnameError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PnameError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        validate_bind_address("server.bind", &self.server.bind)
    }

    pub fn context_root(&self) -> &str {
        &self.server.context_root
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// CSRF header name and token the server requires, if configured.
    pub fn csrf_requirement(&self) -> Option<(&str, &str)> {
        let csrf = self.csrf.as_ref()?;
        Some((csrf.header.as_deref()?, csrf.token.as_deref()?))
    }

    /// What a client of this server needs to know to reach it.
    pub fn page_config(&self) -> PageConfig {
        let root = self.context_root().trim_end_matches('/');
        let mut page = PageConfig::new(format!("http://{}{}/", self.server.bind, root));
        if let Some(csrf) = &self.csrf {
            page.csrf_header = csrf.header.clone();
            page.csrf_parameter = csrf.parameter.clone();
            page.csrf_token = csrf.token.clone();
        }
        page
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        self.bind_address()?;

        validate_context_root("server.context_root", &self.server.context_root)?;
        if !self.server.context_root.is_empty() && !self.server.context_root.starts_with('/') {
            return Err(PnameError::InvalidConfigValueError {
                field: "server.context_root".to_string(),
                value: self.server.context_root.clone(),
                reason: "The server context root must be a path".to_string(),
            });
        }

        if let Some(dictionary) = &self.dictionary {
            validate_path("dictionary.path", &dictionary.path)?;
            if dictionary.word_delimiter.as_deref() == Some("") {
                return Err(PnameError::InvalidConfigValueError {
                    field: "dictionary.word_delimiter".to_string(),
                    value: String::new(),
                    reason: "The word delimiter cannot be empty".to_string(),
                });
            }
            if dictionary.format.is_none() {
                validate_file_extensions(
                    "dictionary.path",
                    std::slice::from_ref(&dictionary.path),
                    DICTIONARY_EXTENSIONS,
                )?;
            }
        }

        if let Some(csrf) = &self.csrf {
            let header = validate_required_field("csrf.header", &csrf.header)?;
            validate_non_empty_string("csrf.header", header)?;
            let token = validate_required_field("csrf.token", &csrf.token)?;
            validate_non_empty_string("csrf.token", token)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config() {
        let config = ServerConfig::from_toml_str("[server]\nbind = \"0.0.0.0:9000\"\n").unwrap();
        assert_eq!(config.bind_address().unwrap().port(), 9000);
        assert_eq!(config.context_root(), "/");
        assert!(config.dictionary.is_none());
        assert!(config.csrf_requirement().is_none());
        assert!(!config.json_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind = "127.0.0.1:8080"
context_root = "/pname/"

[dictionary]
path = "words.tsv"
word_delimiter = "/"
has_header = true

[csrf]
header = "X-CSRF-TOKEN"
parameter = "_csrf"
token = "secret"

[logging]
json = true
"#;
        let config = ServerConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.json_logging());
        assert_eq!(config.csrf_requirement(), Some(("X-CSRF-TOKEN", "secret")));

        let options = config.dictionary.as_ref().unwrap().options();
        assert_eq!(options.word_delimiter, "/");
        assert!(options.has_header);

        let page = config.page_config();
        assert_eq!(page.context_root, "http://127.0.0.1:8080/pname/");
        assert_eq!(page.csrf_parameter.as_deref(), Some("_csrf"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PNAME_TEST_CSRF_TOKEN", "from-env");

        let toml_content = r#"
[server]
bind = "127.0.0.1:8080"

[csrf]
header = "X-CSRF-TOKEN"
token = "${PNAME_TEST_CSRF_TOKEN}"
"#;
        let config = ServerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.csrf_requirement(), Some(("X-CSRF-TOKEN", "from-env")));

        std::env::remove_var("PNAME_TEST_CSRF_TOKEN");
    }

    #[test]
    fn test_config_validation() {
        let bad_bind = ServerConfig::from_toml_str("[server]\nbind = \"localhost\"\n").unwrap();
        assert!(bad_bind.validate().is_err());

        let bad_root =
            ServerConfig::from_toml_str("[server]\nbind = \"127.0.0.1:1\"\ncontext_root = \"app\"\n")
                .unwrap();
        assert!(bad_root.validate().is_err());

        for root in ["/app*", "/app/:name", "/*rest"] {
            let routed = ServerConfig::from_toml_str(&format!(
                "[server]\nbind = \"127.0.0.1:0\"\ncontext_root = \"{}\"\n",
                root
            ))
            .unwrap();
            assert!(matches!(
                routed.validate(),
                Err(PnameError::InvalidConfigValueError { .. })
            ));
        }

        let bad_dictionary = ServerConfig::from_toml_str(
            "[server]\nbind = \"127.0.0.1:1\"\n[dictionary]\npath = \"words.txt\"\n",
        )
        .unwrap();
        assert!(bad_dictionary.validate().is_err());

        let half_csrf = ServerConfig::from_toml_str(
            "[server]\nbind = \"127.0.0.1:1\"\n[csrf]\nheader = \"X-CSRF-TOKEN\"\n",
        )
        .unwrap();
        assert!(matches!(
            half_csrf.validate(),
            Err(PnameError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"127.0.0.1:8081\"\n")
            .unwrap();

        let config = ServerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8081");
    }
}
