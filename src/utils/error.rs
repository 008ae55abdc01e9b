use thiserror::Error;

#[derive(Error, Debug)]
pub enum PnameError {
    #[error("Invalid casing style: {value}")]
    InvalidCasingStyle { value: String },

    #[error("Missing input field: {field}")]
    MissingInput { field: String },

    #[error("HTTP request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Server responded with {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Dictionary error: {message}")]
    DictionaryError { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Config,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PnameError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PnameError::InvalidCasingStyle { .. } | PnameError::MissingInput { .. } => {
                ErrorCategory::Input
            }
            PnameError::TransportError(_) | PnameError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            PnameError::ConfigValidationError { .. }
            | PnameError::InvalidConfigValueError { .. }
            | PnameError::MissingConfigError { .. } => ErrorCategory::Config,
            PnameError::CsvError(_)
            | PnameError::SerializationError(_)
            | PnameError::DictionaryError { .. } => ErrorCategory::Data,
            PnameError::IoError(_) | PnameError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Config | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// True for errors caused by the caller's request rather than the service.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PnameError::InvalidCasingStyle { .. } => format!(
                "Use one of: {}",
                crate::domain::model::CasingStyle::ALL
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            PnameError::MissingInput { field } => {
                format!("Send the '{}' form field (an empty value is allowed)", field)
            }
            PnameError::TransportError(_) => {
                "Check that the server is running and reachable, then try again".to_string()
            }
            PnameError::HttpStatusError { status, .. } if *status == 403 => {
                "Pass the CSRF header name and token expected by the server".to_string()
            }
            PnameError::HttpStatusError { .. } => {
                "Inspect the server logs for the rejected request".to_string()
            }
            PnameError::CsvError(_) => "Check the CSV/TSV file for malformed rows".to_string(),
            PnameError::IoError(_) => "Check file paths and permissions".to_string(),
            PnameError::SerializationError(_) => "Check the JSON syntax of the file".to_string(),
            PnameError::ConfigValidationError { field, .. }
            | PnameError::InvalidConfigValueError { field, .. }
            | PnameError::MissingConfigError { field } => {
                format!("Fix the '{}' setting in the configuration", field)
            }
            PnameError::DictionaryError { .. } => {
                "Use a .csv, .tsv, .json, .yaml or .toml dictionary mapping words to word lists"
                    .to_string()
            }
            PnameError::ServerError { .. } => {
                "Check the bind address and that the port is free".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PnameError::InvalidCasingStyle { value } => {
                format!("'{}' is not a supported casing style", value)
            }
            PnameError::MissingInput { field } => format!("The request has no '{}' field", field),
            PnameError::TransportError(_) => "Could not reach the conversion server".to_string(),
            PnameError::HttpStatusError { status, body } => {
                format!("The server rejected the request ({}): {}", status, body.trim())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PnameError>;
