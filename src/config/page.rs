use crate::utils::error::Result;
use crate::utils::validation::{validate_context_root, Validate};
use serde::{Deserialize, Serialize};

/// Deployment metadata a client needs to reach the conversion endpoint.
///
/// `context_root` is the base path (or absolute base URL) the application is
/// served under. The CSRF fields are all optional; when the header name or
/// the token is missing, requests are sent without a CSRF header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub context_root: String,
    #[serde(default)]
    pub csrf_header: Option<String>,
    #[serde(default)]
    pub csrf_parameter: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl PageConfig {
    pub fn new(context_root: impl Into<String>) -> Self {
        Self {
            context_root: context_root.into(),
            ..Self::default()
        }
    }

    pub fn with_csrf(
        mut self,
        header: impl Into<String>,
        parameter: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.csrf_header = Some(header.into());
        self.csrf_parameter = Some(parameter.into());
        self.csrf_token = Some(token.into());
        self
    }
}

impl Validate for PageConfig {
    fn validate(&self) -> Result<()> {
        validate_context_root("context_root", &self.context_root)
    }
}
