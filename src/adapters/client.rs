use crate::adapters::resolver::Resolver;
use crate::config::page::PageConfig;
use crate::domain::model::CasingStyle;
use crate::utils::error::{PnameError, Result};
use crate::utils::validation::validate_url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

/// HTTP client for the `/pname?tsv` conversion endpoint.
///
/// The endpoint and CSRF header are resolved once at construction; every
/// [`PnameClient::convert`] call is then a single form POST with no retry.
#[derive(Debug, Clone)]
pub struct PnameClient {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl PnameClient {
    pub const PATH: &'static str = "/pname?tsv";

    pub fn new(page: &PageConfig) -> Result<Self> {
        Self::with_client(Client::new(), page)
    }

    pub fn with_client(client: Client, page: &PageConfig) -> Result<Self> {
        let resolver = Resolver::new(page);
        let endpoint = resolver.uri(Self::PATH);
        validate_url("context_root", &endpoint)?;

        let mut headers = HeaderMap::new();
        if let Some((name, token)) = resolver.csrf().header_pair() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                PnameError::InvalidConfigValueError {
                    field: "csrf_header".to_string(),
                    value: name.to_string(),
                    reason: e.to_string(),
                }
            })?;
            let value =
                HeaderValue::from_str(token).map_err(|e| PnameError::InvalidConfigValueError {
                    field: "csrf_token".to_string(),
                    value: token.to_string(),
                    reason: e.to_string(),
                })?;
            headers.insert(name, value);
        } else {
            tracing::debug!("No CSRF configuration, sending requests without CSRF header");
        }

        Ok(Self {
            client,
            endpoint,
            headers,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the whole batch `ln` and returns the converted batch text.
    pub async fn convert(&self, style: CasingStyle, ln: &str) -> Result<String> {
        tracing::debug!("POST {} (type={})", self.endpoint, style);

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .form(&[("type", style.as_str()), ("ln", ln)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Conversion response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(PnameError::HttpStatusError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_resolved_once() {
        let client = PnameClient::new(&PageConfig::new("http://localhost:8080/app/")).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/app/pname?tsv");
        assert!(client.headers.is_empty());
    }

    #[test]
    fn test_csrf_header_is_prepared() {
        let page = PageConfig::new("http://localhost:8080").with_csrf("X-CSRF-TOKEN", "_csrf", "abc");
        let client = PnameClient::new(&page).unwrap();
        assert_eq!(client.headers.get("x-csrf-token").unwrap(), "abc");
    }

    #[test]
    fn test_relative_root_is_rejected() {
        let err = PnameClient::new(&PageConfig::new("/app")).unwrap_err();
        assert!(matches!(err, PnameError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        let page = PageConfig::new("http://localhost").with_csrf("bad header", "_csrf", "abc");
        assert!(PnameClient::new(&page).is_err());
    }
}
