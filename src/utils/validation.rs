use crate::utils::error::{PnameError, Result};
use std::collections::HashSet;
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PnameError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PnameError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PnameError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PnameError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PnameError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_bind_address(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| PnameError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Expected host:port, {}", e),
        })
}

/// A context root is either empty (deployed at `/`) or an absolute path.
pub fn validate_context_root(field_name: &str, root: &str) -> Result<()> {
    if root.is_empty() {
        return Ok(());
    }
    if !root.starts_with('/') && Url::parse(root).is_err() {
        return Err(PnameError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: root.to_string(),
            reason: "Context root must start with '/' or be an absolute URL".to_string(),
        });
    }
    let routed = |c: char| matches!(c, '*' | ':' | '{' | '}');
    if root.starts_with('/') && root.contains(routed) {
        return Err(PnameError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: root.to_string(),
            reason: "Context root path cannot contain '*', ':', '{' or '}'".to_string(),
        });
    }
    if root.contains(char::is_whitespace) {
        return Err(PnameError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: root.to_string(),
            reason: "Context root cannot contain whitespace".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(PnameError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(PnameError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PnameError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PnameError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("server", "https://example.com").is_ok());
        assert!(validate_url("server", "http://127.0.0.1:8080/app").is_ok());
        assert!(validate_url("server", "").is_err());
        assert!(validate_url("server", "invalid-url").is_err());
        assert!(validate_url("server", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_bind_address() {
        let addr = validate_bind_address("server.bind", "127.0.0.1:8080").unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(validate_bind_address("server.bind", "localhost").is_err());
    }

    #[test]
    fn test_validate_context_root() {
        assert!(validate_context_root("server.context_root", "").is_ok());
        assert!(validate_context_root("server.context_root", "/").is_ok());
        assert!(validate_context_root("server.context_root", "/pname/").is_ok());
        assert!(validate_context_root("server.context_root", "http://host:8080/app").is_ok());
        assert!(validate_context_root("server.context_root", "pname").is_err());
        assert!(validate_context_root("server.context_root", "/my app").is_err());
        assert!(validate_context_root("server.context_root", "/app*").is_err());
        assert!(validate_context_root("server.context_root", "/app/:id").is_err());
        assert!(validate_context_root("server.context_root", "/{app}").is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["words.csv".to_string(), "words.tsv".to_string()];
        assert!(validate_file_extensions("dictionary.path", &files, &["csv", "tsv"]).is_ok());

        let invalid_files = vec!["words.txt".to_string()];
        assert!(
            validate_file_extensions("dictionary.path", &invalid_files, &["csv", "tsv"]).is_err()
        );
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("X-CSRF-TOKEN".to_string());
        let absent: Option<String> = None;
        assert_eq!(
            validate_required_field("csrf.header", &present).unwrap(),
            "X-CSRF-TOKEN"
        );
        assert!(matches!(
            validate_required_field("csrf.token", &absent),
            Err(PnameError::MissingConfigError { .. })
        ));
    }
}
