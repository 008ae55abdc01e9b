//! Endpoint and CSRF resolution from [`PageConfig`].

use crate::config::page::PageConfig;
use crate::domain::model::CsrfToken;

/// Drops one trailing `/` from `root`, then appends `path` as is.
pub fn resolve_uri(root: &str, path: &str) -> String {
    let root = root.strip_suffix('/').unwrap_or(root);
    format!("{}{}", root, path)
}

/// Header name and token, or neither when either one is undeclared or blank.
pub fn resolve_csrf(page: &PageConfig) -> CsrfToken {
    let present = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
    match (present(&page.csrf_header), present(&page.csrf_token)) {
        (Some(header), Some(token)) => CsrfToken {
            header: Some(header),
            token: Some(token),
        },
        _ => CsrfToken::default(),
    }
}

#[derive(Debug, Clone)]
pub struct Resolver {
    root: String,
    csrf: CsrfToken,
}

impl Resolver {
    pub fn new(page: &PageConfig) -> Self {
        Self {
            root: page.context_root.clone(),
            csrf: resolve_csrf(page),
        }
    }

    pub fn uri(&self, path: &str) -> String {
        resolve_uri(&self.root, path)
    }

    pub fn csrf(&self) -> &CsrfToken {
        &self.csrf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uri_strips_one_trailing_slash() {
        assert_eq!(resolve_uri("/app/", "/pname?tsv"), "/app/pname?tsv");
        assert_eq!(resolve_uri("/app", "/pname?tsv"), "/app/pname?tsv");
        assert_eq!(resolve_uri("/app//", "/pname"), "/app//pname");
        assert_eq!(resolve_uri("/", "/pname"), "/pname");
        assert_eq!(resolve_uri("", "/pname"), "/pname");
        assert_eq!(resolve_uri("/a//b", "pname/"), "/a//bpname/");
    }

    #[test]
    fn test_resolve_csrf() {
        let page = PageConfig::new("/");
        assert_eq!(resolve_csrf(&page), CsrfToken::default());

        let page = PageConfig::new("/").with_csrf("X-CSRF-TOKEN", "_csrf", "t0k3n");
        let csrf = resolve_csrf(&page);
        assert_eq!(csrf.header.as_deref(), Some("X-CSRF-TOKEN"));
        assert_eq!(csrf.token.as_deref(), Some("t0k3n"));

        let mut partial = page.clone();
        partial.csrf_token = None;
        assert_eq!(resolve_csrf(&partial), CsrfToken::default());

        partial.csrf_token = Some(String::new());
        assert_eq!(resolve_csrf(&partial).header_pair(), None);
    }

    #[test]
    fn test_resolver_uses_page_root() {
        let resolver = Resolver::new(&PageConfig::new("http://localhost:8080/pname/"));
        assert_eq!(
            resolver.uri("/pname?tsv"),
            "http://localhost:8080/pname/pname?tsv"
        );
        assert_eq!(resolver.csrf().header_pair(), None);
    }
}
