//! HTTP surface of the converter.
//!
//! `POST {root}/pname?tsv` answers with the converted batch as plain text;
//! `POST {root}/pname` answers with one JSON record per line.

use crate::config::toml_config::ServerConfig;
use crate::core::converter::NameConverter;
use crate::core::dictionary::Dictionary;
use crate::domain::model::{ConversionRequest, RawConversionRequest};
use crate::utils::error::{PnameError, Result};
use crate::utils::validation::Validate;
use axum::{
    extract::{rejection::FormRejection, RawQuery, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

impl IntoResponse for PnameError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, self.user_friendly_message()).into_response()
    }
}

#[derive(Debug, Clone)]
struct CsrfCheck {
    header: HeaderName,
    token: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    converter: Arc<NameConverter>,
    csrf: Option<CsrfCheck>,
}

impl AppState {
    pub fn new(converter: NameConverter) -> Self {
        Self {
            converter: Arc::new(converter),
            csrf: None,
        }
    }

    /// Requires every conversion request to carry `header: token`.
    pub fn with_csrf(mut self, header: &str, token: &str) -> Result<Self> {
        let header = HeaderName::from_bytes(header.as_bytes()).map_err(|e| {
            PnameError::InvalidConfigValueError {
                field: "csrf.header".to_string(),
                value: header.to_string(),
                reason: e.to_string(),
            }
        })?;
        self.csrf = Some(CsrfCheck {
            header,
            token: token.to_string(),
        });
        Ok(self)
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let converter = match &config.dictionary {
            Some(section) => {
                let dictionary = Dictionary::load(&section.path, &section.options())?;
                NameConverter::with_dictionary(Arc::new(dictionary))
            }
            None => NameConverter::new(),
        };

        let state = Self::new(converter);
        match config.csrf_requirement() {
            Some((header, token)) => state.with_csrf(header, token),
            None => Ok(state),
        }
    }

    fn csrf_accepted(&self, headers: &HeaderMap) -> bool {
        match &self.csrf {
            None => true,
            Some(check) => headers
                .get(&check.header)
                .map(|value| value.as_bytes() == check.token.as_bytes())
                .unwrap_or(false),
        }
    }
}

/// Routes mounted under `context_root` (`""` and `"/"` both mean the root).
pub fn router(state: AppState, context_root: &str) -> Router {
    let routes = Router::new()
        .route("/pname", post(pname_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    let root = context_root.trim_end_matches('/');
    if root.is_empty() {
        routes
    } else {
        Router::new().nest(root, routes)
    }
}

/// Binds `addr` and serves in a background task; returns the bound address.
pub async fn spawn(
    state: AppState,
    context_root: &str,
    addr: SocketAddr,
) -> Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let app = router(state, context_root);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PnameError::ServerError {
            message: format!("Failed to bind {}: {}", addr, e),
        })?;
    let local_addr = listener.local_addr()?;

    tracing::info!("pname server listening on http://{}", local_addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("pname server error: {}", e);
        }
    });

    Ok((local_addr, handle))
}

/// Serves until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    config.validate()?;
    let state = AppState::from_config(config)?;
    match state.converter.dictionary() {
        Some(dictionary) => tracing::info!("Dictionary loaded with {} entries", dictionary.len()),
        None => tracing::info!("No dictionary configured"),
    }
    let addr = config.bind_address()?;
    let app = router(state, config.context_root());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PnameError::ServerError {
            message: format!("Failed to bind {}: {}", addr, e),
        })?;
    tracing::info!(
        "pname server listening on http://{}{}",
        listener.local_addr()?,
        config.context_root()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await
        .map_err(|e| PnameError::ServerError {
            message: e.to_string(),
        })
}

async fn health_handler() -> &'static str {
    "ok"
}

fn wants_tsv(query: Option<&str>) -> bool {
    query
        .map(|q| {
            q.split('&')
                .any(|param| param == "tsv" || param.starts_with("tsv="))
        })
        .unwrap_or(false)
}

async fn pname_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    form: std::result::Result<Form<RawConversionRequest>, FormRejection>,
) -> Response {
    if !state.csrf_accepted(&headers) {
        tracing::warn!("Rejected conversion request with missing or invalid CSRF token");
        return (StatusCode::FORBIDDEN, "Invalid CSRF token").into_response();
    }

    let raw = match form {
        Ok(Form(raw)) => raw,
        Err(rejection) => {
            tracing::warn!("Rejected malformed conversion request: {}", rejection);
            return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response();
        }
    };

    let request = match ConversionRequest::try_from(raw) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected conversion request: {}", e);
            return e.into_response();
        }
    };

    let result = state.converter.convert_request(&request);
    tracing::info!(
        style = %request.style,
        lines = result.len(),
        "converted batch"
    );

    if wants_tsv(query.as_deref()) {
        (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            result.physical_text(),
        )
            .into_response()
    } else {
        Json(result.names).into_response()
    }
}
