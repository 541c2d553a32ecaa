//! The HTTP client every endpoint wrapper goes through.
//!
//! One method, [`ApiClient::request`], owns the whole outbound path:
//! URL joining, bearer attachment, JSON body serialization, response
//! body handling, and the normalization of HTTP failures into the
//! shared error taxonomy. Wrappers stay thin calls over it.

use crate::config::ApiConfig;
use quadra_core::error::{QuadraError, Result};
use quadra_core::session::AuthToken;
use reqwest::{Client, Method};
use serde_json::Value;
use uuid::Uuid;

/// Client for the Quadra backend REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

/// Per-request options for [`ApiClient::request`].
#[derive(Debug, Default)]
pub struct RequestOptions<'a> {
    /// HTTP method; GET when not specified.
    pub method: Option<Method>,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<Value>,
    /// Bearer token, sent as `Authorization: Bearer <token>`.
    pub token: Option<&'a AuthToken>,
}

impl<'a> RequestOptions<'a> {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Some(Method::POST),
            body: Some(body),
            token: None,
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Some(Method::PUT),
            body: Some(body),
            token: None,
        }
    }

    pub fn patch(body: Value) -> Self {
        Self {
            method: Some(Method::PATCH),
            body: Some(body),
            token: None,
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Some(Method::DELETE),
            body: None,
            token: None,
        }
    }

    pub fn with_token(mut self, token: &'a AuthToken) -> Self {
        self.token = Some(token);
        self
    }
}

impl ApiClient {
    /// Creates a client for the configured backend.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| QuadraError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    /// Creates a client from `QUADRA_API_URL` / the local default.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one request and normalizes the response.
    ///
    /// On an HTTP success status the parsed body is returned (raw text
    /// wrapped as a JSON string when the response is not JSON). Failure
    /// statuses become the matching [`QuadraError`] variant, carrying
    /// the backend's error message field when one is present. No
    /// retries, no caching.
    pub async fn request(&self, path: &str, options: RequestOptions<'_>) -> Result<Value> {
        let url = join_url(&self.base_url, path);
        let method = options.method.unwrap_or(Method::GET);
        let request_id = Uuid::new_v4();
        tracing::debug!(%method, %url, %request_id, "issuing API request");

        let mut request = self
            .http
            .request(method, &url)
            .header("x-request-id", request_id.to_string());
        if let Some(token) = options.token {
            request = request.bearer_auth(token.as_str());
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            QuadraError::network(format!("request to {url} failed: {e}"))
        })?;

        let status = response.status().as_u16();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("json"))
            .unwrap_or(false);
        let text = response
            .text()
            .await
            .map_err(|e| QuadraError::network(format!("failed to read response body: {e}")))?;

        if (200..300).contains(&status) {
            if is_json && !text.is_empty() {
                return serde_json::from_str(&text).map_err(Into::into);
            }
            return Ok(Value::String(text));
        }

        let payload = if is_json {
            serde_json::from_str(&text).ok()
        } else {
            None
        };
        Err(map_http_error(status, payload.as_ref()))
    }
}

/// Joins a relative path onto the base URL, tolerating a leading slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Maps an HTTP failure status and optional JSON error body to the
/// shared taxonomy: 401/403 → `Unauthorized`; other 4xx with a backend
/// message → `Validation`; everything else → `ServerError` with the
/// backend message when present, a generic `HTTP <status>` otherwise.
pub(crate) fn map_http_error(status: u16, payload: Option<&Value>) -> QuadraError {
    let message = payload.and_then(extract_error_message);
    match status {
        401 | 403 => QuadraError::unauthorized(
            message.unwrap_or_else(|| "the session is no longer valid".to_string()),
        ),
        400..=499 => match message {
            Some(message) => QuadraError::validation(message),
            None => QuadraError::server(status, format!("HTTP {status}")),
        },
        _ => QuadraError::server(
            status,
            message.unwrap_or_else(|| format!("HTTP {status}")),
        ),
    }
}

/// Pulls the human-readable message out of a backend error body.
///
/// The backend is inconsistent about the field name; `error`, `message`,
/// and `detail` all occur, sometimes nested one level (`{"error":
/// {"message": ...}}`).
pub(crate) fn extract_error_message(payload: &Value) -> Option<String> {
    for key in ["error", "message", "detail"] {
        match payload.get(key) {
            Some(Value::String(message)) => return Some(message.clone()),
            Some(nested @ Value::Object(_)) => {
                if let Some(message) = nested.get("message").and_then(Value::as_str) {
                    return Some(message.to_string());
                }
            }
            _ => {}
        }
    }
    None
}
